//! Engine configuration

use crate::core::format::DEFAULT_INTEGER_EPSILON;
use crate::core::tape::Tape;
use crate::core::{CalcError, CalcResult, PercentMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for [`CalculatorEngine`](crate::core::CalculatorEngine)
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Values closer than this to an integer are shown as that integer
    pub integer_epsilon: f64,
    /// Meaning of the `%` key
    pub percent: PercentMode,
    /// Maximum number of calculations kept on the tape
    pub tape_capacity: usize,
    /// Maximum characters in the input buffer (`None` = unlimited)
    pub max_input_len: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integer_epsilon: DEFAULT_INTEGER_EPSILON,
            percent: PercentMode::Reject,
            tape_capacity: Tape::DEFAULT_CAPACITY,
            max_input_len: None,
        }
    }
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integer snapping distance
    #[must_use]
    pub fn with_integer_epsilon(mut self, epsilon: f64) -> Self {
        self.integer_epsilon = epsilon;
        self
    }

    /// Set percent semantics
    #[must_use]
    pub const fn with_percent(mut self, percent: PercentMode) -> Self {
        self.percent = percent;
        self
    }

    /// Set tape capacity
    #[must_use]
    pub const fn with_tape_capacity(mut self, capacity: usize) -> Self {
        self.tape_capacity = capacity;
        self
    }

    /// Limit the input buffer length
    #[must_use]
    pub const fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    /// Checks that the values make sense
    pub fn validate(&self) -> CalcResult<()> {
        if !self.integer_epsilon.is_finite() || self.integer_epsilon <= 0.0 {
            return Err(CalcError::config(format!(
                "integer_epsilon must be a positive number, got {}",
                self.integer_epsilon
            )));
        }
        if self.tape_capacity == 0 {
            return Err(CalcError::config("tape_capacity must be at least 1"));
        }
        if self.max_input_len == Some(0) {
            return Err(CalcError::config("max_input_len must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CalcError::config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CalcError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}
