//! Binary operators and their arithmetic
//!
//! Type-safe operator enum: the keypad can only ever produce one of these.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// The operators on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Percent (%)
    Percent,
}

/// How `a % b =` is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PercentMode {
    /// Percent has no arithmetic meaning; evaluating it is an error
    #[default]
    Reject,
    /// `a % b` is `b` percent of `a`, i.e. `a * b / 100`
    OfOperand,
}

impl Operator {
    /// Every operator, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Percent,
        Self::Divide,
        Self::Multiply,
        Self::Subtract,
        Self::Add,
    ];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Percent => "%",
        }
    }

    /// Looks up an operator by its symbol
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Evaluates `a <op> b`
    ///
    /// Fails on division by zero, on a non-finite result, and on percent
    /// under [`PercentMode::Reject`].
    pub fn apply(self, a: f64, b: f64, percent: PercentMode) -> CalcResult<f64> {
        let result = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
            Self::Percent => match percent {
                PercentMode::Reject => return Err(CalcError::UnsupportedOperation(self)),
                PercentMode::OfOperand => a * b / 100.0,
            },
        };
        check_finite(result)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Checks for overflow (infinity or NaN)
fn check_finite(result: f64) -> CalcResult<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::Overflow)
    }
}
