//! Core calculator module
//!
//! The button-driven state machine and the small pieces it is built from:
//! operators, number formatting and the tape of finished calculations.

pub mod engine;
pub mod format;
mod operations;
pub mod tape;

pub use engine::{CalculatorEngine, Readout};
pub use operations::{Operator, PercentMode};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// An operator or equals was pressed with no operand to act on
    #[error("Missing operand: {0}")]
    MissingOperand(&'static str),

    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// The input buffer did not hold a finite number
    #[error("Invalid number: {0:?}")]
    Parse(String),

    /// Result overflowed (infinity or NaN)
    #[error("Overflow: result is not a finite number")]
    Overflow,

    /// The operator has no arithmetic meaning under the active configuration
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(Operator),

    /// A keypad label that is not on the grid
    #[error("Unknown button: {label:?}")]
    UnknownButton {
        /// The label that was pressed
        label: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CalcError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown-button error
    #[must_use]
    pub fn unknown_button(label: impl Into<String>) -> Self {
        Self::UnknownButton {
            label: label.into(),
        }
    }

    /// Classifies the error into what the user gets to see
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            _ => ErrorKind::Generic,
        }
    }
}

/// User-facing error states of the engine
///
/// The message of the active kind replaces the display until the next
/// recovery event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing operand, bad number or an unsupported operation
    Generic,
    /// Division by zero
    DivisionByZero,
}

impl ErrorKind {
    /// Text rendered in the display while the error is active
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Generic => "Error",
            Self::DivisionByZero => "Error: Div by 0",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
