//! Pocket Calculator - button-driven arithmetic engine
//!
//! The logic behind a desktop calculator's button grid: digits, decimal
//! point, the four operators plus percent, equals, `C`, `CE` and `±` are
//! folded into a running computation with exactly one pending operation.
//! After every button the engine hands back the display text, the history
//! line and the error state; rendering them is left to the UI layer.
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let keypad = Keypad::new();
//! let mut calc = CalculatorEngine::new();
//!
//! for label in ["2", "+", "3", "=", "*", "4"] {
//!     keypad.press(label, &mut calc).unwrap();
//! }
//! assert_eq!(calc.history(), "5 * ");
//!
//! let out = keypad.press("=", &mut calc).unwrap();
//! assert_eq!(out.display, "20");
//!
//! // Errors are states, not panics
//! let out = calc.operator(Operator::Divide);
//! assert_eq!(out.history, "20 / ");
//! calc.digit('0');
//! assert_eq!(calc.equals().display, "Error: Div by 0");
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::format::format_number;
    pub use crate::core::tape::{Tape, TapeEntry};
    pub use crate::core::{
        CalcError, CalcResult, CalculatorEngine, ErrorKind, Operator, PercentMode, Readout,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::keypad::{ButtonAction, Keypad, KeypadButton};
}
