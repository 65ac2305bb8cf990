//! The calculator state machine
//!
//! One engine instance owns the whole computation: the operand being typed,
//! at most one pending binary operation, the history line and the error
//! state. Each keypad button maps to exactly one method, every method is a
//! complete transition, and every method hands back a [`Readout`] for the UI
//! to render verbatim.
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut calc = CalculatorEngine::new();
//! calc.digit('5');
//! calc.operator(Operator::Add);
//! calc.digit('3');
//! let out = calc.equals();
//! assert_eq!(out.display, "8");
//! assert_eq!(out.history, "");
//! ```

use crate::config::EngineConfig;
use crate::core::format::{format_number, parse_operand};
use crate::core::tape::Tape;
use crate::core::{CalcError, CalcResult, ErrorKind, Operator};
use serde::Serialize;
use tracing::{debug, warn};

/// What the UI shows after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Primary display: the operand being typed, a result, or an error message
    pub display: String,
    /// Secondary trace line, e.g. `"5 + "`
    pub history: String,
    /// Active error state, if any
    pub error: Option<ErrorKind>,
}

impl Readout {
    /// True when the display holds an error message rather than a number
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Button-driven arithmetic engine with one pending operation
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    config: EngineConfig,
    pending_operand: Option<f64>,
    pending_operator: Option<Operator>,
    input: String,
    history: String,
    display: String,
    error: Option<ErrorKind>,
    tape: Tape,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    /// Display text at idle
    pub const IDLE_DISPLAY: &'static str = "0";

    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(EngineConfig::default())
    }

    /// Creates an engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: EngineConfig) -> Self {
        let tape = Tape::with_capacity(config.tape_capacity);
        Self {
            config,
            pending_operand: None,
            pending_operator: None,
            input: String::new(),
            history: String::new(),
            display: Self::IDLE_DISPLAY.to_string(),
            error: None,
            tape,
        }
    }

    // ===== Button operations =====

    /// Digit or decimal point button
    ///
    /// Anything other than `0-9` and `.` is ignored.
    pub fn digit(&mut self, d: char) -> Readout {
        if !(d.is_ascii_digit() || d == '.') {
            warn!(key = %d, "ignoring non-digit key");
            return self.readout();
        }
        if self.error.is_some() {
            debug!("digit clears error state");
            self.reset();
        }
        if d == '.' && self.input.contains('.') {
            return self.readout();
        }
        if let Some(max) = self.config.max_input_len {
            if self.input.chars().filter(|c| *c != '-').count() >= max {
                debug!(max, "input buffer full");
                return self.readout();
            }
        }

        self.input.push(d);
        self.display.clone_from(&self.input);
        debug!(input = %self.input, "digit");
        self.readout()
    }

    /// Operator button
    ///
    /// Stores the typed operand as the first operand, or swaps the pending
    /// operator when no new operand was typed. While in the error state the
    /// press only clears the error.
    pub fn operator(&mut self, op: Operator) -> Readout {
        if self.error.is_some() {
            debug!(%op, "operator clears error state");
            self.reset();
            return self.readout();
        }
        if let Err(err) = self.adopt_operator(op) {
            self.fail(&err);
        }
        self.readout()
    }

    /// Equals button
    ///
    /// On success the result becomes the first operand of the next chain.
    pub fn equals(&mut self) -> Readout {
        match self.evaluate() {
            Ok(result) => {
                let shown = self.fmt(result);
                debug!(result = %shown, "equals");
                self.pending_operand = Some(result);
                self.pending_operator = None;
                self.input = result.to_string();
                self.display = shown;
                self.history.clear();
            }
            Err(err) => self.fail(&err),
        }
        self.readout()
    }

    /// `C`: resets everything except the tape
    pub fn clear(&mut self) -> Readout {
        debug!("clear");
        self.reset();
        self.readout()
    }

    /// `CE`: drops the operand being typed
    ///
    /// The pending operation and the history line are kept. An error
    /// message on the display is replaced by `0`, which ends the error.
    pub fn clear_entry(&mut self) -> Readout {
        debug!("clear entry");
        self.input.clear();
        self.error = None;
        self.display = Self::IDLE_DISPLAY.to_string();
        self.readout()
    }

    /// `±`: negates the operand being typed
    pub fn toggle_sign(&mut self) -> Readout {
        if self.error.is_some() || self.input.is_empty() {
            return self.readout();
        }
        match parse_operand(&self.input) {
            Ok(value) => {
                self.input = self.fmt(-value);
                self.display.clone_from(&self.input);
                debug!(input = %self.input, "toggle sign");
            }
            Err(err) => debug!(error = %err, "toggle sign ignored"),
        }
        self.readout()
    }

    // ===== Transitions =====

    fn adopt_operator(&mut self, op: Operator) -> CalcResult<()> {
        let operand = if !self.input.is_empty() {
            let value = parse_operand(&self.input)?;
            self.input.clear();
            value
        } else if let Some(value) = self.pending_operand {
            value
        } else {
            return Err(CalcError::MissingOperand("operator"));
        };

        let shown = self.fmt(operand);
        self.history = format!("{shown} {op} ");
        self.display = shown;
        self.pending_operand = Some(operand);
        self.pending_operator = Some(op);
        debug!(history = %self.history, "operator");
        Ok(())
    }

    fn evaluate(&mut self) -> CalcResult<f64> {
        let (Some(a), Some(op)) = (self.pending_operand, self.pending_operator) else {
            return Err(CalcError::MissingOperand("equals"));
        };
        if self.input.is_empty() {
            return Err(CalcError::MissingOperand("equals"));
        }
        let b = parse_operand(&self.input)?;

        let expression = format!("{} {op} {}", self.fmt(a), self.fmt(b));
        self.history = format!("{expression} =");
        debug!(history = %self.history, "evaluating");

        let result = op.apply(a, b, self.config.percent)?;
        let result = if result == 0.0 { 0.0 } else { result };
        let shown = self.fmt(result);
        self.tape.record(expression, result, shown);
        Ok(result)
    }

    fn fail(&mut self, err: &CalcError) {
        let kind = err.kind();
        warn!(error = %err, display = kind.message(), "entering error state");
        self.reset();
        self.error = Some(kind);
        self.display = kind.message().to_string();
    }

    fn reset(&mut self) {
        self.pending_operand = None;
        self.pending_operator = None;
        self.input.clear();
        self.history.clear();
        self.display = Self::IDLE_DISPLAY.to_string();
        self.error = None;
    }

    fn fmt(&self, value: f64) -> String {
        format_number(value, self.config.integer_epsilon)
    }

    // ===== Accessors =====

    /// Snapshot of the UI-facing state
    #[must_use]
    pub fn readout(&self) -> Readout {
        Readout {
            display: self.display.clone(),
            history: self.history.clone(),
            error: self.error,
        }
    }

    /// Primary display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// History line text
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Active error state
    #[must_use]
    pub const fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// True while an error message is displayed
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// First operand of the pending operation (or the last result)
    #[must_use]
    pub const fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    /// Operator awaiting its second operand
    #[must_use]
    pub const fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// The operand being typed
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Forgets completed calculations
    pub fn clear_tape(&mut self) {
        self.tape.clear();
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PercentMode;

    fn type_digits(calc: &mut CalculatorEngine, digits: &str) {
        for d in digits.chars() {
            calc.digit(d);
        }
    }

    fn assert_idle(calc: &CalculatorEngine) {
        assert_eq!(calc.pending_operand(), None);
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.input(), "");
        assert_eq!(calc.history(), "");
    }

    // ===== Construction =====

    #[test]
    fn test_new_is_idle() {
        let calc = CalculatorEngine::new();
        assert_idle(&calc);
        assert_eq!(calc.display(), "0");
        assert!(!calc.is_error());
        assert!(calc.tape().is_empty());
    }

    #[test]
    fn test_with_config_validates() {
        let bad = EngineConfig::new().with_tape_capacity(0);
        assert!(matches!(
            CalculatorEngine::with_config(bad),
            Err(CalcError::Config { .. })
        ));
        let good = EngineConfig::new().with_tape_capacity(3);
        assert_eq!(
            CalculatorEngine::with_config(good).unwrap().tape().capacity(),
            3
        );
    }

    // ===== digit =====

    #[test]
    fn test_digits_concatenate() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "1024");
        assert_eq!(calc.display(), "1024");
        assert_eq!(calc.input(), "1024");
    }

    #[test]
    fn test_second_decimal_point_is_ignored() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "1..5");
        assert_eq!(calc.display(), "1.5");
    }

    #[test]
    fn test_leading_zeros_kept_verbatim() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "007");
        assert_eq!(calc.display(), "007");
    }

    #[test]
    fn test_non_digit_key_ignored() {
        let mut calc = CalculatorEngine::new();
        calc.digit('4');
        let out = calc.digit('x');
        assert_eq!(out.display, "4");
        assert_eq!(calc.input(), "4");
    }

    #[test]
    fn test_digit_clears_error_first() {
        let mut calc = CalculatorEngine::new();
        calc.operator(Operator::Add);
        assert!(calc.is_error());
        let out = calc.digit('7');
        assert_eq!(out.display, "7");
        assert_eq!(out.error, None);
    }

    #[test]
    fn test_max_input_len() {
        let config = EngineConfig::new().with_max_input_len(3);
        let mut calc = CalculatorEngine::with_config(config).unwrap();
        type_digits(&mut calc, "12345");
        assert_eq!(calc.display(), "123");
    }

    // ===== operator =====

    #[test]
    fn test_operator_without_operand_is_error() {
        let mut calc = CalculatorEngine::new();
        let out = calc.operator(Operator::Add);
        assert_eq!(out.display, "Error");
        assert_eq!(out.error, Some(ErrorKind::Generic));
        assert_eq!(out.history, "");
        assert_idle(&calc);
    }

    #[test]
    fn test_operator_stores_operand() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        let out = calc.operator(Operator::Add);
        assert_eq!(out.history, "5 + ");
        assert_eq!(out.display, "5");
        assert_eq!(calc.pending_operand(), Some(5.0));
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
        assert_eq!(calc.input(), "");
    }

    #[test]
    fn test_operator_formats_operand_in_history() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "2.50");
        let out = calc.operator(Operator::Multiply);
        assert_eq!(out.history, "2.5 * ");
    }

    #[test]
    fn test_operator_pressed_twice_replaces_operator() {
        let mut calc = CalculatorEngine::new();
        calc.digit('9');
        calc.operator(Operator::Add);
        let out = calc.operator(Operator::Divide);
        assert_eq!(out.history, "9 / ");
        assert_eq!(calc.pending_operator(), Some(Operator::Divide));
        assert_eq!(calc.pending_operand(), Some(9.0));
    }

    #[test]
    fn test_operator_with_new_operand_overwrites_first() {
        let mut calc = CalculatorEngine::new();
        calc.digit('2');
        calc.operator(Operator::Add);
        calc.digit('3');
        let out = calc.operator(Operator::Multiply);
        assert_eq!(out.history, "3 * ");
        assert_eq!(calc.pending_operand(), Some(3.0));
    }

    #[test]
    fn test_operator_in_error_state_only_clears() {
        let mut calc = CalculatorEngine::new();
        calc.operator(Operator::Add);
        let out = calc.operator(Operator::Subtract);
        assert_eq!(out.display, "0");
        assert_eq!(out.error, None);
        assert_idle(&calc);
    }

    #[test]
    fn test_operator_on_lone_decimal_point_is_error() {
        let mut calc = CalculatorEngine::new();
        calc.digit('.');
        let out = calc.operator(Operator::Add);
        assert_eq!(out.display, "Error");
        assert_idle(&calc);
    }

    // ===== equals =====

    #[test]
    fn test_simple_addition() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Add);
        calc.digit('3');
        let out = calc.equals();
        assert_eq!(out.display, "8");
        assert_eq!(out.history, "");
        assert_eq!(calc.pending_operand(), Some(8.0));
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.input(), "8");
    }

    #[test]
    fn test_each_operator() {
        let cases = [
            (Operator::Add, "12", "4", "16"),
            (Operator::Subtract, "12", "4", "8"),
            (Operator::Multiply, "12", "4", "48"),
            (Operator::Divide, "12", "4", "3"),
            (Operator::Divide, "1", "4", "0.25"),
            (Operator::Subtract, "4", "12", "-8"),
        ];
        for (op, a, b, expected) in cases {
            let mut calc = CalculatorEngine::new();
            type_digits(&mut calc, a);
            calc.operator(op);
            type_digits(&mut calc, b);
            assert_eq!(calc.equals().display, expected, "{a} {op} {b}");
        }
    }

    #[test]
    fn test_divide_by_zero() {
        let mut calc = CalculatorEngine::new();
        calc.digit('6');
        calc.operator(Operator::Divide);
        calc.digit('0');
        let out = calc.equals();
        assert_eq!(out.display, "Error: Div by 0");
        assert_eq!(out.error, Some(ErrorKind::DivisionByZero));
        assert_idle(&calc);
        assert!(calc.tape().is_empty());
    }

    #[test]
    fn test_chaining() {
        let mut calc = CalculatorEngine::new();
        calc.digit('2');
        calc.operator(Operator::Add);
        calc.digit('3');
        assert_eq!(calc.equals().display, "5");
        let out = calc.operator(Operator::Multiply);
        assert_eq!(out.history, "5 * ");
        calc.digit('4');
        assert_eq!(calc.equals().display, "20");
    }

    #[test]
    fn test_chaining_keeps_full_precision() {
        let mut calc = CalculatorEngine::new();
        calc.digit('1');
        calc.operator(Operator::Divide);
        calc.digit('3');
        assert_eq!(calc.equals().display, (1.0_f64 / 3.0).to_string());
        calc.operator(Operator::Multiply);
        calc.digit('3');
        assert_eq!(calc.equals().display, "1");
    }

    #[test]
    fn test_equals_without_operator_is_error() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        let out = calc.equals();
        assert_eq!(out.display, "Error");
        assert_idle(&calc);
    }

    #[test]
    fn test_equals_without_second_operand_is_error() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Add);
        let out = calc.equals();
        assert_eq!(out.display, "Error");
        assert_idle(&calc);
    }

    #[test]
    fn test_equals_twice_is_error() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Add);
        calc.digit('3');
        calc.equals();
        assert_eq!(calc.equals().display, "Error");
    }

    #[test]
    fn test_percent_rejected_by_default() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "50");
        let out = calc.operator(Operator::Percent);
        assert_eq!(out.history, "50 % ");
        type_digits(&mut calc, "10");
        let out = calc.equals();
        assert_eq!(out.display, "Error");
        assert_eq!(out.error, Some(ErrorKind::Generic));
    }

    #[test]
    fn test_percent_of_operand() {
        let config = EngineConfig::new().with_percent(PercentMode::OfOperand);
        let mut calc = CalculatorEngine::with_config(config).unwrap();
        type_digits(&mut calc, "50");
        calc.operator(Operator::Percent);
        type_digits(&mut calc, "10");
        assert_eq!(calc.equals().display, "5");
    }

    #[test]
    fn test_overflow_is_error() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, &"9".repeat(300));
        calc.operator(Operator::Multiply);
        type_digits(&mut calc, &"9".repeat(300));
        let out = calc.equals();
        assert_eq!(out.display, "Error");
    }

    #[test]
    fn test_equals_records_tape() {
        let mut calc = CalculatorEngine::new();
        calc.digit('6');
        calc.operator(Operator::Divide);
        calc.digit('4');
        calc.equals();
        let entry = calc.tape().last().unwrap();
        assert_eq!(entry.line(), "6 / 4 = 1.5");
        assert_eq!(entry.result, 1.5);
    }

    #[test]
    fn test_typing_after_equals_extends_result() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Add);
        calc.digit('3');
        calc.equals();
        assert_eq!(calc.digit('5').display, "85");
    }

    #[test]
    fn test_negative_zero_result_shows_zero() {
        let mut calc = CalculatorEngine::new();
        calc.digit('1');
        calc.toggle_sign();
        calc.operator(Operator::Multiply);
        calc.digit('0');
        let out = calc.equals();
        assert_eq!(out.display, "0");
        assert_eq!(calc.input(), "0");
    }

    // ===== clear / clear entry =====

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Add);
        calc.digit('3');
        let out = calc.clear();
        assert_eq!(out.display, "0");
        assert_eq!(out.history, "");
        assert_eq!(out.error, None);
        assert_idle(&calc);
    }

    #[test]
    fn test_clear_keeps_tape() {
        let mut calc = CalculatorEngine::new();
        calc.digit('1');
        calc.operator(Operator::Add);
        calc.digit('1');
        calc.equals();
        calc.clear();
        assert_eq!(calc.tape().len(), 1);
        calc.clear_tape();
        assert!(calc.tape().is_empty());
    }

    #[test]
    fn test_clear_exits_error() {
        let mut calc = CalculatorEngine::new();
        calc.equals();
        assert!(calc.is_error());
        assert!(!calc.clear().is_error());
    }

    #[test]
    fn test_clear_entry_keeps_pending_operation() {
        let mut calc = CalculatorEngine::new();
        calc.digit('5');
        calc.operator(Operator::Subtract);
        type_digits(&mut calc, "99");
        let out = calc.clear_entry();
        assert_eq!(out.display, "0");
        assert_eq!(out.history, "5 - ");
        assert_eq!(calc.pending_operand(), Some(5.0));
        assert_eq!(calc.pending_operator(), Some(Operator::Subtract));
        assert_eq!(calc.input(), "");

        calc.digit('2');
        assert_eq!(calc.equals().display, "3");
    }

    #[test]
    fn test_clear_entry_exits_error() {
        let mut calc = CalculatorEngine::new();
        calc.operator(Operator::Add);
        let out = calc.clear_entry();
        assert_eq!(out.display, "0");
        assert!(!out.is_error());
    }

    #[test]
    fn test_operator_after_clear_entry_following_equals() {
        let mut calc = CalculatorEngine::new();
        calc.digit('7');
        calc.operator(Operator::Add);
        calc.digit('1');
        calc.equals();
        calc.clear_entry();
        let out = calc.operator(Operator::Subtract);
        assert_eq!(out.history, "8 - ");
        assert_eq!(out.display, "8");
    }

    // ===== toggle sign =====

    #[test]
    fn test_toggle_sign_twice_is_identity() {
        let mut calc = CalculatorEngine::new();
        calc.digit('4');
        assert_eq!(calc.toggle_sign().display, "-4");
        assert_eq!(calc.toggle_sign().display, "4");
    }

    #[test]
    fn test_toggle_sign_reformats() {
        let mut calc = CalculatorEngine::new();
        type_digits(&mut calc, "2.50");
        assert_eq!(calc.toggle_sign().display, "-2.5");
    }

    #[test]
    fn test_toggle_sign_zero_stays_zero() {
        let mut calc = CalculatorEngine::new();
        calc.digit('0');
        assert_eq!(calc.toggle_sign().display, "0");
    }

    #[test]
    fn test_toggle_sign_empty_is_noop() {
        let mut calc = CalculatorEngine::new();
        let out = calc.toggle_sign();
        assert_eq!(out.display, "0");
        assert_eq!(calc.input(), "");
    }

    #[test]
    fn test_toggle_sign_lone_decimal_is_noop() {
        let mut calc = CalculatorEngine::new();
        calc.digit('.');
        assert_eq!(calc.toggle_sign().display, ".");
    }

    #[test]
    fn test_toggle_sign_in_error_is_noop() {
        let mut calc = CalculatorEngine::new();
        calc.equals();
        let out = calc.toggle_sign();
        assert_eq!(out.display, "Error");
        assert!(out.is_error());
    }

    #[test]
    fn test_negative_operand_in_history() {
        let mut calc = CalculatorEngine::new();
        calc.digit('3');
        calc.toggle_sign();
        let out = calc.operator(Operator::Multiply);
        assert_eq!(out.history, "-3 * ");
        calc.digit('3');
        assert_eq!(calc.equals().display, "-9");
    }

    // ===== Readout =====

    #[test]
    fn test_readout_serialize() {
        let mut calc = CalculatorEngine::new();
        calc.digit('6');
        calc.operator(Operator::Divide);
        calc.digit('0');
        let json = serde_json::to_string(&calc.equals()).unwrap();
        assert_eq!(
            json,
            r#"{"display":"Error: Div by 0","history":"","error":"division_by_zero"}"#
        );
    }

    #[test]
    fn test_error_display_contains_marker() {
        let mut calc = CalculatorEngine::new();
        let out = calc.equals();
        assert!(out.display.contains("Error"));
        assert_eq!(out.is_error(), out.display.contains("Error"));
    }
}
