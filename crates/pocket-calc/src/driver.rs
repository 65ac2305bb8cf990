//! Calculator drivers
//!
//! A driver presses buttons and reads back what a user would see. The
//! verification functions below are written against the trait only, so the
//! same button scripts can check the bare engine here and any UI adapter
//! built on top of it.

use crate::core::{CalcResult, CalculatorEngine, Readout};
use crate::keypad::Keypad;

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Presses one button by label
    fn press(&mut self, label: &str) -> CalcResult<()>;

    /// Current primary display text
    fn display(&self) -> String;

    /// Current history line
    fn history(&self) -> String;

    /// True while an error is displayed
    fn is_error(&self) -> bool;

    /// Presses `C`
    fn clear(&mut self) -> CalcResult<()> {
        self.press("C")
    }

    /// Presses each label in order, stopping at the first unknown one
    fn press_sequence(&mut self, labels: &[&str]) -> CalcResult<()> {
        for label in labels {
            self.press(label)?;
        }
        Ok(())
    }
}

/// Driver backed directly by [`CalculatorEngine`]
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: CalculatorEngine,
    keypad: Keypad,
    last: Option<Readout>,
}

impl EngineDriver {
    /// Creates a driver around a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(CalculatorEngine::new())
    }

    /// Creates a driver around an existing engine
    #[must_use]
    pub fn with_engine(engine: CalculatorEngine) -> Self {
        Self {
            engine,
            keypad: Keypad::new(),
            last: None,
        }
    }

    /// Returns a reference to the underlying engine
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Readout returned by the most recent press
    #[must_use]
    pub fn last_readout(&self) -> Option<&Readout> {
        self.last.as_ref()
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, label: &str) -> CalcResult<()> {
        let readout = self.keypad.press(label, &mut self.engine)?;
        self.last = Some(readout);
        Ok(())
    }

    fn display(&self) -> String {
        self.engine.display().to_string()
    }

    fn history(&self) -> String {
        self.engine.history().to_string()
    }

    fn is_error(&self) -> bool {
        self.engine.is_error()
    }
}

// ===== Unified Test Specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies digit entry and the decimal point rule
pub fn verify_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["1", ".", ".", "5"]).unwrap();
    assert_eq!(driver.display(), "1.5");
    assert_eq!(driver.history(), "");

    driver.press("±").unwrap();
    assert_eq!(driver.display(), "-1.5");
    driver.press("±").unwrap();
    assert_eq!(driver.display(), "1.5");
    driver.clear().unwrap();
}

/// Verifies the four arithmetic operators
pub fn verify_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases: [(&[&str], &str); 4] = [
        (&["5", "+", "3", "="], "8"),
        (&["1", "0", "-", "4", "="], "6"),
        (&["6", "*", "7", "="], "42"),
        (&["7", "/", "2", "="], "3.5"),
    ];
    for (labels, expected) in cases {
        driver.clear().unwrap();
        driver.press_sequence(labels).unwrap();
        assert_eq!(driver.display(), expected, "{labels:?}");
        assert_eq!(driver.history(), "");
    }
    driver.clear().unwrap();
}

/// Verifies result chaining and operator replacement
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["2", "+", "3", "="]).unwrap();
    assert_eq!(driver.display(), "5");
    driver.press("*").unwrap();
    assert_eq!(driver.history(), "5 * ");
    driver.press_sequence(&["4", "="]).unwrap();
    assert_eq!(driver.display(), "20");

    driver.clear().unwrap();
    driver.press_sequence(&["9", "+", "-"]).unwrap();
    assert_eq!(driver.history(), "9 - ");
    driver.press_sequence(&["1", "="]).unwrap();
    assert_eq!(driver.display(), "8");
    driver.clear().unwrap();
}

/// Verifies error entry and every recovery path
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.clear().unwrap();
    driver.press_sequence(&["6", "/", "0", "="]).unwrap();
    assert_eq!(driver.display(), "Error: Div by 0");
    assert!(driver.is_error());
    driver.press("7").unwrap();
    assert_eq!(driver.display(), "7");
    assert!(!driver.is_error());

    driver.clear().unwrap();
    driver.press("+").unwrap();
    assert_eq!(driver.display(), "Error");
    driver.press("+").unwrap();
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());

    driver.press("=").unwrap();
    assert!(driver.is_error());
    driver.press("CE").unwrap();
    assert_eq!(driver.display(), "0");
    assert!(!driver.is_error());
    driver.clear().unwrap();
}

/// Complete verification suite - runs all specifications
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_entry(driver);
    verify_arithmetic(driver);
    verify_chaining(driver);
    verify_error_recovery(driver);
}
