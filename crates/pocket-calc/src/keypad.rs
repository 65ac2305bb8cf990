//! Keypad: the button grid as data
//!
//! Maps every button label to the engine operation it triggers. A UI layer
//! only has to forward the label of the clicked button and render the
//! returned [`Readout`].
//!
//! ```text
//! [ C ] [ CE ] [ % ] [ / ]
//! [ 7 ] [ 8  ] [ 9 ] [ * ]
//! [ 4 ] [ 5  ] [ 6 ] [ - ]
//! [ 1 ] [ 2  ] [ 3 ] [ + ]
//! [ ± ] [ 0  ] [ . ] [ = ]
//! ```

use crate::core::{CalcError, CalcResult, CalculatorEngine, Operator, Readout};
use tracing::debug;

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Choose the pending operator
    Operator(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Reset everything
    Clear,
    /// Drop the operand being typed
    ClearEntry,
    /// Negate the operand being typed
    ToggleSign,
}

impl ButtonAction {
    /// Resolves a button label; `+/-` is accepted for `±`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let action = match label {
            "=" => Self::Equals,
            "C" => Self::Clear,
            "CE" => Self::ClearEntry,
            "±" | "+/-" => Self::ToggleSign,
            "." => Self::Decimal,
            _ => {
                if let Some(op) = Operator::from_symbol(label) {
                    return Some(Self::Operator(op));
                }
                let mut chars = label.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Digit(digit as u8)
            }
        };
        Some(action)
    }

    /// Label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::ToggleSign => "±".to_string(),
        }
    }

    /// Runs the matching engine operation
    pub fn apply(self, engine: &mut CalculatorEngine) -> Readout {
        match self {
            Self::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(ch) => engine.digit(ch),
                None => engine.readout(),
            },
            Self::Decimal => engine.digit('.'),
            Self::Operator(op) => engine.operator(op),
            Self::Equals => engine.equals(),
            Self::Clear => engine.clear(),
            Self::ClearEntry => engine.clear_entry(),
            Self::ToggleSign => engine.toggle_sign(),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Grid row (0 = top)
    pub row: usize,
    /// Grid column (0 = left)
    pub col: usize,
    /// The action this button performs
    pub action: ButtonAction,
}

impl KeypadButton {
    /// Label printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.action.label()
    }
}

/// The standard 5x4 calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonAction::{Clear, ClearEntry, Decimal, Digit, Equals, ToggleSign};
        let op = ButtonAction::Operator;

        let layout = [
            [Clear, ClearEntry, op(Operator::Percent), op(Operator::Divide)],
            [Digit(7), Digit(8), Digit(9), op(Operator::Multiply)],
            [Digit(4), Digit(5), Digit(6), op(Operator::Subtract)],
            [Digit(1), Digit(2), Digit(3), op(Operator::Add)],
            [ToggleSign, Digit(0), Decimal, Equals],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions.iter().enumerate().map(move |(col, &action)| KeypadButton {
                    row,
                    col,
                    action,
                })
            })
            .collect();

        Self {
            buttons,
            rows: layout.len(),
            cols: 4,
        }
    }

    /// Returns all buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button carrying `label`
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&KeypadButton> {
        let action = ButtonAction::from_label(label)?;
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Presses the button labelled `label`
    pub fn press(&self, label: &str, engine: &mut CalculatorEngine) -> CalcResult<Readout> {
        let button = self
            .find_by_label(label)
            .ok_or_else(|| CalcError::unknown_button(label))?;
        debug!(label, row = button.row, col = button.col, "press");
        Ok(button.action.apply(engine))
    }
}
