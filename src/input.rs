//! Input handling abstractions.
//!
//! This module provides traits and types for handling keyboard input
//! in a modular way, allowing handlers to be tested independently.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The input was consumed and handled.
    Consumed,
    /// The input was ignored (not applicable to this handler).
    Ignored,
    /// The page should quit.
    Quit,
    /// The focused form should be submitted.
    Submit,
    /// The help modal should open or close.
    ToggleHelp,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    /// A text field has focus, so printable keys are text.
    pub editing: bool,
    /// An alert or confirmation is showing.
    pub has_modal: bool,
}

/// Trait for handling keyboard input.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Quit;
        }
        if ctx.has_modal {
            return InputResult::Ignored;
        }

        match key.code {
            KeyCode::F(1) => InputResult::ToggleHelp,
            // Plain letters are text while a field has focus
            KeyCode::Char('?') if !ctx.editing => InputResult::ToggleHelp,
            KeyCode::Char('q') if !ctx.editing => InputResult::Quit,
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}
