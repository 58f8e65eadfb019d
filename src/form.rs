//! Form state shared by the booking, login and upload forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Error, Result};
use crate::input::{InputContext, InputHandler, InputResult};

/// How a field takes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text
    Text,
    /// Text shown as bullets
    Masked,
    /// One of a fixed set of options, empty until chosen
    Choice(&'static [&'static str]),
}

/// One labelled form field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Label, also used to look the field up
    pub label: &'static str,
    /// How the field takes input
    pub kind: FieldKind,
    value: String,
    /// Cursor position in chars
    cursor: usize,
}

impl Field {
    /// Empty field with the cursor at the start.
    pub const fn new(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            kind,
            value: String::new(),
            cursor: 0,
        }
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to its end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    /// Empty the value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Cursor position in chars.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text as it should be drawn.
    pub fn display(&self) -> String {
        match self.kind {
            FieldKind::Masked => "•".repeat(self.value.chars().count()),
            FieldKind::Choice(_) if self.value.is_empty() => "Select a service".to_string(),
            _ => self.value.clone(),
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert(c);
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Step through the options; `forward == false` goes backwards.
    fn cycle(&mut self, options: &[&str], forward: bool) {
        if options.is_empty() {
            return;
        }
        let next = match options.iter().position(|o| *o == self.value) {
            None if forward => 0,
            None => options.len() - 1,
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => (i + options.len() - 1) % options.len(),
        };
        self.set(options[next]);
    }
}

/// An ordered list of fields with one focused at a time.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    /// Form over `fields`, focused on the first.
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    /// All fields in display order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index of the focused field.
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Focus the first field.
    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    /// Focus the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    /// Focus the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Value of the field labelled `label`, or empty.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map_or("", Field::value)
    }

    /// Set the field labelled `label`. Unknown labels are ignored.
    pub fn set(&mut self, label: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.label == label) {
            field.set(value);
        }
    }

    /// Reset every field and focus the first one.
    pub fn clear(&mut self) {
        self.fields.iter_mut().for_each(Field::clear);
        self.focus = 0;
    }

    /// Labels of fields with no value. Whitespace counts as a value.
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.value.is_empty())
            .map(|f| f.label)
            .collect()
    }

    /// Require every field to hold a value.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(missing))
        }
    }

    /// Insert pasted text into the focused field.
    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if !matches!(field.kind, FieldKind::Choice(_)) {
                field.insert_str(text);
            }
        }
    }
}

impl InputHandler for Form {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return InputResult::Consumed;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return InputResult::Consumed;
            }
            KeyCode::Enter => return InputResult::Submit,
            _ => {}
        }

        let Some(field) = self.fields.get_mut(self.focus) else {
            return InputResult::Ignored;
        };

        if let FieldKind::Choice(options) = field.kind {
            return match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    field.cycle(options, true);
                    InputResult::Consumed
                }
                KeyCode::Left => {
                    field.cycle(options, false);
                    InputResult::Consumed
                }
                KeyCode::Backspace | KeyCode::Delete => {
                    field.clear();
                    InputResult::Consumed
                }
                _ => InputResult::Ignored,
            };
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => field.insert(c),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.cursor = field.cursor.saturating_sub(1),
            KeyCode::Right => field.cursor = (field.cursor + 1).min(field.value.chars().count()),
            KeyCode::Home => field.cursor = 0,
            KeyCode::End => field.cursor = field.value.chars().count(),
            _ => return InputResult::Ignored,
        }
        InputResult::Consumed
    }

    fn name(&self) -> &'static str {
        "Form"
    }
}

/// A submit control that is disabled while its request is in flight.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    idle_label: &'static str,
    busy_label: &'static str,
    busy: bool,
}

impl SubmitButton {
    /// Idle button with the given labels.
    pub const fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            busy: false,
        }
    }

    /// Disable and show the busy label.
    pub fn begin(&mut self) {
        self.busy = true;
    }

    /// Re-enable and restore the idle label.
    pub fn finish(&mut self) {
        self.busy = false;
    }

    /// Label for the current state.
    pub const fn label(&self) -> &'static str {
        if self.busy {
            self.busy_label
        } else {
            self.idle_label
        }
    }

    /// Whether a request is in flight.
    pub const fn is_disabled(&self) -> bool {
        self.busy
    }
}
