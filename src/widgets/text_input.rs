use crate::form::data::FieldName;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::text_edit;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAction {
    DeleteWordLeft,
    DeleteWordRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The value changed; the owner should sync it into the form.
    Changed,
    /// Cursor moved or the key was otherwise consumed.
    Handled,
    NotHandled,
    Submit,
}

/// Single-line editor bound to one form field.
#[derive(Debug, Clone)]
pub struct TextInput {
    field: FieldName,
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(field: FieldName) -> Self {
        Self {
            field,
            value: String::new(),
            cursor: 0,
        }
    }

    pub fn field(&self) -> FieldName {
        self.field
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display columns between the start of the value and the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        // AltGr arrives as Ctrl+Alt on Windows.
        let alt_gr = ctrl && key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if (!ctrl || alt_gr) && !ch.is_control() => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                KeyResult::Changed
            }
            KeyCode::Backspace => changed_if(text_edit::backspace_char(
                &mut self.value,
                &mut self.cursor,
            )),
            KeyCode::Delete => {
                changed_if(text_edit::delete_char(&mut self.value, &mut self.cursor))
            }
            KeyCode::Left => {
                if ctrl {
                    text_edit::move_word_left(&mut self.cursor, &self.value);
                } else {
                    text_edit::move_left(&mut self.cursor, &self.value);
                }
                KeyResult::Handled
            }
            KeyCode::Right => {
                if ctrl {
                    text_edit::move_word_right(&mut self.cursor, &self.value);
                } else {
                    text_edit::move_right(&mut self.cursor, &self.value);
                }
                KeyResult::Handled
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyResult::Handled
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    pub fn apply_action(&mut self, action: TextAction) -> KeyResult {
        let changed = match action {
            TextAction::DeleteWordLeft => {
                text_edit::delete_word_left(&mut self.value, &mut self.cursor)
            }
            TextAction::DeleteWordRight => {
                text_edit::delete_word_right(&mut self.value, &mut self.cursor)
            }
        };
        changed_if(changed)
    }
}

#[cfg(test)]
impl TextInput {
    fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = text_edit::char_count(&self.value);
    }
}

fn changed_if(changed: bool) -> KeyResult {
    if changed {
        KeyResult::Changed
    } else {
        KeyResult::Handled
    }
}
