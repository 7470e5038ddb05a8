use crate::terminal::KeyEvent;
use crate::widgets::text_input::TextAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Submit,
    NextFocus,
    PrevFocus,
    InputKey(KeyEvent),
    TextAction(TextAction),
    Tick,
}
