use crossterm::event::KeyEvent;

use crate::command::Command;

#[derive(Debug, Clone, Copy)]
pub enum AppInputEvent {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputHookResult {
    Ignored,
    Consumed,
    EmitCommand(Command),
}
