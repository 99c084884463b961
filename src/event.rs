use crossterm::event::Event;

use crate::command::Command;
use crate::template::TemplateOutcome;

/// Who initiated a tab change.
///
/// Defined in core; the history coordinator only records `User` changes,
/// so replaying history never generates new history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCause {
    /// Direct user interaction (key or click).
    User,
    /// Applied while restoring a previously recorded navigation state.
    Replay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged {
        host: String,
        from: Option<String>,
        to: Option<String>,
        cause: NavCause,
    },
    Template(TemplateOutcome),
}

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    App(AppEvent),
}
