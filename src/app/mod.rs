mod core;
mod event_loop;
mod nav_ops;
mod state;
pub(crate) mod terminal_session;
mod view_ops;

#[cfg(test)]
mod tests;

pub use core::{App, HistorySubsystem, InteractionSubsystem};
pub use state::{AppState, Mode, StatusState};
