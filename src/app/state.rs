use crate::command::ActionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt,
    Editor,
    Dialog,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    pub debug_status_visible: bool,
    pub in_flight_requests: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            status: StatusState::default(),
            debug_status_visible: false,
            in_flight_requests: 0,
        }
    }
}
