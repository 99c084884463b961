use crate::app::AppState;
use crate::event::AppEvent;
use crate::input::{AppInputEvent, InputHookResult};

pub trait Extension {
    type State;

    fn init_state() -> Self::State;

    fn handle_input(
        state: &mut Self::State,
        event: AppInputEvent,
        app: &mut AppState,
    ) -> InputHookResult {
        let _ = (state, event, app);
        InputHookResult::Ignored
    }

    fn handle_event(state: &mut Self::State, event: &AppEvent, app: &mut AppState) {
        let _ = (state, event, app);
    }
}
