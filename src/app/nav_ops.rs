use crate::command::{ActionId, Command, CommandOutcome, dispatch};
use crate::event::{AppEvent, NavCause};
use crate::nav::WorkspaceRequest;
use crate::template::{ServiceOutcome, ServiceRequest};

use super::core::{App, HistorySubsystem, InteractionSubsystem};
use super::state::Mode;

impl App {
    pub fn dispatch_command(&mut self, cmd: Command) -> CommandOutcome {
        let InteractionSubsystem {
            extensions, prompt, ..
        } = &mut self.interaction;
        dispatch(
            &mut self.state,
            &mut self.workspace,
            &mut self.history,
            extensions,
            prompt,
            cmd,
        )
    }

    /// Drain tab-change and history-change notifications until the
    /// system is quiescent. User-driven tab changes with both endpoints
    /// known are recorded; history replay applies navigation states,
    /// which in turn queue replay-tagged tab changes; hence the loop.
    pub fn pump_events(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        loop {
            let round = self.pump_workspace_events();
            let had_history = self.history.stack.has_changes();
            self.pump_history_changes();
            if round.is_empty() && !had_history {
                break;
            }
            events.extend(round);
        }
        events
    }

    fn pump_workspace_events(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        for change in self.workspace.drain_tab_changes() {
            if change.cause == NavCause::User
                && let (Some(from), Some(to)) = (&change.from, &change.to)
            {
                let HistorySubsystem { coordinator, stack } = &mut self.history;
                coordinator.record_hist_event(stack, &change.host, from, to);
            }
            events.push(AppEvent::TabChanged {
                host: change.host,
                from: change.from,
                to: change.to,
                cause: change.cause,
            });
        }
        events
    }

    fn pump_history_changes(&mut self) {
        while self.history.stack.has_changes() {
            for token in self.history.stack.drain_changes() {
                let HistorySubsystem { coordinator, stack } = &mut self.history;
                coordinator.handle_hist_change(stack, &mut self.workspace, &token);
            }
        }
    }

    /// Apply extension-requested workspace side effects, then collect
    /// every pending service request for the worker.
    pub fn pump_requests(&mut self) -> Vec<ServiceRequest> {
        for request in self.interaction.extensions.drain_workspace_requests() {
            match request {
                WorkspaceRequest::ReloadTab { host, tab } => {
                    self.workspace.reload_tab(&host, &tab);
                }
            }
        }
        let mut requests = self.workspace.drain_load_requests();
        requests.extend(self.interaction.extensions.drain_service_requests());
        requests
    }

    pub fn deliver_app_event(&mut self, event: &AppEvent) {
        let InteractionSubsystem { extensions, .. } = &mut self.interaction;
        extensions.handle_event(event, &mut self.state);
    }

    pub fn apply_service_outcome(&mut self, outcome: ServiceOutcome) -> Option<AppEvent> {
        match outcome {
            ServiceOutcome::PanelLoaded { host, tab, result } => {
                self.state.status.last_action_id = Some(ActionId::PanelLoad);
                self.state.status.message = match &result {
                    Ok(_) => format!("loaded panel '{tab}'"),
                    Err(_) => format!("panel '{tab}' failed to load"),
                };
                self.workspace.fill_tab(
                    &host,
                    &tab,
                    result.map_err(|failure| failure.display_message()),
                );
                None
            }
            ServiceOutcome::Template(outcome) => Some(AppEvent::Template(outcome)),
        }
    }

    /// The mode is derived state: dialogs shadow the editor, which
    /// shadows the prompt.
    pub fn sync_mode(&mut self) {
        self.state.mode = if self.interaction.extensions.dialog_open() {
            Mode::Dialog
        } else if self.interaction.extensions.editor_open() {
            Mode::Editor
        } else if self.interaction.prompt.is_open() {
            Mode::Prompt
        } else {
            Mode::Normal
        };
    }
}
