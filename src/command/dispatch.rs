use crate::app::{AppState, HistorySubsystem};
use crate::extension::ExtensionHost;
use crate::history::parse_location;
use crate::nav::Workspace;
use crate::prompt::PromptManager;

use super::types::{ActionId, Command, CommandOutcome};

/// Route one command to the workspace, history stack, extension host,
/// or prompt. Tab-change and history-change notifications queued here
/// are pumped by the event loop afterwards.
pub fn dispatch(
    app: &mut AppState,
    workspace: &mut Workspace,
    history: &mut HistorySubsystem,
    extensions: &mut ExtensionHost,
    prompt: &mut PromptManager,
    cmd: Command,
) -> CommandOutcome {
    let action_id = cmd.action_id();

    match cmd {
        Command::NextTab => {
            let moved = workspace
                .main_host_mut()
                .is_some_and(|host| host.select_next());
            tab_cycle_status(app, action_id, moved)
        }
        Command::PrevTab => {
            let moved = workspace
                .main_host_mut()
                .is_some_and(|host| host.select_prev());
            tab_cycle_status(app, action_id, moved)
        }
        Command::SelectTab { index } => {
            app.status.last_action_id = Some(action_id);
            let selected = workspace
                .main_host_mut()
                .is_some_and(|host| host.select(index));
            if selected {
                app.status.message = format!("selected tab {}", index + 1);
                CommandOutcome::Applied
            } else {
                app.status.message = format!("no tab {}", index + 1);
                CommandOutcome::Noop
            }
        }
        Command::HistoryBack => {
            app.status.last_action_id = Some(action_id);
            if history.stack.back() {
                app.status.message = "navigating back".to_string();
                CommandOutcome::Applied
            } else {
                app.status.message = "history is empty".to_string();
                CommandOutcome::Noop
            }
        }
        Command::HistoryForward => {
            app.status.last_action_id = Some(action_id);
            if history.stack.forward() {
                app.status.message = "navigating forward".to_string();
                CommandOutcome::Applied
            } else {
                app.status.message = "history forward is empty".to_string();
                CommandOutcome::Noop
            }
        }
        Command::ReloadTab => {
            app.status.last_action_id = Some(action_id);
            let active = workspace.main_host().and_then(|host| {
                host.active_tab()
                    .map(|tab| (host.id().to_string(), tab.id.clone()))
            });
            match active {
                Some((host, tab)) if workspace.reload_tab(&host, &tab) => {
                    app.status.message = format!("reloading tab '{tab}'");
                    CommandOutcome::Applied
                }
                Some((_, tab)) => {
                    app.status.message = format!("tab '{tab}' has no reload configuration");
                    CommandOutcome::Noop
                }
                None => {
                    app.status.message = "no active tab".to_string();
                    CommandOutcome::Noop
                }
            }
        }
        Command::OpenPrompt => {
            prompt.open();
            app.status.last_action_id = Some(action_id);
            app.status.message = "open location".to_string();
            CommandOutcome::Applied
        }
        Command::OpenLocation { token } => {
            prompt.close();
            app.status.last_action_id = Some(action_id);
            match parse_location(&token) {
                Some(cnf) => {
                    let url = cnf.url.clone();
                    if workspace.load_into_target(cnf) {
                        app.status.message = format!("loading {url}");
                        CommandOutcome::Applied
                    } else {
                        app.status.message = "no load target tab".to_string();
                        CommandOutcome::Noop
                    }
                }
                None => {
                    app.status.message = format!("unrecognized location: {token}");
                    CommandOutcome::Noop
                }
            }
        }
        Command::EditTemplate { origin, name } => {
            extensions.begin_edit(app, origin, &name);
            CommandOutcome::Applied
        }
        Command::CreateTemplate { origin, name } => {
            extensions.begin_create(app, origin, &name);
            CommandOutcome::Applied
        }
        Command::SubmitEditor => {
            extensions.submit_editor(app);
            CommandOutcome::Applied
        }
        Command::CancelEditor => {
            extensions.cancel_editor(app);
            CommandOutcome::Applied
        }
        Command::ConfirmDialog => {
            extensions.confirm_dialog(app);
            CommandOutcome::Applied
        }
        Command::DismissDialog => {
            extensions.dismiss_dialog(app);
            CommandOutcome::Applied
        }
        Command::DebugStatusToggle => {
            app.debug_status_visible = !app.debug_status_visible;
            app.status.last_action_id = Some(action_id);
            app.status.message = if app.debug_status_visible {
                "debug status shown".to_string()
            } else {
                "debug status hidden".to_string()
            };
            CommandOutcome::Applied
        }
        Command::Cancel => {
            app.status.last_action_id = Some(action_id);
            if prompt.close() {
                app.status.message = "prompt closed".to_string();
                CommandOutcome::Applied
            } else if extensions.dialog_open() {
                extensions.dismiss_dialog(app);
                CommandOutcome::Applied
            } else {
                app.status.message = "nothing to cancel".to_string();
                CommandOutcome::Noop
            }
        }
        Command::Quit => {
            app.status.last_action_id = Some(action_id);
            app.status.message = "quit requested".to_string();
            CommandOutcome::QuitRequested
        }
    }
}

fn tab_cycle_status(app: &mut AppState, action_id: ActionId, moved: bool) -> CommandOutcome {
    app.status.last_action_id = Some(action_id);
    if moved {
        app.status.message = "switched tab".to_string();
        CommandOutcome::Applied
    } else {
        app.status.message = "no other tab".to_string();
        CommandOutcome::Noop
    }
}
