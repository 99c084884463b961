use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::AppState;
use crate::command::{ActionId, Command};
use crate::event::AppEvent;
use crate::extension::Extension;
use crate::input::{AppInputEvent, InputHookResult};
use crate::nav::WorkspaceRequest;

use super::editor::{EditorKeyResult, EditorPhase, EditorSession};
use super::fragment::sanitize_template_name;
use super::worker::{ServiceRequest, TemplateOrigin, TemplateOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateDialog {
    /// The save was rejected by validation; the user may force it
    /// through with the identical content.
    ConfirmOverride {
        origin: TemplateOrigin,
        name: String,
        content: String,
        message: String,
    },
    Failure {
        title: String,
        message: String,
    },
}

/// Inline template editing over rendered panels.
///
/// Affordance clicks start fetch/create flows, outcomes drive the modal
/// editor and dialogs, and the queued service/workspace requests are
/// drained by the event loop. At most one editor session exists at a
/// time; opening a new one closes any prior one unconditionally.
#[derive(Debug, Default)]
pub struct TemplateEditState {
    editor: Option<EditorSession>,
    dialog: Option<TemplateDialog>,
    service_requests: VecDeque<ServiceRequest>,
    workspace_requests: VecDeque<WorkspaceRequest>,
}

impl TemplateEditState {
    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn dialog(&self) -> Option<&TemplateDialog> {
        self.dialog.as_ref()
    }

    pub fn editor_open(&self) -> bool {
        self.editor.is_some()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn drain_service_requests(&mut self) -> Vec<ServiceRequest> {
        self.service_requests.drain(..).collect()
    }

    pub fn drain_workspace_requests(&mut self) -> Vec<WorkspaceRequest> {
        self.workspace_requests.drain(..).collect()
    }

    pub fn begin_edit(&mut self, app: &mut AppState, origin: TemplateOrigin, raw_name: &str) {
        let name = sanitize_template_name(raw_name);
        if name.is_empty() {
            return;
        }
        app.status.last_action_id = Some(ActionId::EditTemplate);
        app.status.message = format!("fetching template '{name}'");
        self.service_requests
            .push_back(ServiceRequest::FetchTemplate { origin, name });
    }

    pub fn begin_create(&mut self, app: &mut AppState, origin: TemplateOrigin, raw_name: &str) {
        let name = sanitize_template_name(raw_name);
        if name.is_empty() {
            return;
        }
        app.status.last_action_id = Some(ActionId::CreateTemplate);
        app.status.message = format!("creating template '{name}'");
        self.service_requests
            .push_back(ServiceRequest::CreateTemplate { origin, name });
    }

    pub fn submit_editor(&mut self, app: &mut AppState) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if editor.is_saving() {
            return;
        }
        editor.phase = EditorPhase::Saving;
        app.status.last_action_id = Some(ActionId::SubmitEditor);
        app.status.message = format!("saving template '{}'", editor.name);
        self.service_requests.push_back(ServiceRequest::SaveTemplate {
            origin: editor.origin.clone(),
            name: editor.name.clone(),
            content: editor.buffer.contents(),
            skip_validate: false,
        });
    }

    pub fn cancel_editor(&mut self, app: &mut AppState) {
        if self.editor.take().is_some() {
            app.status.last_action_id = Some(ActionId::CancelEditor);
            app.status.message = "editor closed".to_string();
        }
    }

    pub fn confirm_dialog(&mut self, app: &mut AppState) {
        match self.dialog.take() {
            Some(TemplateDialog::ConfirmOverride {
                origin,
                name,
                content,
                ..
            }) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.phase = EditorPhase::Saving;
                }
                app.status.last_action_id = Some(ActionId::ConfirmDialog);
                app.status.message = format!("saving template '{name}' without validation");
                self.service_requests.push_back(ServiceRequest::SaveTemplate {
                    origin,
                    name,
                    content,
                    skip_validate: true,
                });
            }
            Some(TemplateDialog::Failure { .. }) | None => {}
        }
    }

    pub fn dismiss_dialog(&mut self, app: &mut AppState) {
        if self.dialog.take().is_some() {
            app.status.last_action_id = Some(ActionId::DismissDialog);
            app.status.message = "dialog dismissed".to_string();
        }
    }

    pub fn on_template_outcome(&mut self, app: &mut AppState, outcome: &TemplateOutcome) {
        match outcome {
            TemplateOutcome::Fetched {
                origin,
                name,
                result,
            } => match result {
                Ok(content) => {
                    self.editor = Some(EditorSession::new(origin.clone(), name.clone(), content));
                    app.status.message = format!("editing template '{name}'");
                }
                Err(failure) => {
                    self.dialog = Some(TemplateDialog::Failure {
                        title: "Error".to_string(),
                        message: failure.display_message(),
                    });
                    app.status.message = format!("failed to fetch template '{name}'");
                }
            },
            TemplateOutcome::Created {
                origin,
                name,
                result,
            } => match result {
                Ok(()) => {
                    // Reload the owning tab, then continue into the edit
                    // flow for the freshly created template.
                    self.workspace_requests.push_back(WorkspaceRequest::ReloadTab {
                        host: origin.host.clone(),
                        tab: origin.tab.clone(),
                    });
                    self.service_requests.push_back(ServiceRequest::FetchTemplate {
                        origin: origin.clone(),
                        name: name.clone(),
                    });
                    app.status.message = format!("created template '{name}'");
                }
                Err(failure) => {
                    self.dialog = Some(TemplateDialog::Failure {
                        title: "Error".to_string(),
                        message: failure.display_message(),
                    });
                    app.status.message = format!("failed to create template '{name}'");
                }
            },
            TemplateOutcome::Saved {
                origin,
                name,
                content,
                result,
                ..
            } => match result {
                Ok(()) => {
                    self.editor = None;
                    self.workspace_requests.push_back(WorkspaceRequest::ReloadTab {
                        host: origin.host.clone(),
                        tab: origin.tab.clone(),
                    });
                    app.status.message = format!("saved template '{name}'");
                }
                Err(failure) if failure.is_validation_rejection() => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.phase = EditorPhase::Editing;
                    }
                    self.dialog = Some(TemplateDialog::ConfirmOverride {
                        origin: origin.clone(),
                        name: name.clone(),
                        content: content.clone(),
                        message: failure.display_message(),
                    });
                    app.status.message = format!("template '{name}' failed validation");
                }
                Err(failure) => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.phase = EditorPhase::Editing;
                    }
                    self.dialog = Some(TemplateDialog::Failure {
                        title: format!("Error saving '{name}'"),
                        message: failure.display_message(),
                    });
                    app.status.message = format!("failed to save template '{name}'");
                }
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputHookResult {
        if let Some(dialog) = self.dialog.as_ref() {
            return match dialog {
                TemplateDialog::ConfirmOverride { .. } => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        InputHookResult::EmitCommand(Command::ConfirmDialog)
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        InputHookResult::EmitCommand(Command::DismissDialog)
                    }
                    _ => InputHookResult::Consumed,
                },
                TemplateDialog::Failure { .. } => match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        InputHookResult::EmitCommand(Command::DismissDialog)
                    }
                    _ => InputHookResult::Consumed,
                },
            };
        }

        if let Some(editor) = self.editor.as_mut() {
            return match editor.handle_key(key) {
                EditorKeyResult::SaveRequested => {
                    InputHookResult::EmitCommand(Command::SubmitEditor)
                }
                EditorKeyResult::CloseRequested => {
                    InputHookResult::EmitCommand(Command::CancelEditor)
                }
                EditorKeyResult::Consumed => InputHookResult::Consumed,
            };
        }

        InputHookResult::Ignored
    }
}

pub struct TemplateExtension;

impl Extension for TemplateExtension {
    type State = TemplateEditState;

    fn init_state() -> Self::State {
        TemplateEditState::default()
    }

    fn handle_input(
        state: &mut Self::State,
        event: AppInputEvent,
        app: &mut AppState,
    ) -> InputHookResult {
        let _ = app;
        match event {
            AppInputEvent::Key(key) => state.handle_key(key),
            AppInputEvent::Click { .. } => InputHookResult::Ignored,
        }
    }

    fn handle_event(state: &mut Self::State, event: &AppEvent, app: &mut AppState) {
        if let AppEvent::Template(outcome) = event {
            state.on_template_outcome(app, outcome);
        }
    }
}
