use crate::app::AppState;
use crate::event::AppEvent;
use crate::input::{AppInputEvent, InputHookResult};
use crate::nav::WorkspaceRequest;
use crate::template::{
    EditorSession, ServiceRequest, TemplateDialog, TemplateEditState, TemplateExtension,
    TemplateOrigin,
};

use super::traits::Extension;

pub struct ExtensionHost {
    template: TemplateEditState,
}

impl ExtensionHost {
    pub fn new() -> Self {
        Self {
            template: TemplateExtension::init_state(),
        }
    }

    pub fn handle_input(&mut self, event: AppInputEvent, app: &mut AppState) -> InputHookResult {
        TemplateExtension::handle_input(&mut self.template, event, app)
    }

    pub fn handle_event(&mut self, event: &AppEvent, app: &mut AppState) {
        TemplateExtension::handle_event(&mut self.template, event, app);
    }

    pub fn begin_edit(&mut self, app: &mut AppState, origin: TemplateOrigin, name: &str) {
        self.template.begin_edit(app, origin, name);
    }

    pub fn begin_create(&mut self, app: &mut AppState, origin: TemplateOrigin, name: &str) {
        self.template.begin_create(app, origin, name);
    }

    pub fn submit_editor(&mut self, app: &mut AppState) {
        self.template.submit_editor(app);
    }

    pub fn cancel_editor(&mut self, app: &mut AppState) {
        self.template.cancel_editor(app);
    }

    pub fn confirm_dialog(&mut self, app: &mut AppState) {
        self.template.confirm_dialog(app);
    }

    pub fn dismiss_dialog(&mut self, app: &mut AppState) {
        self.template.dismiss_dialog(app);
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.template.editor()
    }

    pub fn dialog(&self) -> Option<&TemplateDialog> {
        self.template.dialog()
    }

    pub fn editor_open(&self) -> bool {
        self.template.editor_open()
    }

    pub fn dialog_open(&self) -> bool {
        self.template.dialog_open()
    }

    pub fn drain_service_requests(&mut self) -> Vec<ServiceRequest> {
        self.template.drain_service_requests()
    }

    pub fn drain_workspace_requests(&mut self) -> Vec<WorkspaceRequest> {
        self.template.drain_workspace_requests()
    }
}

impl Default for ExtensionHost {
    fn default() -> Self {
        Self::new()
    }
}
