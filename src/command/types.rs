use crate::template::TemplateOrigin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextTab,
    PrevTab,
    SelectTab { index: usize },
    HistoryBack,
    HistoryForward,
    ReloadTab,
    OpenPrompt,
    OpenLocation { token: String },
    EditTemplate { origin: TemplateOrigin, name: String },
    CreateTemplate { origin: TemplateOrigin, name: String },
    SubmitEditor,
    CancelEditor,
    ConfirmDialog,
    DismissDialog,
    DebugStatusToggle,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    NextTab,
    PrevTab,
    SelectTab,
    HistoryBack,
    HistoryForward,
    ReloadTab,
    OpenPrompt,
    OpenLocation,
    EditTemplate,
    CreateTemplate,
    SubmitEditor,
    CancelEditor,
    ConfirmDialog,
    DismissDialog,
    DebugStatusToggle,
    Cancel,
    Quit,
    Input,
    PanelLoad,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextTab => "next-tab",
            Self::PrevTab => "prev-tab",
            Self::SelectTab => "select-tab",
            Self::HistoryBack => "history-back",
            Self::HistoryForward => "history-forward",
            Self::ReloadTab => "reload-tab",
            Self::OpenPrompt => "open-prompt",
            Self::OpenLocation => "open-location",
            Self::EditTemplate => "edit-template",
            Self::CreateTemplate => "create-template",
            Self::SubmitEditor => "submit-editor",
            Self::CancelEditor => "cancel-editor",
            Self::ConfirmDialog => "confirm-dialog",
            Self::DismissDialog => "dismiss-dialog",
            Self::DebugStatusToggle => "debug-status-toggle",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::PanelLoad => "panel-load",
        }
    }
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::NextTab => ActionId::NextTab,
            Self::PrevTab => ActionId::PrevTab,
            Self::SelectTab { .. } => ActionId::SelectTab,
            Self::HistoryBack => ActionId::HistoryBack,
            Self::HistoryForward => ActionId::HistoryForward,
            Self::ReloadTab => ActionId::ReloadTab,
            Self::OpenPrompt => ActionId::OpenPrompt,
            Self::OpenLocation { .. } => ActionId::OpenLocation,
            Self::EditTemplate { .. } => ActionId::EditTemplate,
            Self::CreateTemplate { .. } => ActionId::CreateTemplate,
            Self::SubmitEditor => ActionId::SubmitEditor,
            Self::CancelEditor => ActionId::CancelEditor,
            Self::ConfirmDialog => ActionId::ConfirmDialog,
            Self::DismissDialog => ActionId::DismissDialog,
            Self::DebugStatusToggle => ActionId::DebugStatusToggle,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

#[cfg(test)]
mod tests {
    use crate::template::TemplateOrigin;

    use super::{ActionId, Command};

    #[test]
    fn command_action_id_maps_tab_history_and_template_variants() {
        assert_eq!(Command::NextTab.action_id(), ActionId::NextTab);
        assert_eq!(
            Command::SelectTab { index: 3 }.action_id(),
            ActionId::SelectTab
        );
        assert_eq!(Command::HistoryBack.action_id(), ActionId::HistoryBack);
        assert_eq!(
            Command::EditTemplate {
                origin: TemplateOrigin {
                    host: "main-tabs".to_string(),
                    tab: "home".to_string(),
                    base: "/tpl".to_string(),
                },
                name: "header".to_string(),
            }
            .action_id(),
            ActionId::EditTemplate
        );
        assert_eq!(ActionId::OpenLocation.as_str(), "open-location");
    }
}
