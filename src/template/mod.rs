pub mod editor;
pub mod fragment;
pub mod plugin;
pub mod service;
pub mod worker;

pub use editor::{EditorPhase, EditorSession, TextBuffer};
pub use fragment::{PanelBlock, PanelDoc, TemplateFragment, parse_panel, sanitize_template_name};
pub use plugin::{TemplateDialog, TemplateEditState, TemplateExtension};
pub use service::{
    HttpPanelService, PanelService, ServiceError, ServiceFailure, VALIDATION_REJECTED_STATUS,
};
pub use worker::{ServiceOutcome, ServiceRequest, ServiceWorker, TemplateOrigin, TemplateOutcome};
