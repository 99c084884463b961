mod chrome;
mod content;
mod hits;
mod layout;
mod overlay;

pub use chrome::{DebugStatus, draw_status, draw_tab_bar};
pub use content::draw_panel;
pub use hits::{HitMap, HitTarget};
pub use layout::{UiLayout, split_layout};
pub use overlay::{draw_dialog_overlay, draw_editor_overlay, draw_prompt_overlay};
