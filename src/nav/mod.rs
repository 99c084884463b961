mod tabs;
mod workspace;

pub use tabs::{PanelBody, TabChange, TabEntry, TabHost};
pub use workspace::{LoadConfig, Workspace, WorkspaceRequest};

/// Capability contract for components that participate in history
/// tracking. States are opaque strings chosen by the component; empty
/// means "no state".
pub trait NavAdapter {
    fn nav_state(&self) -> String;

    /// Apply a previously recorded state. Implementations must not
    /// record a new history event while doing so.
    fn apply_nav_state(&mut self, state: &str);
}

/// Registry from component id to navigation adapter. Lookup happens at
/// replay time; callers treat unknown ids as a no-op.
pub trait NavTargets {
    fn nav_target_mut(&mut self, id: &str) -> Option<&mut dyn NavAdapter>;
}
