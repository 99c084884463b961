use std::collections::VecDeque;

use crate::event::NavCause;
use crate::template::PanelDoc;

use super::NavAdapter;
use super::workspace::LoadConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Loading,
    Ready(PanelDoc),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub id: String,
    pub title: String,
    /// Retained so the tab can be removed and recreated declaratively.
    pub load_cnf: Option<LoadConfig>,
    pub template_base: Option<String>,
    pub body: PanelBody,
}

/// Notification queued for every activation change, drained by the
/// event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabChange {
    pub host: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub cause: NavCause,
}

/// A tabbed container identified by a stable component id.
///
/// Selections applied through `apply_nav_state` raise an internal flag
/// first; the flag is consumed by the next emitted change notification,
/// which is then tagged `Replay` so history replay never records a new
/// entry. The flag assumes exactly one notification per applied state;
/// a selection of the already-active tab emits none and leaves the flag
/// set, mirroring the hosting framework's behavior.
#[derive(Debug)]
pub struct TabHost {
    id: String,
    tabs: Vec<TabEntry>,
    active: Option<usize>,
    internal_change: bool,
    pending: VecDeque<TabChange>,
}

impl TabHost {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tabs: Vec::new(),
            active: None,
            internal_change: false,
            pending: VecDeque::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tabs(&self) -> &[TabEntry] {
        &self.tabs
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&TabEntry> {
        self.active.and_then(|index| self.tabs.get(index))
    }

    pub fn tab(&self, id: &str) -> Option<&TabEntry> {
        self.position(id).map(|index| &self.tabs[index])
    }

    pub fn tab_mut(&mut self, id: &str) -> Option<&mut TabEntry> {
        self.position(id).map(|index| &mut self.tabs[index])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Append a tab; the first tab becomes active and emits a change
    /// with no previous tab, which is never recorded.
    pub fn push_tab(&mut self, tab: TabEntry) {
        self.tabs.push(tab);
        if self.active.is_none() {
            self.select(self.tabs.len() - 1);
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        let from = self.active;
        if from == Some(index) {
            return true;
        }
        self.active = Some(index);
        let internal = std::mem::take(&mut self.internal_change);
        self.pending.push_back(TabChange {
            host: self.id.clone(),
            from: from.map(|index| self.tabs[index].id.clone()),
            to: Some(self.tabs[index].id.clone()),
            cause: if internal {
                NavCause::Replay
            } else {
                NavCause::User
            },
        });
        true
    }

    pub fn select_next(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if self.tabs.len() < 2 {
            return false;
        }
        self.select((active + 1) % self.tabs.len())
    }

    pub fn select_prev(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if self.tabs.len() < 2 {
            return false;
        }
        self.select((active + self.tabs.len() - 1) % self.tabs.len())
    }

    /// Select by tab id without recording history; used for reloads and
    /// location loads.
    pub fn activate_internal(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.internal_change = true;
        self.select(index)
    }

    /// Remove a tab. When the active tab is removed the nearest
    /// remaining neighbor becomes active silently; the removal itself is
    /// not a navigation.
    pub fn remove_tab(&mut self, id: &str) -> Option<TabEntry> {
        let index = self.position(id)?;
        let removed = self.tabs.remove(index);
        match self.active {
            Some(active) if active == index => {
                self.active = if self.tabs.is_empty() {
                    None
                } else {
                    Some(index.min(self.tabs.len() - 1))
                };
            }
            Some(active) if active > index => {
                self.active = Some(active - 1);
            }
            _ => {}
        }
        Some(removed)
    }

    pub fn drain_changes(&mut self) -> Vec<TabChange> {
        self.pending.drain(..).collect()
    }
}

impl NavAdapter for TabHost {
    fn nav_state(&self) -> String {
        self.active_tab()
            .map(|tab| tab.id.clone())
            .unwrap_or_default()
    }

    fn apply_nav_state(&mut self, state: &str) {
        let Some(index) = self.position(state) else {
            return;
        };
        self.internal_change = true;
        self.select(index);
    }
}

#[cfg(test)]
mod tests {
    use crate::event::NavCause;
    use crate::nav::NavAdapter;

    use super::{PanelBody, TabEntry, TabHost};

    fn tab(id: &str) -> TabEntry {
        TabEntry {
            id: id.to_string(),
            title: id.to_string(),
            load_cnf: None,
            template_base: None,
            body: PanelBody::Loading,
        }
    }

    fn host_with(ids: &[&str]) -> TabHost {
        let mut host = TabHost::new("main-tabs");
        for id in ids {
            host.push_tab(tab(id));
        }
        host.drain_changes();
        host
    }

    #[test]
    fn user_selection_emits_a_user_change_with_both_ids() {
        let mut host = host_with(&["home", "reports"]);
        assert!(host.select(1));

        let changes = host.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].from.as_deref(), Some("home"));
        assert_eq!(changes[0].to.as_deref(), Some("reports"));
        assert_eq!(changes[0].cause, NavCause::User);
    }

    #[test]
    fn apply_nav_state_emits_a_replay_change() {
        let mut host = host_with(&["home", "reports"]);
        host.apply_nav_state("reports");

        let changes = host.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].cause, NavCause::Replay);
        assert_eq!(host.nav_state(), "reports");
    }

    #[test]
    fn selection_after_replay_is_user_again() {
        let mut host = host_with(&["home", "reports", "audit"]);
        host.apply_nav_state("reports");
        host.drain_changes();

        host.select(2);
        let changes = host.drain_changes();
        assert_eq!(changes[0].cause, NavCause::User);
    }

    #[test]
    fn apply_nav_state_ignores_unknown_tabs() {
        let mut host = host_with(&["home"]);
        host.apply_nav_state("nope");
        assert!(host.drain_changes().is_empty());
        assert_eq!(host.nav_state(), "home");
    }

    #[test]
    fn first_tab_activation_has_no_previous_tab() {
        let mut host = TabHost::new("main-tabs");
        host.push_tab(tab("home"));

        let changes = host.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].from, None);
        assert_eq!(changes[0].to.as_deref(), Some("home"));
    }

    #[test]
    fn removing_the_active_tab_activates_a_neighbor_silently() {
        let mut host = host_with(&["home", "reports"]);
        host.select(1);
        host.drain_changes();

        assert!(host.remove_tab("reports").is_some());
        assert_eq!(host.nav_state(), "home");
        assert!(host.drain_changes().is_empty());
    }

    #[test]
    fn nav_state_is_empty_without_tabs() {
        let host = TabHost::new("main-tabs");
        assert_eq!(host.nav_state(), "");
    }
}
