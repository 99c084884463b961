use crate::nav::NavTargets;

use super::stack::HistoryStack;
use super::token::{NavToken, is_forward_nav, wrap_idx};

/// Synchronizes component navigation state with the history stack.
///
/// One instance per application session; the stack and the nav-target
/// registry are injected per call, so the coordinator itself holds only
/// the cursor: the last token it pushed and the last known sequence
/// index.
#[derive(Debug, Default)]
pub struct HistoryCoordinator {
    current_nav: String,
    nav_idx: u8,
}

impl HistoryCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_token(&self) -> &str {
        &self.current_nav
    }

    pub fn nav_idx(&self) -> u8 {
        self.nav_idx
    }

    /// Push a synthetic entry so the user cannot navigate backward past
    /// the application's initial page. The sequence index is reused
    /// as-is, not incremented.
    pub fn install_safeguard(&mut self, stack: &mut HistoryStack) {
        let token = NavToken::guard(self.nav_idx).encode();
        self.current_nav = token.clone();
        stack.add(token);
    }

    /// Record a user-driven navigation state change. No-op when the new
    /// state is empty. The resulting stack entry echoes back through
    /// `handle_hist_change`, which recognizes and ignores it.
    pub fn record_hist_event(
        &mut self,
        stack: &mut HistoryStack,
        component: &str,
        old_state: &str,
        new_state: &str,
    ) {
        if new_state.is_empty() {
            return;
        }
        self.nav_idx = wrap_idx(i64::from(self.nav_idx) + 1);
        let token = NavToken::event(self.nav_idx, component, old_state, new_state).encode();
        self.current_nav = token.clone();
        stack.add(token);
    }

    /// Respond to a history change notification.
    ///
    /// An empty token means tracked history was exhausted going
    /// backward: replay the current token's OLD state and reinstall the
    /// safeguard. A token equal to the last pushed one is our own echo.
    /// Anything else is user back/forward travel; the wrapped sequence
    /// distance decides the direction, and the incoming token is adopted
    /// as current either way. Undecodable tokens are ignored.
    pub fn handle_hist_change(
        &mut self,
        stack: &mut HistoryStack,
        targets: &mut dyn NavTargets,
        token: &str,
    ) {
        if token.is_empty() {
            if let Ok(current) = NavToken::decode(&self.current_nav) {
                Self::perform_nav(targets, &current.component, &current.prev);
            }
            self.install_safeguard(stack);
            return;
        }

        if token == self.current_nav {
            return;
        }

        let Ok(incoming) = NavToken::decode(token) else {
            return;
        };
        if is_forward_nav(self.nav_idx, incoming.seq) {
            Self::perform_nav(targets, &incoming.component, &incoming.next);
        } else if let Ok(current) = NavToken::decode(&self.current_nav) {
            Self::perform_nav(targets, &current.component, &current.prev);
        }
        self.current_nav = token.to_string();
        self.nav_idx = incoming.seq;
    }

    /// Best-effort replay: unknown components and empty states are
    /// silently skipped.
    pub fn perform_nav(targets: &mut dyn NavTargets, component: &str, state: &str) {
        if component.is_empty() || state.is_empty() {
            return;
        }
        let Some(target) = targets.nav_target_mut(component) else {
            return;
        };
        target.apply_nav_state(state);
    }
}

#[cfg(test)]
mod tests {
    use crate::nav::{NavAdapter, NavTargets};

    use super::super::stack::HistoryStack;
    use super::HistoryCoordinator;

    struct Recorder {
        applied: Vec<String>,
    }

    impl NavAdapter for Recorder {
        fn nav_state(&self) -> String {
            self.applied.last().cloned().unwrap_or_default()
        }

        fn apply_nav_state(&mut self, state: &str) {
            self.applied.push(state.to_string());
        }
    }

    struct SingleTarget {
        id: String,
        recorder: Recorder,
    }

    impl SingleTarget {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                recorder: Recorder {
                    applied: Vec::new(),
                },
            }
        }
    }

    impl NavTargets for SingleTarget {
        fn nav_target_mut(&mut self, id: &str) -> Option<&mut dyn NavAdapter> {
            (id == self.id).then_some(&mut self.recorder as &mut dyn NavAdapter)
        }
    }

    #[test]
    fn record_then_echo_does_not_replay() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);
        let mut targets = SingleTarget::new("main-tabs");

        coordinator.record_hist_event(&mut stack, "main-tabs", "home", "reports");
        for token in stack.drain_changes() {
            coordinator.handle_hist_change(&mut stack, &mut targets, &token);
        }
        assert!(targets.recorder.applied.is_empty());
        assert_eq!(coordinator.nav_idx(), 1);
    }

    #[test]
    fn record_ignores_empty_new_state() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);

        coordinator.record_hist_event(&mut stack, "main-tabs", "home", "");
        assert_eq!(coordinator.nav_idx(), 0);
        assert!(!stack.has_changes());
    }

    #[test]
    fn exhausted_history_replays_old_state_and_reinstalls_safeguard() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);
        let mut targets = SingleTarget::new("main-tabs");

        coordinator.record_hist_event(&mut stack, "main-tabs", "home", "reports");
        stack.drain_changes();

        coordinator.handle_hist_change(&mut stack, &mut targets, "");
        assert_eq!(targets.recorder.applied, vec!["home"]);
        // Index is retained across safeguard reinstall, not incremented.
        assert_eq!(coordinator.nav_idx(), 1);
        assert_eq!(coordinator.current_token(), "1");
        assert_eq!(stack.current(), "1");
    }

    #[test]
    fn forward_travel_applies_the_incoming_new_state() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);
        let mut targets = SingleTarget::new("main-tabs");

        coordinator.record_hist_event(&mut stack, "main-tabs", "home", "reports");
        stack.drain_changes();

        coordinator.handle_hist_change(&mut stack, &mut targets, "2:main-tabs:reports:audit");
        assert_eq!(targets.recorder.applied, vec!["audit"]);
        assert_eq!(coordinator.nav_idx(), 2);
        assert_eq!(coordinator.current_token(), "2:main-tabs:reports:audit");
    }

    #[test]
    fn backward_travel_applies_the_current_old_state() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);
        let mut targets = SingleTarget::new("main-tabs");

        coordinator.record_hist_event(&mut stack, "main-tabs", "home", "reports");
        coordinator.record_hist_event(&mut stack, "main-tabs", "reports", "audit");
        stack.drain_changes();

        coordinator.handle_hist_change(&mut stack, &mut targets, "1:main-tabs:home:reports");
        assert_eq!(targets.recorder.applied, vec!["reports"]);
        assert_eq!(coordinator.nav_idx(), 1);
    }

    #[test]
    fn unknown_component_and_malformed_tokens_are_ignored() {
        let mut coordinator = HistoryCoordinator::new();
        let mut stack = HistoryStack::new(16);
        let mut targets = SingleTarget::new("main-tabs");

        coordinator.record_hist_event(&mut stack, "other-host", "a", "b");
        stack.drain_changes();

        coordinator.handle_hist_change(&mut stack, &mut targets, "2:other-host:b:c");
        assert!(targets.recorder.applied.is_empty());

        coordinator.handle_hist_change(&mut stack, &mut targets, "not-a-token");
        assert_eq!(coordinator.current_token(), "2:other-host:b:c");
    }
}
