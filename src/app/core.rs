use crate::config::Config;
use crate::error::AppResult;
use crate::extension::ExtensionHost;
use crate::history::{HistoryCoordinator, HistoryStack};
use crate::nav::Workspace;
use crate::prompt::PromptManager;
use crate::ui::HitMap;

use super::state::AppState;

pub struct HistorySubsystem {
    pub coordinator: HistoryCoordinator,
    pub stack: HistoryStack,
}

#[derive(Default)]
pub struct InteractionSubsystem {
    pub extensions: ExtensionHost,
    pub prompt: PromptManager,
}

pub struct App {
    pub state: AppState,
    pub workspace: Workspace,
    pub history: HistorySubsystem,
    pub interaction: InteractionSubsystem,
    /// Hit regions from the last rendered frame.
    pub hits: HitMap,
    pub config: Config,
}

impl App {
    pub fn new() -> AppResult<Self> {
        let config = Config::load()?;
        Ok(Self::new_with_config(config))
    }

    pub fn new_with_config(config: Config) -> Self {
        let workspace = Workspace::from_config(&config.workspace);
        let mut history = HistorySubsystem {
            coordinator: HistoryCoordinator::new(),
            stack: HistoryStack::new(config.history.max_entries),
        };
        history.coordinator.install_safeguard(&mut history.stack);

        Self {
            state: AppState::default(),
            workspace,
            history,
            interaction: InteractionSubsystem::default(),
            hits: HitMap::default(),
            config,
        }
    }
}
