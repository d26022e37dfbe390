pub mod goal;
pub mod history;
pub mod info;
pub mod record;
pub mod transfer;

use quest_goal::{EventDispatcher, GoalError, GoalManager, LogSink, QuestConfig, QuestEvent};

/// The project's quest, loaded for one command.
///
/// Commands mutate `manager` and call [`Session::persist`]; events go to the
/// history log unless the config turns it off.
pub struct Session {
    pub config: QuestConfig,
    pub manager: GoalManager,
    dispatcher: EventDispatcher,
}

impl Session {
    /// Load the quest at `config.save_file`, or start an empty one.
    pub fn open(config: QuestConfig) -> anyhow::Result<Self> {
        let manager = read_project_quest(&config)?;
        Ok(Self::with_manager(config, manager))
    }

    /// Like [`Session::open`], but a project save file that can't be read
    /// is set aside in favor of an empty quest. For commands that replace
    /// the whole quest anyway.
    pub fn open_for_replace(config: QuestConfig) -> Self {
        let manager = read_project_quest(&config).unwrap_or_else(|e| {
            tracing::warn!(
                path = %config.save_file.display(),
                "ignoring unreadable project quest: {}",
                e
            );
            GoalManager::new()
        });
        Self::with_manager(config, manager)
    }

    fn with_manager(config: QuestConfig, manager: GoalManager) -> Self {
        let mut dispatcher = EventDispatcher::new();
        if config.record_history {
            dispatcher.add_sink(Box::new(LogSink::new(&config.events_log)));
        }
        Self {
            config,
            manager,
            dispatcher,
        }
    }

    /// Write the quest back to the project's save file.
    pub fn persist(&self) -> anyhow::Result<()> {
        self.manager.save(&self.config.save_file)?;
        Ok(())
    }

    pub fn emit(&self, event: &QuestEvent) {
        self.dispatcher.dispatch(event);
    }
}

fn read_project_quest(config: &QuestConfig) -> Result<GoalManager, GoalError> {
    if config.save_file.exists() {
        GoalManager::from_file(&config.save_file)
    } else {
        tracing::debug!(path = %config.save_file.display(), "no save file yet; starting fresh");
        Ok(GoalManager::new())
    }
}
