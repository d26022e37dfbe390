// manager.rs — GoalManager: the player's goals, score and level.
//
// The manager owns an ordered list of goals (insertion order is display
// order) and the running score. Level is never tracked on its own: it is
// always `score / 1000 + 1`.
//
// Loading is all-or-nothing. The save file is decoded into a Snapshot first
// and swapped in only when every line parsed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::GoalError;
use crate::goal::{EventOutcome, Goal, GoalKind};

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: i64 = 1000;

/// The level reached with a given score.
pub fn level_for(score: i64) -> i64 {
    score / POINTS_PER_LEVEL + 1
}

/// Which kind of goal to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalVariant {
    Simple,
    Eternal,
    Checklist,
}

/// Everything needed to create a goal. `target` is required for checklist
/// goals; `bonus` defaults to zero. Neither applies to other kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub variant: GoalVariant,
    pub name: String,
    pub description: String,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<i64>,
}

impl GoalSpec {
    /// Build the goal this spec describes.
    pub fn build(&self) -> Result<Goal, GoalError> {
        match self.variant {
            GoalVariant::Checklist => {
                let target = self.target.ok_or_else(|| {
                    GoalError::Validation("checklist goals need a target".into())
                })?;
                Goal::checklist(
                    &self.name,
                    &self.description,
                    self.points,
                    target,
                    self.bonus.unwrap_or(0),
                )
            }
            GoalVariant::Simple | GoalVariant::Eternal
                if self.target.is_some() || self.bonus.is_some() =>
            {
                Err(GoalError::Validation(
                    "target and bonus only apply to checklist goals".into(),
                ))
            }
            GoalVariant::Simple => Goal::simple(&self.name, &self.description, self.points),
            GoalVariant::Eternal => Goal::eternal(&self.name, &self.description, self.points),
        }
    }
}

/// Result of [`GoalManager::record_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResult {
    pub outcome: EventOutcome,
    /// Score after this event.
    pub score: i64,
    /// Level after this event.
    pub level: i64,
    pub leveled_up: bool,
}

/// Owns a player's goals along with their score and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalManager {
    goals: Vec<Goal>,
    score: i64,
}

impl GoalManager {
    /// An empty manager: no goals, score 0, level 1.
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            score: 0,
        }
    }

    /// Append a goal. Duplicate names are allowed.
    pub fn add_goal(&mut self, goal: Goal) -> usize {
        tracing::debug!(name = goal.name(), kind = goal.kind().tag(), "goal added");
        self.goals.push(goal);
        self.goals.len() - 1
    }

    /// Build a goal from `spec` and append it, returning its index.
    pub fn create_goal(&mut self, spec: &GoalSpec) -> Result<usize, GoalError> {
        let goal = spec.build()?;
        Ok(self.add_goal(goal))
    }

    /// One status line per goal, in insertion order.
    pub fn list_goals(&self) -> Vec<String> {
        self.goals.iter().map(Goal::describe).collect()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Convert a 1-based goal number, as shown to users, into an index.
    pub fn index_from_number(&self, number: i64) -> Result<usize, GoalError> {
        let out_of_range = || GoalError::OutOfRange {
            index: number.saturating_sub(1),
            len: self.goals.len(),
        };
        let index = usize::try_from(number.saturating_sub(1)).map_err(|_| out_of_range())?;
        if index >= self.goals.len() {
            return Err(out_of_range());
        }
        Ok(index)
    }

    /// Record one event against the goal at `index` and update the score.
    ///
    /// Score and level are untouched when `index` is out of range.
    pub fn record_event(&mut self, index: usize) -> Result<RecordResult, GoalError> {
        let len = self.goals.len();
        let goal = self.goals.get_mut(index).ok_or(GoalError::OutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        })?;

        let before = level_for(self.score);
        let outcome = goal.record_event();
        self.score = self.score.saturating_add(outcome.points);
        let level = level_for(self.score);

        tracing::debug!(
            goal = %outcome.goal_name,
            points = outcome.points,
            score = self.score,
            level,
            "event recorded"
        );

        Ok(RecordResult {
            outcome,
            score: self.score,
            level,
            leveled_up: level > before,
        })
    }

    pub fn current_score(&self) -> i64 {
        self.score
    }

    pub fn current_level(&self) -> i64 {
        level_for(self.score)
    }

    /// Goals that are finished, and goals in total. Eternal goals count
    /// toward the total but can never be finished.
    pub fn completion_counts(&self) -> (usize, usize) {
        let done = self.goals.iter().filter(|g| g.is_complete()).count();
        (done, self.goals.len())
    }

    /// Checklist goals still in progress, as `(name, completed, target)`.
    pub fn checklist_progress(&self) -> Vec<(&str, u32, u32)> {
        self.goals
            .iter()
            .filter_map(|g| match *g.kind() {
                GoalKind::Checklist {
                    target, completed, ..
                } if completed < target => Some((g.name(), completed, target)),
                _ => None,
            })
            .collect()
    }

    /// Encode the full state in save-file format.
    pub fn to_document(&self) -> String {
        codec::encode_document(self.score, self.current_level(), &self.goals)
    }

    /// Write score, level and every goal to `path` (creates or overwrites).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(path, self.to_document()).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), goals = self.goals.len(), "quest saved");
        Ok(())
    }

    /// Replace this manager's state with the contents of `path`.
    ///
    /// On any error the current goals and score are left exactly as they were.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let loaded = Self::from_file(path)?;
        *self = loaded;
        Ok(())
    }

    /// Read a manager from a save file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GoalError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GoalError::NotFound {
                path: path.display().to_string(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let manager = Self::from_document(&text)?;
        tracing::debug!(path = %path.display(), goals = manager.len(), "quest loaded");
        Ok(manager)
    }

    /// Decode a manager from save-file text.
    pub fn from_document(text: &str) -> Result<Self, GoalError> {
        let snapshot = codec::decode_document(text)?;
        let level = level_for(snapshot.score);
        if snapshot.stored_level != level {
            tracing::debug!(
                stored = snapshot.stored_level,
                recomputed = level,
                "stored level disagrees with score; using recomputed level"
            );
        }
        Ok(Self {
            goals: snapshot.goals,
            score: snapshot.score,
        })
    }
}

impl Default for GoalManager {
    fn default() -> Self {
        Self::new()
    }
}
