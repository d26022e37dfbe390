// events.rs — Quest activity events and notification dispatch.
//
// The manager itself never emits anything. Callers (the CLI) build a
// `QuestEvent` after an operation succeeds and hand it to an
// `EventDispatcher`, which fans it out to notification sinks.
//
// The always-on sink is `LogSink`, an append-only JSONL history file that
// `read_events` can read back.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::goal::EventStatus;
use crate::manager::RecordResult;

/// Events emitted at key points in a quest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was added to the quest.
    GoalCreated {
        name: String,
        kind: String,
        points: i64,
        timestamp: DateTime<Utc>,
    },

    /// Progress was recorded against a goal.
    EventRecorded {
        name: String,
        points: i64,
        score: i64,
        status: EventStatus,
        timestamp: DateTime<Utc>,
    },

    /// The player reached a new level.
    LevelReached {
        level: i64,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// Quest state was written to a save file.
    StateSaved {
        path: String,
        goals: usize,
        timestamp: DateTime<Utc>,
    },

    /// Quest state was replaced from a save file.
    StateLoaded {
        path: String,
        goals: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalCreated { .. } => "goal_created",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::LevelReached { .. } => "level_reached",
            QuestEvent::StateSaved { .. } => "state_saved",
            QuestEvent::StateLoaded { .. } => "state_loaded",
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            QuestEvent::GoalCreated { timestamp, .. }
            | QuestEvent::EventRecorded { timestamp, .. }
            | QuestEvent::LevelReached { timestamp, .. }
            | QuestEvent::StateSaved { timestamp, .. }
            | QuestEvent::StateLoaded { timestamp, .. } => *timestamp,
        }
    }

    /// One-line summary for history listings.
    pub fn summary(&self) -> String {
        match self {
            QuestEvent::GoalCreated { name, kind, points, .. } => {
                format!("created {} '{}' worth {} points", kind, name, points)
            }
            QuestEvent::EventRecorded {
                name,
                points,
                score,
                status,
                ..
            } => match status {
                EventStatus::AlreadyComplete => format!("'{}' was already complete", name),
                _ => format!("recorded '{}' for {} points (score {})", name, points, score),
            },
            QuestEvent::LevelReached { level, score, .. } => {
                format!("reached level {} at {} points", level, score)
            }
            QuestEvent::StateSaved { path, goals, .. } => {
                format!("saved {} goal(s) to {}", goals, path)
            }
            QuestEvent::StateLoaded {
                path, goals, score, ..
            } => format!("loaded {} goal(s) from {} (score {})", goals, path, score),
        }
    }

    /// Helper to create a GoalCreated event.
    pub fn goal_created(name: &str, kind: &str, points: i64) -> Self {
        QuestEvent::GoalCreated {
            name: name.to_string(),
            kind: kind.to_string(),
            points,
            timestamp: Utc::now(),
        }
    }

    /// Events describing one recorded event: always `EventRecorded`, plus
    /// `LevelReached` when the score crossed a level boundary.
    pub fn from_record(result: &RecordResult) -> Vec<Self> {
        let now = Utc::now();
        let mut events = vec![QuestEvent::EventRecorded {
            name: result.outcome.goal_name.clone(),
            points: result.outcome.points,
            score: result.score,
            status: result.outcome.status.clone(),
            timestamp: now,
        }];
        if result.leveled_up {
            events.push(QuestEvent::LevelReached {
                level: result.level,
                score: result.score,
                timestamp: now,
            });
        }
        events
    }

    pub fn state_saved(path: &Path, goals: usize) -> Self {
        QuestEvent::StateSaved {
            path: path.display().to_string(),
            goals,
            timestamp: Utc::now(),
        }
    }

    pub fn state_loaded(path: &Path, goals: usize, score: i64) -> Self {
        QuestEvent::StateLoaded {
            path: path.display().to_string(),
            goals,
            score,
            timestamp: Utc::now(),
        }
    }
}

/// Somewhere quest events end up: the history file, a celebration banner.
pub trait NotificationSink: Send {
    /// Deliver one event. A failure here never undoes the quest change
    /// that produced the event.
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError>;
}

/// Keeps the quest's activity history: one JSON object per line, appended.
/// The parent directory is created on first write.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Read back a JSONL history file written by [`LogSink`].
///
/// A missing file is an empty history. Lines that fail to parse are skipped
/// with a warning so one bad line doesn't hide the rest.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<QuestEvent>, GoalError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|source| GoalError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    let mut events = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<QuestEvent>(line) {
            Ok(event) => events.push(event),
            Err(e) => tracing::warn!(line = i + 1, "skipping unreadable history entry: {}", e),
        }
    }
    Ok(events)
}

/// Fans each quest event out to every registered sink.
///
/// A sink that fails gets a `warn` log line; the remaining sinks still see
/// the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Send `event` to each sink in registration order.
    pub fn dispatch(&self, event: &QuestEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!(event = event.event_type(), "quest event not delivered: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
