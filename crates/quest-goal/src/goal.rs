// goal.rs — Goal: one trackable objective with a point value.
//
// Every goal carries a name, a description and a point value. What happens
// when progress is recorded depends on its kind:
//   Simple    — completes on the first event, then awards nothing
//   Eternal   — awards points on every event, never completes
//   Checklist — awards points per event up to a target; the event that
//               reaches the target also awards a one-time bonus
//
// Recording never prints. The result comes back as an `EventOutcome` and the
// caller decides how to show it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Kind-specific state of a goal.
///
/// `#[serde(tag = "kind")]` makes this serialize as `{"kind": "checklist", ...}`
/// when goals are listed as JSON. The save-file format lives in [`crate::codec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    /// Done once, then finished for good.
    Simple { complete: bool },

    /// Repeated forever; never finished.
    Eternal,

    /// Done `target` times, with `bonus` paid on the last one.
    Checklist {
        target: u32,
        bonus: i64,
        completed: u32,
    },
}

impl GoalKind {
    /// The variant tag used in save files.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple { .. } => "SimpleGoal",
            GoalKind::Eternal => "EternalGoal",
            GoalKind::Checklist { .. } => "ChecklistGoal",
        }
    }
}

/// What a single recorded event did to a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventStatus {
    /// This event finished the goal (Simple, or the last Checklist step).
    Completed,

    /// A Checklist step short of the target.
    Progress { completed: u32, target: u32 },

    /// An Eternal goal was recorded.
    Recorded,

    /// The goal was already finished; nothing was awarded.
    AlreadyComplete,
}

/// Structured result of [`Goal::record_event`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventOutcome {
    pub goal_name: String,

    /// Total points earned by this event, bonus included.
    pub points: i64,

    /// The part of `points` that came from a checklist bonus.
    pub bonus: i64,

    pub status: EventStatus,
}

impl EventOutcome {
    /// A one-line, human-readable summary of the outcome.
    pub fn message(&self) -> String {
        match &self.status {
            EventStatus::Completed if self.bonus != 0 => format!(
                "Completed '{}': earned {} points plus a {} point bonus!",
                self.goal_name,
                self.points - self.bonus,
                self.bonus
            ),
            EventStatus::Completed => format!(
                "Completed '{}' and earned {} points!",
                self.goal_name, self.points
            ),
            EventStatus::Progress { completed, target } => format!(
                "Progress on '{}' ({}/{}): earned {} points.",
                self.goal_name, completed, target, self.points
            ),
            EventStatus::Recorded => format!(
                "Recorded '{}' and earned {} points.",
                self.goal_name, self.points
            ),
            EventStatus::AlreadyComplete => {
                format!("'{}' is already complete.", self.goal_name)
            }
        }
    }
}

/// A trackable goal.
///
/// Deserializing goes through [`Goal::new`], so JSON can't smuggle in a goal
/// the save format couldn't hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawGoal")]
pub struct Goal {
    name: String,
    description: String,
    points: i64,
    #[serde(flatten)]
    kind: GoalKind,
}

/// Unchecked wire shape of a [`Goal`].
#[derive(Deserialize)]
struct RawGoal {
    name: String,
    description: String,
    points: i64,
    #[serde(flatten)]
    kind: GoalKind,
}

impl TryFrom<RawGoal> for Goal {
    type Error = GoalError;

    fn try_from(raw: RawGoal) -> Result<Self, Self::Error> {
        Goal::new(raw.name, raw.description, raw.points, raw.kind)
    }
}

impl Goal {
    /// Build a goal from explicit state, validating every field.
    ///
    /// This is the single entry point for both fresh goals and goals restored
    /// from a save file, so anything the manager holds can be written back.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        kind: GoalKind,
    ) -> Result<Self, GoalError> {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(GoalError::Validation("name must not be empty".into()));
        }
        check_text("name", &name)?;
        check_text("description", &description)?;
        if points < 0 {
            return Err(GoalError::Validation(format!(
                "point value must not be negative (got {})",
                points
            )));
        }
        if let GoalKind::Checklist {
            target,
            bonus,
            completed,
        } = kind
        {
            if target == 0 {
                return Err(GoalError::Validation(
                    "checklist target must be at least 1".into(),
                ));
            }
            if bonus < 0 {
                return Err(GoalError::Validation(format!(
                    "bonus must not be negative (got {})",
                    bonus
                )));
            }
            if completed > target {
                return Err(GoalError::Validation(format!(
                    "completed count {} exceeds target {}",
                    completed, target
                )));
            }
        }

        Ok(Self {
            name,
            description,
            points,
            kind,
        })
    }

    pub fn simple(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Self::new(name, description, points, GoalKind::Simple { complete: false })
    }

    pub fn eternal(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Self::new(name, description, points, GoalKind::Eternal)
    }

    pub fn checklist(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target: u32,
        bonus: i64,
    ) -> Result<Self, GoalError> {
        Self::new(
            name,
            description,
            points,
            GoalKind::Checklist {
                target,
                bonus,
                completed: 0,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    /// Record one instance of progress and return what it earned.
    ///
    /// Recording against a finished goal is not an error: it earns zero
    /// points and reports [`EventStatus::AlreadyComplete`].
    pub fn record_event(&mut self) -> EventOutcome {
        let (points, bonus, status) = match &mut self.kind {
            GoalKind::Simple { complete } if *complete => (0, 0, EventStatus::AlreadyComplete),
            GoalKind::Simple { complete } => {
                *complete = true;
                (self.points, 0, EventStatus::Completed)
            }
            GoalKind::Eternal => (self.points, 0, EventStatus::Recorded),
            GoalKind::Checklist {
                target, completed, ..
            } if *completed >= *target => (0, 0, EventStatus::AlreadyComplete),
            GoalKind::Checklist {
                target,
                bonus,
                completed,
            } => {
                *completed += 1;
                if *completed == *target {
                    (self.points.saturating_add(*bonus), *bonus, EventStatus::Completed)
                } else {
                    (
                        self.points,
                        0,
                        EventStatus::Progress {
                            completed: *completed,
                            target: *target,
                        },
                    )
                }
            }
        };

        EventOutcome {
            goal_name: self.name.clone(),
            points,
            bonus,
            status,
        }
    }

    /// Whether the goal is finished. Eternal goals never are.
    pub fn is_complete(&self) -> bool {
        match self.kind {
            GoalKind::Simple { complete } => complete,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                target, completed, ..
            } => completed >= target,
        }
    }

    /// Status line for listings, e.g. `[X] Run (run a marathon)`.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Encode this goal as one save-file record.
    pub fn to_record(&self) -> String {
        crate::codec::encode_goal(self)
    }

    /// Decode a save-file record produced by [`Goal::to_record`].
    pub fn from_record(record: &str) -> Result<Self, GoalError> {
        crate::codec::decode_goal(record, 1)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_complete() { "X" } else { " " };
        write!(f, "[{}] {} ({})", marker, self.name, self.description)?;
        if let GoalKind::Checklist {
            target, completed, ..
        } = self.kind
        {
            write!(f, " -- Currently completed: {}/{}", completed, target)?;
        }
        Ok(())
    }
}

// Commas split fields and newlines split records in the save format.
fn check_text(field: &str, value: &str) -> Result<(), GoalError> {
    if value.contains([',', '\n', '\r']) {
        return Err(GoalError::Validation(format!(
            "{} must not contain commas or line breaks: {:?}",
            field, value
        )));
    }
    Ok(())
}
