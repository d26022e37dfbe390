//! # quest-goal
//!
//! Goal tracking, scoring and persistence for Eternal Quest.
//!
//! A player keeps a list of goals. Recording progress against a goal earns
//! points; every 1000 points is a new level. The whole quest can be written
//! to a small line-oriented save file and read back exactly.
//!
//! ## Key components
//!
//! - [`Goal`] — one objective: Simple (done once), Eternal (never done) or
//!   Checklist (done N times, with a bonus on the last)
//! - [`GoalManager`] — the ordered goal list, score and derived level, with
//!   all-or-nothing save/load
//! - [`codec`] — the save-file format
//! - [`QuestEvent`] / [`EventDispatcher`] — activity history for callers
//! - [`QuestConfig`] — the `.quest/` project layout

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod manager;

pub use codec::Snapshot;
pub use config::QuestConfig;
pub use error::GoalError;
pub use events::{read_events, EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use goal::{EventOutcome, EventStatus, Goal, GoalKind};
pub use manager::{
    level_for, GoalManager, GoalSpec, GoalVariant, RecordResult, POINTS_PER_LEVEL,
};
