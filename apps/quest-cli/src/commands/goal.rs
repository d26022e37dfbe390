// goal.rs — Goal subcommands: add, list.

use clap::{Subcommand, ValueEnum};
use quest_goal::{GoalSpec, GoalVariant, QuestEvent};

use super::Session;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    /// Done once.
    Simple,
    /// Repeated forever.
    Eternal,
    /// Done a set number of times, with a bonus at the end.
    Checklist,
}

impl From<KindArg> for GoalVariant {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Simple => GoalVariant::Simple,
            KindArg::Eternal => GoalVariant::Eternal,
            KindArg::Checklist => GoalVariant::Checklist,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Add {
        /// Kind of goal.
        kind: KindArg,
        /// Short name (e.g., "Marathon").
        #[arg(long)]
        name: String,
        /// Short description.
        #[arg(long, default_value = "")]
        description: String,
        /// Points awarded per recorded event.
        #[arg(long)]
        points: i64,
        /// Times a checklist goal must be recorded.
        #[arg(long)]
        target: Option<u32>,
        /// Bonus awarded when a checklist goal reaches its target.
        #[arg(long)]
        bonus: Option<i64>,
    },
    /// List all goals with their status.
    List {
        /// Print goals as JSON instead of status lines.
        #[arg(long)]
        json: bool,
    },
}

pub fn execute(cmd: &GoalCommands, session: &mut Session) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::Add {
            kind,
            name,
            description,
            points,
            target,
            bonus,
        } => {
            let spec = GoalSpec {
                variant: (*kind).into(),
                name: name.clone(),
                description: description.clone(),
                points: *points,
                target: *target,
                bonus: *bonus,
            };
            add_goal(session, &spec)
        }
        GoalCommands::List { json } => list_goals(session, *json),
    }
}

fn add_goal(session: &mut Session, spec: &GoalSpec) -> anyhow::Result<()> {
    let index = session.manager.create_goal(spec)?;
    session.persist()?;

    if let Some(goal) = session.manager.goal(index) {
        session.emit(&QuestEvent::goal_created(
            goal.name(),
            goal.kind().tag(),
            goal.points(),
        ));
        println!("Goal created: {}. {}", index + 1, goal.describe());
    }
    Ok(())
}

fn list_goals(session: &Session, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session.manager.goals())?);
        return Ok(());
    }

    let lines = session.manager.list_goals();
    if lines.is_empty() {
        println!("No goals created yet.");
        return Ok(());
    }

    for (i, line) in lines.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }
    let (done, total) = session.manager.completion_counts();
    println!("\n{} of {} goal(s) complete.", done, total);
    Ok(())
}
