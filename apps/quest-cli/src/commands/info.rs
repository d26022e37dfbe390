// info.rs — Show the player's score and level.

use quest_goal::{GoalManager, POINTS_PER_LEVEL};

use super::Session;

pub fn execute(session: &Session) -> anyhow::Result<()> {
    for line in render(&session.manager) {
        println!("{}", line);
    }
    Ok(())
}

fn render(manager: &GoalManager) -> Vec<String> {
    let score = manager.current_score();
    let level = manager.current_level();
    let (done, total) = manager.completion_counts();

    let mut lines = vec![
        format!("Score: {}", score),
        format!(
            "Level: {} ({} points to level {})",
            level,
            POINTS_PER_LEVEL - score % POINTS_PER_LEVEL,
            level + 1
        ),
        format!("Goals: {} of {} complete", done, total),
    ];
    for (name, completed, target) in manager.checklist_progress() {
        lines.push(format!("  {} -- {}/{}", name, completed, target));
    }
    lines
}
