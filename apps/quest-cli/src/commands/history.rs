// history.rs — Show recorded quest activity.

use quest_goal::{read_events, QuestConfig};

/// Reads only the history log, so it works even when the save file doesn't.
pub fn execute(config: &QuestConfig, limit: usize) -> anyhow::Result<()> {
    let events = read_events(&config.events_log)?;
    if events.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }

    let skip = events.len().saturating_sub(limit);
    for event in &events[skip..] {
        println!(
            "{}  {}",
            event.timestamp().format("%Y-%m-%d %H:%M:%S"),
            event.summary()
        );
    }
    Ok(())
}
