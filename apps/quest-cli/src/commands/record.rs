// record.rs — Record progress against a goal.

use quest_goal::{EventStatus, QuestEvent, RecordResult};

use super::Session;

/// Record one event against the 1-based goal `number`.
pub fn execute(session: &mut Session, number: i64) -> anyhow::Result<()> {
    let result = record(session, number)?;

    println!("{}", result.outcome.message());
    println!("Your total score is now: {}", result.score);
    if result.leveled_up {
        println!("Congratulations! You have reached level {}!", result.level);
    }
    Ok(())
}

fn record(session: &mut Session, number: i64) -> anyhow::Result<RecordResult> {
    let index = session.manager.index_from_number(number)?;
    let result = session.manager.record_event(index)?;

    // Nothing changed, so there is nothing to save.
    if result.outcome.status != EventStatus::AlreadyComplete {
        session.persist()?;
    }
    for event in QuestEvent::from_record(&result) {
        session.emit(&event);
    }
    Ok(result)
}
