// transfer.rs — Save the quest to, or load it from, an explicit file.

use std::path::Path;

use quest_goal::QuestEvent;

use super::Session;

/// Write the current quest to `path`.
pub fn save(session: &Session, path: &Path) -> anyhow::Result<()> {
    session.manager.save(path)?;
    session.emit(&QuestEvent::state_saved(path, session.manager.len()));
    println!(
        "Saved {} goal(s) to {}",
        session.manager.len(),
        path.display()
    );
    Ok(())
}

/// Replace the current quest with the contents of `path` and make it the
/// project's quest. A bad file leaves the project's quest untouched.
pub fn load(session: &mut Session, path: &Path) -> anyhow::Result<()> {
    session.manager.load(path)?;
    session.persist()?;
    session.emit(&QuestEvent::state_loaded(
        path,
        session.manager.len(),
        session.manager.current_score(),
    ));
    println!(
        "Loaded {} goal(s) from {} (score {}, level {})",
        session.manager.len(),
        path.display(),
        session.manager.current_score(),
        session.manager.current_level()
    );
    Ok(())
}
