// quest_flow.rs — End-to-end test of a quest from creation to reload.
//
// Flow:
//   1. Create one goal of each kind in a fresh project
//   2. Record events and watch score, level and completion
//   3. Save, then load into a fresh manager and compare behavior
//   4. A corrupt save file fails to load and changes nothing
//
// The CLI is a thin caller, so this drives the same library calls it makes.

use std::fs;

use quest_goal::{
    read_events, EventDispatcher, EventStatus, GoalError, GoalManager, GoalSpec, GoalVariant,
    LogSink, QuestConfig, QuestEvent,
};
use tempfile::TempDir;

fn spec(variant: GoalVariant, name: &str, points: i64) -> GoalSpec {
    GoalSpec {
        variant,
        name: name.to_string(),
        description: format!("{} description", name),
        points,
        target: None,
        bonus: None,
    }
}

#[test]
fn quest_flow_create_record_save_load() {
    let project = TempDir::new().unwrap();
    let config = QuestConfig::load(project.path()).unwrap();

    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_sink(Box::new(LogSink::new(&config.events_log)));

    // =========================================================
    // 1. Create goals
    // =========================================================

    let mut manager = GoalManager::new();
    let marathon = manager
        .create_goal(&spec(GoalVariant::Simple, "Marathon", 1000))
        .unwrap();
    let scriptures = manager
        .create_goal(&spec(GoalVariant::Eternal, "Scriptures", 100))
        .unwrap();
    let temple = manager
        .create_goal(&GoalSpec {
            target: Some(3),
            bonus: Some(500),
            ..spec(GoalVariant::Checklist, "Temple", 50)
        })
        .unwrap();
    for goal in manager.goals() {
        dispatcher.dispatch(&QuestEvent::goal_created(
            goal.name(),
            goal.kind().tag(),
            goal.points(),
        ));
    }
    assert_eq!(manager.len(), 3);

    // =========================================================
    // 2. Record events
    // =========================================================

    let mut results = Vec::new();
    for index in [scriptures, temple, temple, temple, marathon, marathon] {
        let result = manager.record_event(index).unwrap();
        assert_eq!(result.level, result.score / 1000 + 1);
        for event in QuestEvent::from_record(&result) {
            dispatcher.dispatch(&event);
        }
        results.push(result);
    }

    let points: Vec<i64> = results.iter().map(|r| r.outcome.points).collect();
    assert_eq!(points, vec![100, 50, 50, 550, 1000, 0]);
    assert_eq!(results[5].outcome.status, EventStatus::AlreadyComplete);
    assert_eq!(manager.current_score(), 1750);
    assert_eq!(manager.current_level(), 2);
    assert!(results[4].leveled_up);
    assert_eq!(manager.completion_counts(), (2, 3));

    // =========================================================
    // 3. Save and reload
    // =========================================================

    manager.save(&config.save_file).unwrap();
    dispatcher.dispatch(&QuestEvent::state_saved(&config.save_file, manager.len()));

    let saved = fs::read_to_string(&config.save_file).unwrap();
    assert_eq!(
        saved,
        "1750\n2\n\
         SimpleGoal:Marathon,Marathon description,1000,True\n\
         EternalGoal:Scriptures,Scriptures description,100\n\
         ChecklistGoal:Temple,Temple description,50,500,3,3\n"
    );

    let mut reloaded = GoalManager::new();
    reloaded.load(&config.save_file).unwrap();
    assert_eq!(reloaded, manager);
    for index in 0..3 {
        assert_eq!(
            reloaded.record_event(index).unwrap(),
            manager.record_event(index).unwrap()
        );
    }

    // =========================================================
    // 4. Corrupt save file
    // =========================================================

    let corrupt = project.path().join("corrupt.txt");
    fs::write(
        &corrupt,
        "10\n1\nEternalGoal:Walk,daily,10\nSimpleGoal:Swim,laps,not-a-number,False\n",
    )
    .unwrap();
    let before = reloaded.clone();
    assert!(matches!(
        reloaded.load(&corrupt),
        Err(GoalError::Parse { line: 4, .. })
    ));
    assert_eq!(reloaded, before);

    // History captured every step.
    let history = read_events(&config.events_log).unwrap();
    let created = history
        .iter()
        .filter(|e| e.event_type() == "goal_created")
        .count();
    let leveled = history
        .iter()
        .filter(|e| e.event_type() == "level_reached")
        .count();
    assert_eq!(created, 3);
    assert_eq!(leveled, 1);
    assert_eq!(history.last().unwrap().event_type(), "state_saved");
}
