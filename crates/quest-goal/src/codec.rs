// codec.rs — Save-file format for quest state.
//
// A save file is line oriented:
//
//   <score>
//   <level>
//   SimpleGoal:<name>,<description>,<points>,<True|False>
//   EternalGoal:<name>,<description>,<points>
//   ChecklistGoal:<name>,<description>,<points>,<bonus>,<target>,<completed>
//
// The first `:` separates the variant tag from the payload; `,` separates
// payload fields. Decoding restores counters directly from the fields and
// never goes through `Goal::record_event`.
//
// Decoding a whole document produces a `Snapshot` and touches nothing else,
// so a caller can swap it in only once every line has parsed.

use std::str::FromStr;

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind};

/// Fully parsed contents of a save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub score: i64,
    /// Level as written in the file. Informational only; the manager
    /// always recomputes level from score.
    pub stored_level: i64,
    pub goals: Vec<Goal>,
}

/// Encode one goal as a record line (without the trailing newline).
pub fn encode_goal(goal: &Goal) -> String {
    let head = format!(
        "{}:{},{},{}",
        goal.kind().tag(),
        goal.name(),
        goal.description(),
        goal.points()
    );
    match goal.kind() {
        GoalKind::Simple { complete } => {
            format!("{},{}", head, if *complete { "True" } else { "False" })
        }
        GoalKind::Eternal => head,
        GoalKind::Checklist {
            target,
            bonus,
            completed,
        } => format!("{},{},{},{}", head, bonus, target, completed),
    }
}

/// Decode one record line. `line` is the 1-based line number used in errors.
pub fn decode_goal(record: &str, line: usize) -> Result<Goal, GoalError> {
    let (tag, payload) = record
        .split_once(':')
        .ok_or_else(|| GoalError::parse(line, "missing ':' after variant tag"))?;
    let fields: Vec<&str> = payload.split(',').collect();

    let expected = match tag {
        "SimpleGoal" => 4,
        "EternalGoal" => 3,
        "ChecklistGoal" => 6,
        other => {
            return Err(GoalError::parse(
                line,
                format!("unknown variant tag {:?}", other),
            ))
        }
    };
    if fields.len() != expected {
        return Err(GoalError::parse(
            line,
            format!(
                "{} expects {} fields, found {}",
                tag,
                expected,
                fields.len()
            ),
        ));
    }

    let name = fields[0];
    let description = fields[1];
    let points: i64 = parse_number(fields[2], "point value", line)?;

    let kind = match tag {
        "SimpleGoal" => GoalKind::Simple {
            complete: parse_bool(fields[3], line)?,
        },
        "EternalGoal" => GoalKind::Eternal,
        _ => GoalKind::Checklist {
            bonus: parse_number(fields[3], "bonus", line)?,
            target: parse_number(fields[4], "target", line)?,
            completed: parse_number(fields[5], "completed count", line)?,
        },
    };

    Goal::new(name, description, points, kind).map_err(|e| match e {
        GoalError::Validation(reason) => GoalError::parse(line, reason),
        other => other,
    })
}

/// Encode full quest state: score, level, then one line per goal.
pub fn encode_document(score: i64, level: i64, goals: &[Goal]) -> String {
    let mut out = format!("{}\n{}\n", score, level);
    for goal in goals {
        out.push_str(&encode_goal(goal));
        out.push('\n');
    }
    out
}

/// Decode full quest state. Fails on the first malformed line.
pub fn decode_document(text: &str) -> Result<Snapshot, GoalError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let score_line = lines
        .first()
        .ok_or_else(|| GoalError::parse(1, "missing score"))?;
    let score: i64 = parse_number(score_line, "score", 1)?;
    if score < 0 {
        return Err(GoalError::parse(
            1,
            format!("score must not be negative (got {})", score),
        ));
    }

    let level_line = lines
        .get(1)
        .ok_or_else(|| GoalError::parse(2, "missing level"))?;
    let stored_level: i64 = parse_number(level_line, "level", 2)?;

    let goals = lines
        .iter()
        .enumerate()
        .skip(2)
        .map(|(i, record)| decode_goal(record, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Snapshot {
        score,
        stored_level,
        goals,
    })
}

fn parse_number<T: FromStr>(field: &str, what: &str, line: usize) -> Result<T, GoalError> {
    field.trim().parse().map_err(|_| {
        GoalError::parse(
            line,
            format!("{} is not a valid number: {:?}", what, field),
        )
    })
}

fn parse_bool(field: &str, line: usize) -> Result<bool, GoalError> {
    match field.trim() {
        f if f.eq_ignore_ascii_case("true") => Ok(true),
        f if f.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(GoalError::parse(
            line,
            format!("expected True or False, found {:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_variant() {
        let mut simple = Goal::simple("Marathon", "run one", 1000).unwrap();
        assert_eq!(encode_goal(&simple), "SimpleGoal:Marathon,run one,1000,False");
        simple.record_event();
        assert_eq!(encode_goal(&simple), "SimpleGoal:Marathon,run one,1000,True");

        let eternal = Goal::eternal("Scriptures", "read daily", 100).unwrap();
        assert_eq!(encode_goal(&eternal), "EternalGoal:Scriptures,read daily,100");

        let mut checklist = Goal::checklist("Temple", "attend", 50, 10, 500).unwrap();
        checklist.record_event();
        assert_eq!(
            encode_goal(&checklist),
            "ChecklistGoal:Temple,attend,50,500,10,1"
        );
    }

    #[test]
    fn decoded_goal_behaves_like_the_original() {
        let mut original = Goal::checklist("Temple", "attend", 50, 3, 500).unwrap();
        original.record_event();
        original.record_event();

        let mut restored = Goal::from_record(&original.to_record()).unwrap();
        assert_eq!(restored, original);

        let a: Vec<i64> = (0..3).map(|_| original.record_event().points).collect();
        let b: Vec<i64> = (0..3).map(|_| restored.record_event().points).collect();
        assert_eq!(a, vec![550, 0, 0]);
        assert_eq!(a, b);
    }

    #[test]
    fn completed_simple_goal_stays_complete_after_decode() {
        let mut goal = Goal::simple("Marathon", "run one", 1000).unwrap();
        goal.record_event();
        let mut restored = Goal::from_record(&goal.to_record()).unwrap();
        assert!(restored.is_complete());
        assert_eq!(restored.record_event().points, 0);
    }

    #[test]
    fn colon_in_description_survives() {
        let goal = Goal::eternal("Pray", "morning: and night", 5).unwrap();
        let restored = Goal::from_record(&goal.to_record()).unwrap();
        assert_eq!(restored.description(), "morning: and night");
    }

    #[test]
    fn accepts_lowercase_booleans() {
        let goal = decode_goal("SimpleGoal:Run,5k,10,true", 3).unwrap();
        assert!(goal.is_complete());
    }

    #[test]
    fn rejects_malformed_records_with_line_numbers() {
        let cases = [
            "NoColonHere",
            "BogusGoal:Run,5k,10",
            "SimpleGoal:Run,5k,10",
            "EternalGoal:Run,5k,ten",
            "SimpleGoal:Run,5k,10,maybe",
            "ChecklistGoal:Run,5k,10,50,3,4",
            "ChecklistGoal:Run,5k,10,50,-3,0",
            "EternalGoal:,5k,10",
        ];
        for record in cases {
            match decode_goal(record, 7) {
                Err(GoalError::Parse { line, .. }) => assert_eq!(line, 7, "{}", record),
                other => panic!("expected parse error for {:?}, got {:?}", record, other),
            }
        }
    }

    #[test]
    fn document_round_trip() {
        let goals = vec![
            Goal::simple("Marathon", "run one", 1000).unwrap(),
            Goal::eternal("Scriptures", "read daily", 100).unwrap(),
        ];
        let text = encode_document(1100, 2, &goals);
        assert_eq!(
            text,
            "1100\n2\nSimpleGoal:Marathon,run one,1000,False\nEternalGoal:Scriptures,read daily,100\n"
        );

        let snapshot = decode_document(&text).unwrap();
        assert_eq!(snapshot.score, 1100);
        assert_eq!(snapshot.stored_level, 2);
        assert_eq!(snapshot.goals, goals);
    }

    #[test]
    fn document_errors() {
        assert!(matches!(
            decode_document(""),
            Err(GoalError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            decode_document("10\n"),
            Err(GoalError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            decode_document("-5\n1\n"),
            Err(GoalError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            decode_document("0\n1\nEternalGoal:A,b,1\nWeirdGoal:A,b,1\n"),
            Err(GoalError::Parse { line: 4, .. })
        ));
        assert!(matches!(
            decode_document("0\n1\n\nEternalGoal:A,b,1\n"),
            Err(GoalError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn ignores_trailing_blank_lines_and_crlf() {
        let snapshot = decode_document("10\r\n1\r\nEternalGoal:A,b,10\r\n\r\n\n").unwrap();
        assert_eq!(snapshot.goals.len(), 1);
        assert_eq!(snapshot.goals[0].points(), 10);
    }
}
