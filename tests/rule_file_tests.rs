//! Integration tests for reading and writing the owned section of a
//! custom rules file
//!
//! These tests verify:
//! - A fresh file holds the version header and nothing else for an empty matrix
//! - Lines outside the section survive every write and remove
//! - Writing the same matrix twice produces the same file
//! - Loading normalizes values and skips classes the project no longer has

mod common;

use common::{CLASSES, TestResult, classes};
use nccm::section::{END_MARKER, HEADER, START_MARKER};
use nccm::{
    ClassMatrix, ClearanceValue, LoadOutcome, Position, RemoveOutcome, RuleFile, RuleFileError,
    Severity, Triangle, WriteOutcome,
};
use std::fs;
use tempfile::TempDir;

const HAND_WRITTEN: &str = r#"(version 1)
(rule "via_keepout"
  (constraint hole_clearance (min 0.3mm))
  (condition "A.Type == 'Via'")
)
"#;

fn matrix() -> ClassMatrix {
    assert_ok!(ClassMatrix::new(classes(), Triangle::Upper))
}

fn rule_file(dir: &TempDir) -> RuleFile {
    RuleFile::new(dir.path().join("board.kicad_dru"), Severity::Error)
}

#[test]
fn test_empty_matrix_creates_header_only_file() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);

    let outcome = file.write(&matrix())?;

    assert_eq!(outcome, WriteOutcome::Created);
    assert_eq!(fs::read_to_string(file.path())?, format!("{}\n", HEADER));
    Ok(())
}

#[test]
fn test_write_then_load_restores_values() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);

    let mut written = matrix();
    written.commit_cell(Position::new(2, 3), "5")?;
    written.commit_cell(Position::new(0, 4), "0.127mm")?;
    file.write(&written)?;

    let mut loaded = matrix();
    let outcome = file.load(&mut loaded)?;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            applied: 2,
            dropped: vec![]
        }
    );
    assert_eq!(loaded.values(), written.values());
    assert_eq!(loaded.display(Position::new(2, 3)), "5.0 mm");
    assert_eq!(loaded.display(Position::new(0, 4)), "0.127 mm");
    Ok(())
}

#[test]
fn test_written_statement_text() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);

    let mut m = matrix();
    m.commit_cell(Position::new(2, 3), "5.0 mm")?;
    file.write(&m)?;

    let expected = format!(
        "{}\n{}\n\n(rule \"CLR_BAT-_to_LED\"\n  (severity error)\n  (condition \"A.NetClass == 'BAT-' && B.NetClass == 'LED'\")\n  (constraint clearance (min 5.0mm))\n)\n{}\n",
        HEADER, START_MARKER, END_MARKER
    );
    assert_eq!(fs::read_to_string(file.path())?, expected);
    Ok(())
}

#[test]
fn test_write_is_idempotent() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(file.path(), HAND_WRITTEN)?;

    let mut m = matrix();
    m.commit_cell(Position::new(1, 2), "1.5")?;
    m.commit_cell(Position::new(3, 3), "0.2")?;

    assert_eq!(file.write(&m)?, WriteOutcome::Updated);
    let first = fs::read_to_string(file.path())?;
    file.write(&m)?;
    let second = fs::read_to_string(file.path())?;

    assert_eq!(first, second);
    assert_eq!(first.matches(START_MARKER).count(), 1);
    Ok(())
}

#[test]
fn test_hand_written_rules_survive_write_and_remove() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(file.path(), HAND_WRITTEN)?;

    let mut m = matrix();
    m.commit_cell(Position::new(0, 1), "0.5")?;
    file.write(&m)?;

    let written = fs::read_to_string(file.path())?;
    assert!(written.starts_with(HAND_WRITTEN));
    assert!(written.contains("CLR_Default_to_BAT+"));

    assert_eq!(file.remove(&mut m)?, RemoveOutcome::Removed);
    assert_eq!(fs::read_to_string(file.path())?, HAND_WRITTEN);
    assert!(m.values().is_empty());
    Ok(())
}

#[test]
fn test_lines_after_section_are_kept() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    let content = format!(
        "{}\n{}\n\n(rule \"CLR_LED_to_Signal\"\n  (constraint clearance (min 2mm))\n)\n{}\n(rule \"trailing\")\n",
        HEADER, START_MARKER, END_MARKER
    );
    fs::write(file.path(), &content)?;

    let mut m = matrix();
    file.load(&mut m)?;
    assert_eq!(m.display(Position::new(3, 4)), "2.0 mm");

    m.commit_cell(Position::new(3, 4), "")?;
    file.write(&m)?;

    assert_eq!(
        fs::read_to_string(file.path())?,
        format!("{}\n(rule \"trailing\")\n", HEADER)
    );
    Ok(())
}

#[test]
fn test_missing_header_is_prepended() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(file.path(), "(rule \"only\")")?;

    file.write(&matrix())?;

    assert_eq!(
        fs::read_to_string(file.path())?,
        format!("{}\n(rule \"only\")\n", HEADER)
    );
    Ok(())
}

#[test]
fn test_load_missing_file() -> TestResult {
    let dir = TempDir::new()?;
    let mut m = matrix();

    assert_eq!(rule_file(&dir).load(&mut m)?, LoadOutcome::NoRuleFile);
    assert!(m.values().is_empty());
    Ok(())
}

#[test]
fn test_load_file_without_section() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(file.path(), HAND_WRITTEN)?;

    let mut m = matrix();
    assert_eq!(file.load(&mut m)?, LoadOutcome::NoSection);
    Ok(())
}

#[test]
fn test_load_normalizes_and_mirrors() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    let content = format!(
        "{}\n{}\n(rule \"CLR_Signal_to_Default\"\n  (condition \"A.NetClass == 'Signal' && B.NetClass == 'Default'\")\n  (constraint clearance (min 0.12345678mm))\n)\n{}\n",
        HEADER, START_MARKER, END_MARKER
    );
    fs::write(file.path(), content)?;

    let mut m = matrix();
    file.load(&mut m)?;

    let value = assert_some!(m.values().get(&Position::new(0, 4)));
    assert_eq!(*value, ClearanceValue::from_micros(123_456));
    assert_eq!(m.display(Position::new(4, 0)), "-");
    Ok(())
}

#[test]
fn test_load_reports_dropped_classes() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);

    let mut wide = assert_ok!(ClassMatrix::new(
        vec!["Default".into(), "HV".into(), "LED".into()],
        Triangle::Upper
    ));
    wide.commit_cell(Position::new(0, 1), "3")?;
    wide.commit_cell(Position::new(0, 2), "1")?;
    file.write(&wide)?;

    let mut m = matrix();
    let outcome = file.load(&mut m)?;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            applied: 1,
            dropped: vec![("Default".to_string(), "HV".to_string())]
        }
    );
    assert_eq!(m.values().len(), 1);
    assert!(m.values().contains_key(&Position::new(0, 3)));
    Ok(())
}

#[test]
fn test_unterminated_section_is_an_error_and_file_untouched() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    let content = format!("{}\n{}\n(rule \"CLR_LED_to_LED\"\n", HEADER, START_MARKER);
    fs::write(file.path(), &content)?;

    let mut m = matrix();
    assert!(matches!(
        file.load(&mut m),
        Err(RuleFileError::Section { .. })
    ));

    m.commit_cell(Position::new(3, 3), "1")?;
    assert!(file.write(&m).is_err());
    assert_eq!(fs::read_to_string(file.path())?, content);
    Ok(())
}

#[test]
fn test_remove_without_file_keeps_matrix() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);

    let mut m = matrix();
    m.commit_cell(Position::new(1, 1), "1")?;

    assert_eq!(file.remove(&mut m)?, RemoveOutcome::NothingToRemove);
    assert!(!file.exists());
    assert_eq!(m.values().len(), 1);
    Ok(())
}

#[test]
fn test_remove_without_section_leaves_file_alone() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(file.path(), HAND_WRITTEN)?;

    let mut m = matrix();
    assert_eq!(file.remove(&mut m)?, RemoveOutcome::NoSection);
    assert_eq!(fs::read_to_string(file.path())?, HAND_WRITTEN);
    Ok(())
}

#[test]
fn test_warning_severity_is_written() -> TestResult {
    let dir = TempDir::new()?;
    let file = RuleFile::new(dir.path().join("board.kicad_dru"), Severity::Warning);

    let mut m = matrix();
    m.commit_cell(Position::new(0, 0), "0.2")?;
    let preview = file.preview(&m)?;

    assert!(preview.contains("(severity warning)"));
    assert!(!file.exists(), "preview must not create the file");
    assert_eq!(CLASSES[0], "Default");
    Ok(())
}

#[test]
fn test_later_rule_wins_for_either_class_order() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    let content = format!(
        "{}\n{}\n(rule \"CLR_LED_to_BAT-\"\n  (constraint clearance (min 1mm))\n)\n(rule \"CLR_BAT-_to_LED\"\n  (constraint clearance (min 2mm))\n)\n{}\n",
        HEADER, START_MARKER, END_MARKER
    );
    fs::write(file.path(), content)?;

    let mut m = matrix();
    let outcome = file.load(&mut m)?;

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            applied: 1,
            dropped: vec![]
        }
    );
    let value = assert_some!(m.values().get(&Position::new(2, 3)));
    assert_eq!(*value, ClearanceValue::from_micros(2_000_000));
    Ok(())
}

#[test]
fn test_header_inside_section_is_not_the_file_header() -> TestResult {
    let dir = TempDir::new()?;
    let file = rule_file(&dir);
    fs::write(
        file.path(),
        format!("(rule \"x\")\n{}\n{}\n{}\n", START_MARKER, HEADER, END_MARKER),
    )?;

    file.write(&matrix())?;

    let written = fs::read_to_string(file.path())?;
    assert!(written.lines().any(|line| line == HEADER));
    assert_eq!(written, format!("{}\n(rule \"x\")\n", HEADER));
    Ok(())
}
