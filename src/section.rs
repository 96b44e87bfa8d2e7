#![forbid(unsafe_code)]

//! The owned rule section of a custom rules file
//!
//! nccm owns exactly the lines between [`START_MARKER`] and [`END_MARKER`].
//! This module finds that block (extract), drops it (excise), reads the
//! clearance rules inside it, and renders a matrix back into rule text.
//!
//! Only the statement shape nccm writes is understood:
//!
//! ```text
//! (rule "CLR_<A>_to_<B>"
//!   (severity error)
//!   (condition "A.NetClass == '<A>' && B.NetClass == '<B>'")
//!   (constraint clearance (min <value>mm))
//! )
//! ```

use crate::clearance::ClearanceValue;
use crate::error::SectionError;
use crate::types::{Position, Severity};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Version declaration every custom rules file starts with
pub const HEADER: &str = "(version 1)";

/// First line of the owned section
pub const START_MARKER: &str = "### 4E43434D NCCM SECTION START ###";

/// Last line of the owned section
pub const END_MARKER: &str = "### 4E43434D NCCM SECTION END ###";

const RULE_NAME_PREFIX: &str = "rule \"CLR_";
const CLASS_SEPARATOR: &str = "_to_";
const CLEARANCE_PREFIX: &str = "(constraint clearance (min ";

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"A\.NetClass\s*==\s*'([^']*)'\s*&&\s*B\.NetClass\s*==\s*'([^']*)'")
        .expect("condition pattern is valid")
});

/// Net class names of one rule: the `A` class, then the `B` class
pub type ClassPair = (String, String);

/// Class pair and clearance text of each rule, in file order
pub type ParsedSection = Vec<(ClassPair, String)>;

/// What a scan keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keep the lines inside the section
    Extract,
    /// Keep the lines outside the section
    Excise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside { start_line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

fn marker(line: &str) -> Option<Marker> {
    match line.trim_end() {
        START_MARKER => Some(Marker::Start),
        END_MARKER => Some(Marker::End),
        _ => None,
    }
}

/// Splits file content into lines, keeping each line's terminator
///
/// Joining the result gives back the exact input.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Runs the section state machine over `lines`
///
/// Marker lines are never part of the output. Several complete sections in
/// a row are accepted and treated as one.
///
/// # Errors
///
/// Returns `SectionError` for a start marker inside an open section, an end
/// marker with no open section, or a section that is still open at the end
/// of the input.
pub fn scan<'a>(lines: &[&'a str], mode: Mode) -> Result<Vec<&'a str>, SectionError> {
    let mut state = State::Outside;
    let mut sections = 0usize;
    let mut kept = Vec::new();

    for (index, &line) in lines.iter().enumerate() {
        let line_no = index + 1;
        match (state, marker(line)) {
            (State::Outside, Some(Marker::Start)) => {
                state = State::Inside {
                    start_line: line_no,
                };
                sections += 1;
            }
            (State::Inside { .. }, Some(Marker::Start)) => {
                return Err(SectionError::NestedStart { line: line_no });
            }
            (State::Inside { .. }, Some(Marker::End)) => state = State::Outside,
            (State::Outside, Some(Marker::End)) => {
                return Err(SectionError::UnmatchedEnd { line: line_no });
            }
            (State::Inside { .. }, None) => {
                if mode == Mode::Extract {
                    kept.push(line);
                }
            }
            (State::Outside, None) => {
                if mode == Mode::Excise {
                    kept.push(line);
                }
            }
        }
    }

    if let State::Inside { start_line } = state {
        return Err(SectionError::Unterminated { start_line });
    }

    if sections > 1 {
        log::warn!("found {} owned sections, treating them as one", sections);
    }

    Ok(kept)
}

/// Lines inside the owned section
pub fn extract<'a>(lines: &[&'a str]) -> Result<Vec<&'a str>, SectionError> {
    scan(lines, Mode::Extract)
}

/// Lines outside the owned section
pub fn excise<'a>(lines: &[&'a str]) -> Result<Vec<&'a str>, SectionError> {
    scan(lines, Mode::Excise)
}

/// Rule being assembled while parsing
#[derive(Debug, Default)]
struct Pending {
    name_seen: bool,
    from_name: Option<ClassPair>,
    from_condition: Option<ClassPair>,
}

/// Reads the class pairs and clearance text out of section lines
///
/// A pair is committed when a rule-name line is followed by a constraint
/// line. Class names come from the condition line when there is one, since
/// it is unambiguous; otherwise the rule name is split at the first `_to_`.
/// A constraint line with no rule name before it is dropped. Rules are
/// returned in the order they appear; duplicates are kept.
pub fn parse_section<S: AsRef<str>>(lines: &[S]) -> ParsedSection {
    let mut parsed = ParsedSection::new();
    let mut pending = Pending::default();

    for line in lines {
        let line = line.as_ref();

        if let Some(start) = line.find(RULE_NAME_PREFIX) {
            if pending.name_seen {
                log::warn!("rule without a clearance constraint ignored before: {}", line.trim());
            }
            let rest = &line[start + RULE_NAME_PREFIX.len()..];
            let name = rest.split('"').next().unwrap_or(rest).trim();
            pending = Pending {
                name_seen: true,
                from_name: name
                    .split_once(CLASS_SEPARATOR)
                    .map(|(a, b)| (a.to_string(), b.to_string())),
                from_condition: None,
            };
        }

        if pending.name_seen
            && let Some(caps) = CONDITION.captures(line)
        {
            pending.from_condition = Some((caps[1].to_string(), caps[2].to_string()));
        }

        if let Some(start) = line.find(CLEARANCE_PREFIX) {
            let clearance = line[start + CLEARANCE_PREFIX.len()..]
                .trim_end()
                .trim_end_matches(')')
                .trim()
                .to_string();

            if !pending.name_seen {
                log::warn!("clearance constraint without a rule name dropped: {}", line.trim());
                continue;
            }

            let pending = std::mem::take(&mut pending);
            match pending.from_condition.or(pending.from_name) {
                Some(pair) => {
                    log::debug!("parsed rule {} to {}: {}", pair.0, pair.1, clearance);
                    parsed.push((pair, clearance));
                }
                None => log::warn!("rule without recognizable class names dropped"),
            }
        }
    }

    parsed
}

/// Renders one rule statement, preceded by an empty line
pub fn render_statement(a: &str, b: &str, value: ClearanceValue, severity: Severity) -> String {
    format!(
        "\n(rule \"CLR_{a}_to_{b}\"\n  (severity {severity})\n  (condition \"A.NetClass == '{a}' && B.NetClass == '{b}'\")\n  (constraint clearance (min {}))\n)\n",
        value.to_rule_text()
    )
}

/// Renders one statement per value, in row-major position order
///
/// The row class of a position is the rule's `A` class and the column
/// class is its `B` class.
pub fn render<'a, F>(
    values: &BTreeMap<Position, ClearanceValue>,
    class_name_of: F,
    severity: Severity,
) -> Vec<String>
where
    F: Fn(usize) -> &'a str,
{
    values
        .iter()
        .map(|(pos, &value)| {
            render_statement(class_name_of(pos.row), class_name_of(pos.col), value, severity)
        })
        .collect()
}

/// Wraps rendered statements in the section markers
pub fn render_section(statements: &[String]) -> String {
    let mut section = String::new();
    section.push_str(START_MARKER);
    section.push('\n');
    for statement in statements {
        section.push_str(statement);
    }
    section.push_str(END_MARKER);
    section.push('\n');
    section
}
