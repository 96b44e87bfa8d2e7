#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. One cell record per stored clearance (row-major)
//! 2. One summary record

use crate::clearance::ClearanceValue;
use crate::matrix::ClassMatrix;
use serde::Serialize;
use std::path::Path;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the matrix values as JSONL
    pub fn format(&self, matrix: &ClassMatrix, rule_file: &Path) -> String {
        let mut output = String::new();

        for (pos, &clearance_mm) in matrix.values() {
            let Some((a, b)) = matrix.class_pair(*pos) else {
                continue;
            };
            let record = CellRecord {
                record_type: "cell",
                a,
                b,
                row: pos.row,
                col: pos.col,
                clearance_mm,
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        let summary = SummaryRecord {
            record_type: "summary",
            classes: matrix.size(),
            editable_cells: matrix.valid_positions().len(),
            rules: matrix.values().len(),
            rule_file: rule_file.display().to_string(),
        };
        if let Ok(json) = serde_json::to_string(&summary) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell record for JSONL output
#[derive(Debug, Serialize)]
struct CellRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    a: &'a str,
    b: &'a str,
    row: usize,
    col: usize,
    clearance_mm: ClearanceValue,
}

/// Summary record for JSONL output
#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    classes: usize,
    editable_cells: usize,
    rules: usize,
    rule_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Triangle};
    use serde_json::Value;

    #[test]
    fn test_format_cells_then_summary() {
        let mut matrix = ClassMatrix::new(
            vec!["Default".into(), "BAT+".into(), "BAT-".into()],
            Triangle::Upper,
        )
        .unwrap();
        matrix.commit_cell(Position::new(1, 2), "0.5").unwrap();
        matrix.commit_cell(Position::new(0, 0), "0.2").unwrap();

        let output = JsonlFormatter::new().format(&matrix, Path::new("demo.kicad_dru"));
        let records: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "cell");
        assert_eq!(records[0]["a"], "Default");
        assert_eq!(records[0]["clearance_mm"], 0.2);
        assert_eq!(records[1]["a"], "BAT+");
        assert_eq!(records[1]["b"], "BAT-");
        assert_eq!(records[1]["row"], 1);
        assert_eq!(records[1]["col"], 2);
        assert_eq!(records[2]["type"], "summary");
        assert_eq!(records[2]["classes"], 3);
        assert_eq!(records[2]["editable_cells"], 6);
        assert_eq!(records[2]["rules"], 2);
        assert_eq!(records[2]["rule_file"], "demo.kicad_dru");
    }

    #[test]
    fn test_format_empty_matrix() {
        let matrix = ClassMatrix::new(vec!["Default".into()], Triangle::Upper).unwrap();
        let output = JsonlFormatter::new().format(&matrix, Path::new("x.kicad_dru"));

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("\"rules\":0"));
    }
}
