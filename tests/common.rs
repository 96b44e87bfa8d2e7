//! Test utilities for nccm integration tests

#![allow(dead_code)]

use nccm::{Host, HostError};
use std::fs;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Net classes of the board used throughout the tests
pub const CLASSES: [&str; 5] = ["Default", "BAT+", "BAT-", "LED", "Signal"];

pub fn classes() -> Vec<String> {
    CLASSES.iter().map(|s| s.to_string()).collect()
}

/// A host with a fixed class list and rule file location
#[derive(Debug, Clone)]
pub struct FixedHost {
    pub classes: Vec<String>,
    pub rule_file: PathBuf,
}

impl FixedHost {
    pub fn new(dir: &Path) -> Self {
        FixedHost {
            classes: classes(),
            rule_file: dir.join("board.kicad_dru"),
        }
    }

    pub fn with_classes(dir: &Path, names: &[&str]) -> Self {
        FixedHost {
            classes: names.iter().map(|s| s.to_string()).collect(),
            rule_file: dir.join("board.kicad_dru"),
        }
    }
}

impl Host for FixedHost {
    fn net_class_names(&self) -> Result<Vec<String>, HostError> {
        Ok(self.classes.clone())
    }

    fn rule_file_path(&self) -> Result<PathBuf, HostError> {
        Ok(self.rule_file.clone())
    }
}

/// Writes `board.kicad_pro` into `dir` with the given net classes
pub fn write_project(dir: &Path, names: &[&str]) -> PathBuf {
    let classes: Vec<String> = names
        .iter()
        .map(|name| format!(r#"{{ "name": "{}", "clearance": 0.2 }}"#, name))
        .collect();
    let content = format!(
        r#"{{
  "meta": {{ "filename": "board.kicad_pro", "version": 1 }},
  "net_settings": {{
    "classes": [{}],
    "meta": {{ "version": 3 }}
  }}
}}
"#,
        classes.join(", ")
    );
    let path = dir.join("board.kicad_pro");
    fs::write(&path, content).expect("write project file");
    path
}

/// Path of the rule file that belongs to `write_project`'s project
pub fn rule_file_path(dir: &Path) -> PathBuf {
    dir.join("board.kicad_dru")
}
