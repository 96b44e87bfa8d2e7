#![forbid(unsafe_code)]

//! Host design project access
//!
//! The host supplies the ordered net class names and the location of the
//! custom rules file. [`KicadProject`] reads both from a KiCad project file
//! (`<name>.kicad_pro`); the rules file is `<name>.kicad_dru` beside it.

use crate::error::HostError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// KiCad project file extension
pub const PROJECT_EXTENSION: &str = "kicad_pro";

/// KiCad custom design rules file extension
pub const RULES_EXTENSION: &str = "kicad_dru";

/// Source of the class list and rule file location for a session
pub trait Host {
    /// Net class names, unique, in the host's display order
    fn net_class_names(&self) -> Result<Vec<String>, HostError>;

    /// Path of the custom rules file (which may not exist yet)
    fn rule_file_path(&self) -> Result<PathBuf, HostError>;

    /// Directory holding the project, used to find nccm.toml
    fn project_dir(&self) -> Result<PathBuf, HostError> {
        let rule_file = self.rule_file_path()?;
        Ok(rule_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")))
    }
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    net_settings: NetSettings,
}

#[derive(Debug, Default, Deserialize)]
struct NetSettings {
    #[serde(default)]
    classes: Vec<NetClassEntry>,
}

#[derive(Debug, Deserialize)]
struct NetClassEntry {
    name: String,
}

/// A KiCad project read from its `.kicad_pro` file
#[derive(Debug, Clone)]
pub struct KicadProject {
    project_file: PathBuf,
    classes: Vec<String>,
}

impl KicadProject {
    /// Opens a project from a `.kicad_pro` file or a directory holding one
    ///
    /// # Errors
    ///
    /// Returns `HostError::Unavailable` if no single project file can be
    /// found or it defines no net classes, and `HostError::Json` if it is
    /// not valid JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let project_file = Self::locate(path.as_ref())?;
        let content = fs::read_to_string(&project_file)?;
        Self::parse(project_file, &content)
    }

    /// Parses project JSON already read from `project_file`
    pub fn parse(project_file: impl Into<PathBuf>, content: &str) -> Result<Self, HostError> {
        let project_file = project_file.into();
        let parsed: ProjectFile =
            serde_json::from_str(content).map_err(|source| HostError::Json {
                path: project_file.clone(),
                source,
            })?;

        let classes: Vec<String> = parsed
            .net_settings
            .classes
            .into_iter()
            .map(|entry| entry.name)
            .collect();

        if classes.is_empty() {
            return Err(HostError::Unavailable {
                path: project_file,
                reason: "the project defines no net classes".to_string(),
            });
        }

        log::debug!(
            "opened project {} with {} net classes",
            project_file.display(),
            classes.len()
        );

        Ok(KicadProject {
            project_file,
            classes,
        })
    }

    /// Resolves `path` to a single `.kicad_pro` file
    fn locate(path: &Path) -> Result<PathBuf, HostError> {
        if !path.exists() {
            return Err(HostError::Unavailable {
                path: path.to_path_buf(),
                reason: "path does not exist".to_string(),
            });
        }

        if path.is_file() {
            if path.extension().and_then(|e| e.to_str()) != Some(PROJECT_EXTENSION) {
                return Err(HostError::Unavailable {
                    path: path.to_path_buf(),
                    reason: format!("not a .{} file", PROJECT_EXTENSION),
                });
            }
            return Ok(path.to_path_buf());
        }

        let mut candidates = Vec::new();
        for entry in fs::read_dir(path)? {
            let candidate = entry?.path();
            if candidate.is_file()
                && candidate.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION)
            {
                candidates.push(candidate);
            }
        }

        match candidates.len() {
            0 => Err(HostError::Unavailable {
                path: path.to_path_buf(),
                reason: format!(
                    "no .{} file found; open a KiCad project first",
                    PROJECT_EXTENSION
                ),
            }),
            1 => Ok(candidates.remove(0)),
            n => Err(HostError::Unavailable {
                path: path.to_path_buf(),
                reason: format!("{} project files found; pass one with --project", n),
            }),
        }
    }

    /// Path of the `.kicad_pro` file
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// Project name (file stem of the project file)
    pub fn name(&self) -> &str {
        self.project_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

impl Host for KicadProject {
    fn net_class_names(&self) -> Result<Vec<String>, HostError> {
        Ok(self.classes.clone())
    }

    fn rule_file_path(&self) -> Result<PathBuf, HostError> {
        Ok(self.project_file.with_extension(RULES_EXTENSION))
    }
}
