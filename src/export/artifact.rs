// src/export/artifact.rs
// =============================================================================
// The exported text blob and its section format.
//
// Each loaded file becomes:
//
//   \n// File: <path>\n<content>\n
//   \n<80 '='>\n
//
// and each file that could not be loaded becomes a one-line marker:
//
//   \n// Error loading file: <path>\n
//
// Rust concepts:
// - #[serde(tag = "status")]: the enum variant is written as a "status" field
// - #[serde(flatten)]: the outcome's fields sit next to "path" in the JSON
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

pub const SEPARATOR_WIDTH: usize = 80;

pub fn file_section(path: &str, content: &str) -> String {
    format!(
        "\n// File: {}\n{}\n\n{}\n",
        path,
        content,
        "=".repeat(SEPARATOR_WIDTH)
    )
}

pub fn error_section(path: &str) -> String {
    format!("\n// Error loading file: {}\n", path)
}

/// e.g. "repo-export-2024-05-01.txt"
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    // %Y-%m-%d keeps the date sortable and free of path separators
    format!("{}-{}.txt", prefix, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Loaded,
    Failed { reason: String },
}

/// What happened to one selected path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: SectionOutcome,
}

impl SectionReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, SectionOutcome::Loaded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub content: String,
    /// Suggested file name, stamped with the export date
    pub filename: String,
    /// One entry per selected path, in section order
    pub sections: Vec<SectionReport>,
}

impl Artifact {
    pub fn loaded_count(&self) -> usize {
        self.sections.iter().filter(|s| s.is_ok()).count()
    }

    pub fn failed_paths(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| !s.is_ok())
            .map(|s| s.path.as_str())
            .collect()
    }
}
