// src/export/aggregate.rs
// =============================================================================
// Fetches every selected file and concatenates them into one Artifact.
//
// Rules:
// - An empty selection is rejected before any request is made
// - Paths are exported in lexicographic order, whatever order they were
//   selected in
// - One request per file, one at a time
// - A file that fails to load gets an error marker and the export moves on;
//   a single bad file never aborts the batch
//
// Rust concepts:
// - impl FnMut: the caller passes any closure to receive progress updates
// - Generics with ?Sized: works with a concrete provider or a trait object
// - match on Result: failures become data (SectionOutcome) instead of errors
// =============================================================================

use chrono::NaiveDate;
use tracing::{info, warn};

use super::artifact::{
    error_section, export_filename, file_section, Artifact, SectionOutcome, SectionReport,
};
use crate::error::{ExportError, FileError};
use crate::github::{decode_content, RepoId, RepositoryProvider};
use crate::selection::SelectionSet;

/// Progress signal emitted before each file is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based index of the file being fetched
    pub current: usize,
    pub total: usize,
}

/// Fetches and decodes one file
pub async fn fetch_text<P>(provider: &P, repo: &RepoId, path: &str) -> Result<String, FileError>
where
    P: RepositoryProvider + ?Sized,
{
    let encoded = provider.get_file_content(repo, path).await?;
    Ok(decode_content(&encoded)?)
}

pub async fn export_selection<P>(
    provider: &P,
    repo: &RepoId,
    selection: &SelectionSet,
    filename_prefix: &str,
    date: NaiveDate,
    mut on_progress: impl FnMut(Progress),
) -> Result<Artifact, ExportError>
where
    P: RepositoryProvider + ?Sized,
{
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    // The set is already ordered; sorting here keeps the section order explicit
    let mut paths: Vec<&str> = selection.iter().collect();
    paths.sort_unstable();
    let total = paths.len();

    let mut content = String::new();
    let mut sections = Vec::with_capacity(total);

    for (index, path) in paths.into_iter().enumerate() {
        on_progress(Progress {
            current: index + 1,
            total,
        });

        let outcome = match fetch_text(provider, repo, path).await {
            Ok(text) => {
                content.push_str(&file_section(path, &text));
                SectionOutcome::Loaded
            }
            // A failed file is recorded and skipped; the loop never returns early
            Err(e) => {
                warn!(path, error = %e, "failed to load file, writing error marker");
                content.push_str(&error_section(path));
                SectionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        sections.push(SectionReport {
            path: path.to_string(),
            outcome,
        });
    }

    let artifact = Artifact {
        content,
        filename: export_filename(filename_prefix, date),
        sections,
    };

    info!(
        repo = %repo,
        loaded = artifact.loaded_count(),
        failed = total - artifact.loaded_count(),
        "export finished"
    );
    Ok(artifact)
}
