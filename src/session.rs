// src/session.rs
// =============================================================================
// One user's working state: the active tree, the selection over it, and the
// enabled extensions.
//
// The CLI (or any other front end) issues commands against a Session instead
// of holding this state itself. All mutation goes through the methods here.
//
// Acquisitions are tagged with a ticket. Only the result of the most recently
// started acquisition is installed; an older one that finishes late is
// dropped, so a stale tree can never overwrite a newer one.
// =============================================================================

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{AcquireError, ExportError, SelectionError};
use crate::export::{export_selection, Artifact, Progress};
use crate::github::{RepoId, RepoSummary, RepositoryProvider};
use crate::selection::{normalize_extension, ExtensionFilter, ExtensionInfo, SelectionSet};
use crate::tree::{acquire_tree, Tree};

/// Identifies one acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionTicket {
    generation: u64,
    repo: RepoId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installed {
    /// The result belonged to the latest acquisition and was applied
    Current,
    /// A newer acquisition has started since; the result was discarded
    Stale,
}

pub struct Session {
    config: SessionConfig,
    generation: u64,
    repo: Option<RepoId>,
    tree: Option<Tree>,
    selection: SelectionSet,
    extensions: ExtensionFilter,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let extensions = ExtensionFilter::new(config.enabled_extensions.iter().cloned());
        Self {
            config,
            generation: 0,
            repo: None,
            tree: None,
            selection: SelectionSet::new(),
            extensions,
        }
    }

    pub fn repo(&self) -> Option<&RepoId> {
        self.repo.as_ref()
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn extensions(&self) -> &ExtensionFilter {
        &self.extensions
    }

    pub fn begin_acquisition(&mut self, repo: &RepoId) -> AcquisitionTicket {
        self.generation += 1;
        AcquisitionTicket {
            generation: self.generation,
            repo: repo.clone(),
        }
    }

    /// Installs the outcome of an acquisition if it is still the latest one.
    ///
    /// Success replaces the tree wholesale; failure clears it. Either way the
    /// selection and extension state start over. Returns the failure back to
    /// the caller when it was current.
    pub fn finish_acquisition(
        &mut self,
        ticket: AcquisitionTicket,
        result: Result<Tree, AcquireError>,
    ) -> Result<Installed, AcquireError> {
        if ticket.generation != self.generation {
            debug!(
                repo = %ticket.repo,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale acquisition result"
            );
            return Ok(Installed::Stale);
        }

        match result {
            Ok(tree) => {
                self.reset_selection();
                self.repo = Some(ticket.repo);
                self.tree = Some(tree);
                Ok(Installed::Current)
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Looks up the repository, lists it, and installs the tree.
    pub async fn acquire<P>(
        &mut self,
        provider: &P,
        repo: &RepoId,
    ) -> Result<RepoSummary, AcquireError>
    where
        P: RepositoryProvider + ?Sized,
    {
        let ticket = self.begin_acquisition(repo);

        match describe_and_list(provider, repo, self.config.concurrency).await {
            Ok((summary, tree)) => {
                self.finish_acquisition(ticket, Ok(tree))?;
                Ok(summary)
            }
            Err(e) => {
                // &mut self is held across the awaits, so this ticket is the latest
                self.clear();
                Err(e)
            }
        }
    }

    fn clear(&mut self) {
        self.repo = None;
        self.tree = None;
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selection.uncheck_all();
        self.extensions = ExtensionFilter::new(self.config.enabled_extensions.iter().cloned());
    }

    fn active_tree(&self) -> Result<&Tree, SelectionError> {
        self.tree.as_ref().ok_or(SelectionError::NoTree)
    }

    pub fn toggle_file(&mut self, path: &str, selected: bool) -> Result<(), SelectionError> {
        let tree = self.tree.as_ref().ok_or(SelectionError::NoTree)?;
        self.selection.toggle_file(tree, path, selected)
    }

    /// Selects or deselects everything under `path` ("" for the whole tree)
    pub fn toggle_directory(&mut self, path: &str, selected: bool) -> Result<usize, SelectionError> {
        let tree = self.tree.as_ref().ok_or(SelectionError::NoTree)?;
        let node = tree
            .find(path)
            .ok_or_else(|| SelectionError::UnknownPath(path.to_string()))?;
        Ok(self.selection.toggle_directory(node, selected))
    }

    pub fn is_checked(&self, path: &str) -> Result<bool, SelectionError> {
        let node = self
            .active_tree()?
            .find(path)
            .ok_or_else(|| SelectionError::UnknownPath(path.to_string()))?;
        Ok(self.selection.is_checked(node))
    }

    pub fn check_all(&mut self) -> Result<(), SelectionError> {
        let tree = self.tree.as_ref().ok_or(SelectionError::NoTree)?;
        self.selection.check_all(tree);
        Ok(())
    }

    /// Flips an extension (any spelling: "rs", ".RS"). Returns whether it is
    /// enabled afterwards.
    pub fn toggle_extension(&mut self, ext: &str) -> Result<bool, SelectionError> {
        let tree = self.tree.as_ref().ok_or(SelectionError::NoTree)?;
        let ext = normalize_extension(ext)
            .ok_or_else(|| SelectionError::InvalidExtension(ext.to_string()))?;
        Ok(self.extensions.toggle(&ext, &mut self.selection, tree))
    }

    pub fn extension_registry(&self) -> Result<Vec<ExtensionInfo>, SelectionError> {
        Ok(self.extensions.registry(self.active_tree()?))
    }

    pub async fn export<P>(
        &self,
        provider: &P,
        date: NaiveDate,
        on_progress: impl FnMut(Progress),
    ) -> Result<Artifact, ExportError>
    where
        P: RepositoryProvider + ?Sized,
    {
        let repo = match &self.repo {
            Some(repo) if !self.selection.is_empty() => repo,
            _ => return Err(ExportError::EmptySelection),
        };
        export_selection(
            provider,
            repo,
            &self.selection,
            &self.config.export_prefix,
            date,
            on_progress,
        )
        .await
    }
}

async fn describe_and_list<P>(
    provider: &P,
    repo: &RepoId,
    concurrency: usize,
) -> Result<(RepoSummary, Tree), AcquireError>
where
    P: RepositoryProvider + ?Sized,
{
    let summary = provider
        .describe_repository(repo)
        .await
        .map_err(AcquireError::Describe)?;
    info!(
        repo = %summary.full_name,
        branch = %summary.default_branch,
        private = summary.private,
        "repository is accessible"
    );

    let tree = acquire_tree(provider, repo, concurrency).await?;
    Ok((summary, tree))
}
