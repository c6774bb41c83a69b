use serde::Serialize;

use crate::entry::Entry;
use crate::error::ComposeError;
use crate::models::Listing;
use crate::rsync::{self, Remote};
use crate::selection::{self, Summary};
use crate::size::Size;

/// Everything one listing needs: its entries plus the command inputs.
#[derive(Debug)]
pub struct Session {
    remote: Remote,
    base_path: String,
    entries: Vec<Entry>,
    pub options: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct EntryReport {
    pub title: String,
    pub remote_path: String,
    pub size: Size,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub base_path: String,
    pub command: String,
    pub summary: Summary,
    pub entries: Vec<EntryReport>,
}

impl Session {
    /// Wrap every row into an entry. Rows that are not valid entries are
    /// logged and skipped.
    pub fn new(listing: Listing, remote: Remote, options: String, destination: String) -> Self {
        let mut entries = Vec::with_capacity(listing.rows.len());
        for (index, row) in listing.rows.iter().enumerate() {
            match Entry::from_row(row, &listing.base_path) {
                Ok(mut entry) => {
                    entry.bind_hook(Box::new(|title, selected| {
                        tracing::debug!("{} selected={}", title, selected);
                    }));
                    entries.push(entry);
                }
                Err(e) => tracing::warn!("Skipping row {}: {}", index, e),
            }
        }

        tracing::info!(
            "Session for {} with {} entries ({} rows)",
            listing.base_path,
            entries.len(),
            listing.rows.len()
        );

        Self {
            remote,
            base_path: listing.base_path,
            entries,
            options,
            destination,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.toggle_selected();
        }
    }

    pub fn select_all(&mut self) {
        selection::select_all(&mut self.entries);
    }

    pub fn unselect_all(&mut self) {
        selection::unselect_all(&mut self.entries);
    }

    /// Select exactly the entries whose title is in `titles`.
    pub fn select_only<S: AsRef<str>>(&mut self, titles: &[S]) {
        for entry in self.entries.iter_mut() {
            let wanted = titles.iter().any(|t| t.as_ref() == entry.title());
            entry.set_selected(wanted);
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.entries)
    }

    pub fn root_remote_path(&self) -> String {
        self.remote.path_for(&self.base_path)
    }

    /// Remote paths of the command. Nothing or everything selected means the
    /// whole directory; otherwise the selected entries in listing order.
    pub fn sources(&self) -> Vec<String> {
        let selected: Vec<&Entry> = self.entries.iter().filter(|e| e.is_selected()).collect();
        if selected.is_empty() || selected.len() == self.entries.len() {
            vec![self.root_remote_path()]
        } else {
            selected
                .iter()
                .map(|e| e.remote_path(&self.remote))
                .collect()
        }
    }

    pub fn command(&self) -> Result<String, ComposeError> {
        rsync::compose(&self.destination, Some(self.options.as_str()), &self.sources())
    }

    pub fn entry_remote_path(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| e.remote_path(&self.remote))
    }

    /// Command that syncs a single entry into a destination named after it.
    pub fn entry_command(&self, index: usize) -> Option<Result<String, ComposeError>> {
        self.entries.get(index).map(|e| {
            rsync::compose(
                e.title(),
                Some(self.options.as_str()),
                &[e.remote_path(&self.remote)],
            )
        })
    }

    pub fn report(&self) -> Result<Report, ComposeError> {
        Ok(Report {
            base_path: self.base_path.clone(),
            command: self.command()?,
            summary: self.summary(),
            entries: self
                .entries
                .iter()
                .map(|e| EntryReport {
                    title: e.title().to_string(),
                    remote_path: e.remote_path(&self.remote),
                    size: e.size(),
                    selected: e.is_selected(),
                })
                .collect(),
        })
    }
}
