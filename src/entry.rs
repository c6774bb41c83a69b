use crate::error::EntryError;
use crate::models::RawRow;
use crate::rsync::Remote;
use crate::size::Size;

/// Link text the listing uses for navigating one level up.
pub const PARENT_DIRECTORY: &str = "Parent directory/";

/// Called with the entry title and its new state after every selection change.
pub type SelectionHook = Box<dyn FnMut(&str, bool)>;

/// One selectable item of a listing.
pub struct Entry {
    title: String,
    base_path: String,
    size: Size,
    selected: bool,
    hook: Option<SelectionHook>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("title", &self.title)
            .field("base_path", &self.base_path)
            .field("size", &self.size)
            .field("selected", &self.selected)
            .finish()
    }
}

impl Entry {
    pub fn from_row(row: &RawRow, base_path: &str) -> Result<Self, EntryError> {
        let title = row.link_text.as_deref().ok_or(EntryError::MissingLink)?;
        if title == PARENT_DIRECTORY {
            return Err(EntryError::ParentDirectory);
        }
        if title.is_empty() {
            return Err(EntryError::EmptyTitle);
        }
        if !row.link_in_cell {
            return Err(EntryError::LinkOutsideCell);
        }
        let size_text = row.size_text.as_deref().ok_or(EntryError::MissingSize)?;

        let mut base_path = base_path.to_string();
        if !base_path.ends_with('/') {
            base_path.push('/');
        }

        Ok(Self {
            title: title.to_string(),
            base_path,
            size: Size::parse(size_text),
            selected: true,
            hook: None,
        })
    }

    /// Register the observer notified on every selection change.
    pub fn bind_hook(&mut self, hook: SelectionHook) {
        self.hook = Some(hook);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn path(&self) -> String {
        format!("{}{}", self.base_path, self.title)
    }

    pub fn remote_path(&self, remote: &Remote) -> String {
        remote.path_for(&self.path())
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, value: bool) {
        self.selected = value;
        if let Some(hook) = self.hook.as_mut() {
            hook(&self.title, value);
        }
    }

    pub fn toggle_selected(&mut self) {
        self.set_selected(!self.selected);
    }
}
