use std::path::PathBuf;
use std::time::Instant;

use ratatui::widgets::ListState;

use crate::clipboard::Clipboard;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    EditOptions,
    EditDestination,
}

/// An entry that matched the search query.
#[derive(Debug, Clone)]
pub struct FilteredEntry {
    pub original_index: usize,
    pub score: i64,
    pub matched_indices: Vec<usize>,
}

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    pub input_mode: InputMode,
    pub status_message: Option<(String, Instant)>,
    pub config_path: PathBuf,
    pub clipboard: Box<dyn Clipboard>,

    // Normal mode cursor
    pub selected: usize,
    pub list_state: ListState,

    // Search Mode
    pub search_query: String,
    pub filtered_entries: Vec<FilteredEntry>,
    pub search_selected: usize,

    // Help popup
    pub show_help: bool,
    pub help_scroll_position: u16,
}
