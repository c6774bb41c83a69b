use std::path::PathBuf;
use std::time::Instant;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::widgets::ListState;

use crate::app::types::{App, FilteredEntry, InputMode};
use crate::clipboard::Clipboard;
use crate::session::Session;

impl App {
    pub fn new(session: Session, config_path: PathBuf, clipboard: Box<dyn Clipboard>) -> Self {
        let mut list_state = ListState::default();
        if !session.entries().is_empty() {
            list_state.select(Some(0));
        }

        Self {
            should_quit: false,
            session,
            input_mode: InputMode::Normal,
            status_message: None,
            config_path,
            clipboard,
            selected: 0,
            list_state,
            search_query: String::new(),
            filtered_entries: Vec::new(),
            search_selected: 0,
            show_help: false,
            help_scroll_position: 0,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Index into `session.entries()` of the highlighted row.
    pub fn current_entry_index(&self) -> Option<usize> {
        match self.input_mode {
            InputMode::Search => self
                .filtered_entries
                .get(self.search_selected)
                .map(|f| f.original_index),
            _ => {
                if self.selected < self.session.entries().len() {
                    Some(self.selected)
                } else {
                    None
                }
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.input_mode == InputMode::Search {
            self.search_select_next();
            return;
        }
        let total = self.session.entries().len();
        if total == 0 {
            return;
        }
        self.selected = (self.selected + 1) % total;
        self.list_state.select(Some(self.selected));
    }

    pub fn select_previous(&mut self) {
        if self.input_mode == InputMode::Search {
            self.search_select_previous();
            return;
        }
        let total = self.session.entries().len();
        if total == 0 {
            return;
        }
        self.selected = (self.selected + total - 1) % total;
        self.list_state.select(Some(self.selected));
    }

    pub fn toggle_current(&mut self) {
        if let Some(index) = self.current_entry_index() {
            self.session.toggle(index);
        }
    }

    pub fn select_all(&mut self) {
        self.session.select_all();
        self.set_status("Selected all entries");
    }

    pub fn unselect_all(&mut self) {
        self.session.unselect_all();
        self.set_status("Unselected all entries");
    }

    fn copy(&mut self, text: String, what: &str) {
        match self.clipboard.set_text(&text) {
            Ok(()) => {
                tracing::info!("Copied {}: {}", what, text);
                self.set_status(format!("Copied {} to clipboard", what));
            }
            Err(e) => {
                tracing::error!("Failed to copy {}: {:#}", what, e);
                self.set_status(format!("Error: failed to copy {}: {}", what, e));
            }
        }
    }

    pub fn copy_command(&mut self) {
        match self.session.command() {
            Ok(command) => self.copy(command, "rsync command"),
            Err(e) => {
                tracing::error!("Failed to compose command: {}", e);
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    pub fn copy_entry_remote_path(&mut self) {
        let Some(path) = self
            .current_entry_index()
            .and_then(|i| self.session.entry_remote_path(i))
        else {
            return;
        };
        self.copy(path, "rsync path");
    }

    pub fn copy_entry_command(&mut self) {
        let Some(result) = self
            .current_entry_index()
            .and_then(|i| self.session.entry_command(i))
        else {
            return;
        };
        match result {
            Ok(command) => self.copy(command, "entry command"),
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    // Text inputs
    pub fn push_input(&mut self, c: char) {
        match self.input_mode {
            InputMode::EditOptions => self.session.options.push(c),
            InputMode::EditDestination => self.session.destination.push(c),
            InputMode::Search => {
                self.search_query.push(c);
                self.filter_entries();
            }
            InputMode::Normal => {}
        }
    }

    pub fn pop_input(&mut self) {
        match self.input_mode {
            InputMode::EditOptions => {
                self.session.options.pop();
            }
            InputMode::EditDestination => {
                self.session.destination.pop();
            }
            InputMode::Search => {
                self.search_query.pop();
                self.filter_entries();
            }
            InputMode::Normal => {}
        }
    }

    pub fn enter_edit_mode(&mut self, mode: InputMode) {
        tracing::debug!("Entering {:?}", mode);
        self.input_mode = mode;
    }

    // Search logic
    pub fn filter_entries(&mut self) {
        let entries = self.session.entries();
        if self.search_query.is_empty() {
            self.filtered_entries = (0..entries.len())
                .map(|original_index| FilteredEntry {
                    original_index,
                    score: 0,
                    matched_indices: Vec::new(),
                })
                .collect();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut matches: Vec<FilteredEntry> = entries
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| {
                    matcher
                        .fuzzy_indices(entry.title(), &self.search_query)
                        .map(|(score, matched_indices)| FilteredEntry {
                            original_index: i,
                            score,
                            matched_indices,
                        })
                })
                .collect();
            matches.sort_by(|a, b| b.score.cmp(&a.score));
            self.filtered_entries = matches;
        }

        // Reset selection if current selection is out of bounds
        if self.search_selected >= self.filtered_entries.len() {
            self.search_selected = 0;
        }
        self.list_state.select(if self.filtered_entries.is_empty() {
            None
        } else {
            Some(self.search_selected)
        });
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_query.clear();
        self.search_selected = 0;
        self.filter_entries();
    }

    /// Leave search mode. With `keep_cursor` the normal cursor moves to the
    /// highlighted match.
    pub fn exit_search_mode(&mut self, keep_cursor: bool) {
        if keep_cursor {
            if let Some(index) = self.current_entry_index() {
                self.selected = index;
            }
        }
        self.search_query.clear();
        self.filtered_entries.clear();
        self.search_selected = 0;
        self.input_mode = InputMode::Normal;
        self.list_state.select(if self.session.entries().is_empty() {
            None
        } else {
            Some(self.selected)
        });
    }

    fn search_select_next(&mut self) {
        if self.filtered_entries.is_empty() {
            return;
        }
        self.search_selected = (self.search_selected + 1) % self.filtered_entries.len();
        self.list_state.select(Some(self.search_selected));
    }

    fn search_select_previous(&mut self) {
        if self.filtered_entries.is_empty() {
            return;
        }
        let total = self.filtered_entries.len();
        self.search_selected = (self.search_selected + total - 1) % total;
        self.list_state.select(Some(self.search_selected));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.help_scroll_position = 0;
    }
}
