use crate::app::{App, InputMode};
use anyhow::Result;
use crate::ui::help_popup::help_line_count;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if self.show_help {
            self.handle_help_key(key);
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => {
                self.handle_search_key(key);
                Ok(())
            }
            InputMode::EditOptions | InputMode::EditDestination => {
                self.handle_edit_key(key);
                Ok(())
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => self.select_all(),
            KeyCode::Char('u') => self.unselect_all(),
            KeyCode::Char('o') => self.enter_edit_mode(InputMode::EditOptions),
            KeyCode::Char('d') => self.enter_edit_mode(InputMode::EditDestination),
            KeyCode::Char('y') => self.copy_command(),
            KeyCode::Char('p') => self.copy_entry_remote_path(),
            KeyCode::Char('c') => self.copy_entry_command(),
            KeyCode::Char('/') => self.enter_search_mode(),
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Char('e') => self.handle_key_e()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_search_mode(false),
            KeyCode::Enter => self.exit_search_mode(true),
            KeyCode::Down => self.select_next(),
            KeyCode::Up => self.select_previous(),
            KeyCode::Tab => self.toggle_current(),
            KeyCode::Backspace => self.pop_input(),
            KeyCode::Char(c) => self.push_input(c),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => self.pop_input(),
            KeyCode::Char(c) => self.push_input(c),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => self.toggle_help(),
            KeyCode::Char('j') | KeyCode::Down => {
                let last = u16::try_from(help_line_count().saturating_sub(1)).unwrap_or(u16::MAX);
                self.help_scroll_position = self.help_scroll_position.saturating_add(1).min(last)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.help_scroll_position = self.help_scroll_position.saturating_sub(1)
            }
            _ => {}
        }
    }

    /// Open the config file in the default editor.
    pub fn handle_key_e(&mut self) -> Result<()> {
        if let Err(e) = open::that(&self.config_path) {
            tracing::error!("Failed to open editor: {}", e);
            self.set_status(format!("Error: failed to open {}", self.config_path.display()));
            return Ok(());
        }
        self.set_status("Config opened; changes apply on next start");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::models::{Listing, RawRow};
    use crate::rsync::Remote;
    use crate::session::Session;
    use std::path::PathBuf;

    fn app_with(clipboard: MemoryClipboard) -> App {
        let listing = Listing {
            base_path: "/files/TOSEC/".to_string(),
            rows: vec![
                RawRow::new("alpha.zip", "1 KiB"),
                RawRow::new("beta.zip", "2 KiB"),
                RawRow::new("gamma.zip", "-"),
            ],
        };
        let session = Session::new(
            listing,
            Remote::default(),
            "-tru --progress".to_string(),
            "out".to_string(),
        );
        App::new(session, PathBuf::from("config.toml"), Box::new(clipboard))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn space_toggles_highlighted_entry() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.session.entries()[1].is_selected());
        assert_eq!(app.session.summary().count_display(), "2 / 3");
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.entries()[1].is_selected());
    }

    #[test]
    fn navigation_wraps() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Up);
        assert_eq!(app.current_entry_index(), Some(2));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.current_entry_index(), Some(0));
    }

    #[test]
    fn bulk_keys() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.session.summary().count_display(), "0 / 3");
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session.summary().count_display(), "3 / 3");
    }

    #[test]
    fn copies_composed_command() {
        let clipboard = MemoryClipboard::default();
        let mut app = app_with(clipboard.clone());
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            clipboard.last().as_deref(),
            Some(
                "rsync -tru --progress \
                 \"rsync://rsync.myrient.erista.me/files/TOSEC/beta.zip\" \
                 \"rsync://rsync.myrient.erista.me/files/TOSEC/gamma.zip\" \
                 \"out\""
            )
        );
    }

    #[test]
    fn copies_entry_path_and_command() {
        let clipboard = MemoryClipboard::default();
        let mut app = app_with(clipboard.clone());
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(
            clipboard.last().as_deref(),
            Some("rsync://rsync.myrient.erista.me/files/TOSEC/alpha.zip")
        );
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            clipboard.last().as_deref(),
            Some(r#"rsync -tru --progress "rsync://rsync.myrient.erista.me/files/TOSEC/alpha.zip" "alpha.zip""#)
        );
    }

    #[test]
    fn editing_options_and_destination() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Char('o'));
        for _ in 0.."-tru --progress".len() {
            press(&mut app, KeyCode::Backspace);
        }
        assert_eq!(app.session.options, "");
        // Blank options fall back to the default.
        assert!(app.session.command().unwrap().starts_with("rsync -tru --progress "));
        type_text(&mut app, "-av");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('d'));
        type_text(&mut app, "/x");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            app.session.command().unwrap(),
            r#"rsync -av "rsync://rsync.myrient.erista.me/files/TOSEC/" "out/x""#
        );
    }

    #[test]
    fn search_filters_and_toggles() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "gam");
        assert_eq!(app.filtered_entries.len(), 1);
        assert_eq!(app.current_entry_index(), Some(2));
        press(&mut app, KeyCode::Tab);
        assert!(!app.session.entries()[2].is_selected());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.current_entry_index(), Some(2));
    }

    #[test]
    fn quit_keys() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help && !app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn help_scroll_stops_at_last_line() {
        let mut app = app_with(MemoryClipboard::default());
        press(&mut app, KeyCode::Char('?'));
        let last = (help_line_count() - 1) as u16;
        for _ in 0..help_line_count() + 10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.help_scroll_position, last);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll_position, last - 1);
    }
}
