pub mod command_panel;
pub mod entries_list;
pub mod footer;
pub mod help_popup;
pub mod status_bar;

use crate::app::App;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(3),     // Entries
                Constraint::Length(9),  // Inputs, summary and command
                Constraint::Length(1),  // Status bar
                Constraint::Length(1),  // Footer
            ]
            .as_ref(),
        )
        .split(f.size());

    entries_list::draw_entries_list::<B>(f, app, chunks[0]);
    command_panel::draw_command_panel::<B>(f, app, chunks[1]);
    status_bar::draw_status_bar::<B>(f, app, chunks[2]);
    footer::draw_footer::<B>(f, app, chunks[3]);

    if app.show_help {
        help_popup::render_help_popup::<B>(f, app);
    }
}
