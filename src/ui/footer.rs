use crate::app::{App, InputMode};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (nav_text, action_text) = match app.input_mode {
        InputMode::Normal => (
            "↑/k: Up  ↓/j: Down  [Space] Toggle  [a] All  [u] None  [/] Search",
            "[y] Copy  [p] Path  [c] Entry cmd  [?] Help  [q] Quit",
        ),
        InputMode::Search => (
            "↑: Up  ↓: Down  [Tab] Toggle  [Enter] Jump",
            "[Esc] Exit Search  Type to filter",
        ),
        InputMode::EditOptions | InputMode::EditDestination => {
            ("Type to edit  [Backspace] Delete", "[Enter/Esc] Done")
        }
    };

    let nav_help = Paragraph::new(nav_text).style(Style::default().fg(Color::Gray));
    let action_help = Paragraph::new(action_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Right);

    f.render_widget(nav_help, footer[0]);
    f.render_widget(action_help, footer[1]);
}
