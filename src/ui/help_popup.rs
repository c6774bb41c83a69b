use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};

use crate::app::App;

const KEY_WIDTH: usize = 11;

pub fn render_help_popup<B: Backend>(f: &mut Frame, app: &mut App) {
    let block = Block::default()
        .title("Keyboard Shortcuts")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));

    let area = centered_rect(80, 80, f.size());
    f.render_widget(Clear, area); // this clears the background
    f.render_widget(block, area);

    let text = get_help_text();
    let line_count = text.lines.len();

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .scroll((app.help_scroll_position, 0));

    let inner_area = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });

    f.render_widget(paragraph, inner_area);

    // Make scrollbar only appear if there is overflow
    if line_count > inner_area.height as usize {
        let mut scrollbar_state = ratatui::widgets::ScrollbarState::new(line_count)
            .position(app.help_scroll_position as usize);

        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            inner_area,
            &mut scrollbar_state,
        );
    }
}

/// Number of lines in the help text; the scroll position never passes the last one.
pub fn help_line_count() -> usize {
    get_help_text().lines.len()
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
    ))
}

fn binding<'a>(keys: &'a str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:<width$}", keys, width = KEY_WIDTH),
            Style::default().fg(Color::Green),
        ),
        Span::raw(format!("- {}", description)),
    ])
}

fn get_help_text<'a>() -> Text<'a> {
    Text::from(vec![
        section("Normal Mode"),
        binding("j, ↓", "Move down"),
        binding("k, ↑", "Move up"),
        binding("Space", "Toggle the highlighted entry"),
        binding("a", "Select all entries"),
        binding("u", "Unselect all entries"),
        binding("o", "Edit rsync options"),
        binding("d", "Edit rsync destination"),
        binding("y", "Copy the rsync command"),
        binding("p", "Copy the rsync path of the highlighted entry"),
        binding("c", "Copy a command for the highlighted entry only"),
        binding("/", "Switch to SEARCH mode"),
        binding("e", "Open the config file"),
        binding("q", "Quit"),
        Line::from(""),
        section("Search Mode"),
        binding("Esc", "Back to Normal mode"),
        binding("Enter", "Jump to the highlighted match"),
        binding("Tab", "Toggle the highlighted match"),
        binding("↓ / ↑", "Move down / up"),
        binding("Backspace", "Delete from the query"),
        Line::from(""),
        section("Editing options / destination"),
        binding("Enter, Esc", "Done"),
        binding("Backspace", "Delete last character"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Nothing or everything selected", Style::default().fg(Color::Gray)),
            Span::raw(" syncs the whole directory."),
        ]),
        Line::from(""),
        section("Help Popup"),
        binding("?, Esc", "Toggle/Close help"),
        binding("↑, k", "Scroll up"),
        binding("↓, j", "Scroll down"),
    ])
}

/// helper function to create a centered rect using up certain percentage of the available rect `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
