use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};

pub fn draw_command_panel<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Options and destination
                Constraint::Length(1), // Summary
                Constraint::Min(3),    // Command
            ]
            .as_ref(),
        )
        .split(area);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_input(
        f,
        inputs[0],
        " Rsync options [o] ",
        &app.session.options,
        app.input_mode == InputMode::EditOptions,
    );
    draw_input(
        f,
        inputs[1],
        " Rsync destination [d] ",
        &app.session.destination,
        app.input_mode == InputMode::EditDestination,
    );

    let summary = app.session.summary();
    let summary_line = Line::from(vec![
        Span::styled(" Selected: ", Style::default().fg(Color::Gray)),
        Span::styled(
            summary.count_display(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Size: ", Style::default().fg(Color::Gray)),
        Span::styled(
            summary.size_display(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(summary_line), chunks[1]);

    let (command, style) = match app.session.command() {
        Ok(command) => (command, Style::default().fg(Color::Cyan)),
        Err(e) => (format!("Error: {}", e), Style::default().fg(Color::Red)),
    };
    let command_block = Block::default()
        .borders(Borders::ALL)
        .title(" Command [y] copy ");
    f.render_widget(
        Paragraph::new(command)
            .style(style)
            .wrap(Wrap { trim: false })
            .block(command_block),
        chunks[2],
    );
}

fn draw_input(f: &mut Frame, area: Rect, title: &str, value: &str, is_editing: bool) {
    let border_style = if is_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if is_editing {
        format!("{}█", value)
    } else {
        value.to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string());
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(block),
        area,
    );
}
