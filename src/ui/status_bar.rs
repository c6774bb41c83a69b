use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use crate::app::App;

const STATUS_TTL_SECS: u64 = 5;

pub fn draw_status_bar<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    let Some((message, timestamp)) = &app.status_message else {
        return;
    };

    if timestamp.elapsed().as_secs() >= STATUS_TTL_SECS {
        app.clear_status_message();
        return;
    }

    let lower = message.to_lowercase();
    let style = if lower.contains("error") || lower.contains("failed") {
        Style::default().fg(Color::Red)
    } else if lower.contains("copied") {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let paragraph = Paragraph::new(message.as_str())
        .style(style)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}
