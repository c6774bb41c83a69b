use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, FilteredEntry, InputMode};
use crate::entry::Entry;
use crate::size::format_size;

const SIZE_COLUMN: usize = 12;

pub fn draw_entries_list<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    let is_search_mode = app.input_mode == InputMode::Search;

    let (list_area, border_style, title) = if is_search_mode {
        let search_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search input area
                Constraint::Min(0),    // Search results area
            ].as_ref())
            .split(area);

        let search_block = Block::default()
            .borders(Borders::ALL)
            .title(" 🔍 Search (Esc: cancel, Enter: jump, Tab: toggle) ")
            .border_style(Style::default().fg(Color::Yellow));
        let search_paragraph = Paragraph::new(format!("{}█", app.search_query))
            .style(Style::default().fg(Color::White))
            .block(search_block);
        f.render_widget(search_paragraph, search_chunks[0]);

        (
            search_chunks[1],
            Style::default().fg(Color::Yellow),
            format!(" Results ({} matches) ", app.filtered_entries.len()),
        )
    } else {
        (
            area,
            Style::default().fg(Color::Green),
            format!(" 📁 {} ", app.session.base_path()),
        )
    };

    let rows: Vec<FilteredEntry> = if is_search_mode {
        app.filtered_entries.clone()
    } else {
        (0..app.session.entries().len())
            .map(|original_index| FilteredEntry {
                original_index,
                score: 0,
                matched_indices: vec![],
            })
            .collect()
    };

    let highlighted = if is_search_mode {
        app.search_selected
    } else {
        app.selected
    };

    let entries = app.session.entries();
    let width = list_area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            entries
                .get(row.original_index)
                .map(|entry| entry_item(entry, row, i == highlighted, is_search_mode, width))
        })
        .collect();

    let list = if items.is_empty() {
        let message = if is_search_mode {
            format!("No results for '{}'", app.search_query)
        } else {
            "No selectable entries in this listing".to_string()
        };
        List::new(vec![ListItem::new(Span::styled(
            message,
            Style::default().fg(Color::Gray).not_italic(),
        ))])
    } else {
        List::new(items)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    f.render_stateful_widget(list.block(block), list_area, &mut app.list_state);
}

fn entry_item<'a>(
    entry: &'a Entry,
    row: &FilteredEntry,
    is_highlighted: bool,
    is_search_mode: bool,
    width: usize,
) -> ListItem<'a> {
    let (text_style, bg_style) = if is_highlighted {
        let bg = if is_search_mode { Color::Yellow } else { Color::Green };
        (
            Style::default()
                .fg(Color::Black)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
            Style::default().bg(bg),
        )
    } else {
        (Style::default().fg(Color::White), Style::default())
    };

    let prefix = if is_highlighted { "> " } else { "  " };
    let checkbox = if entry.is_selected() { "[x] " } else { "[ ] " };

    let mut spans = vec![
        Span::styled(prefix, text_style),
        Span::styled(
            checkbox,
            if entry.is_selected() && !is_highlighted {
                text_style.fg(Color::LightGreen)
            } else {
                text_style
            },
        ),
    ];

    let title = entry.title();
    if is_search_mode && !row.matched_indices.is_empty() {
        for (idx, c) in title.chars().enumerate() {
            let style = if row.matched_indices.contains(&idx) {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            spans.push(Span::styled(c.to_string(), style));
        }
    } else {
        spans.push(Span::styled(title, text_style));
    }

    let size = format_size(entry.size(), false);
    let used = prefix.len() + checkbox.len() + title.chars().count();
    let padding = width.saturating_sub(used + SIZE_COLUMN).max(1);
    spans.push(Span::styled(" ".repeat(padding), text_style));
    spans.push(Span::styled(
        format!("{:>width$}", size, width = SIZE_COLUMN),
        text_style.fg(if is_highlighted { Color::Black } else { Color::Gray }),
    ));

    ListItem::new(Line::from(spans)).style(bg_style)
}
