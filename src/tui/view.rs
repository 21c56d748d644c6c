// File: src/tui/view.rs
use crate::help::HelpTab;
use crate::tui::state::{AppState, InputMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // --- 1. Status line ---
    let status = Paragraph::new(state.message.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" TaskFlow "));
    f.render_widget(status, chunks[0]);

    // --- 2. Event list ---
    let items: Vec<ListItem> = state
        .events
        .iter()
        .map(|event| {
            let mut lines = vec![
                Line::from(Span::styled(
                    event.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    event.time_range.to_string(),
                    Style::default().fg(Color::Cyan),
                )),
            ];
            if !event.tags.is_empty() {
                let tags = event
                    .tags
                    .iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(Line::from(Span::styled(
                    tags,
                    Style::default().fg(Color::Magenta),
                )));
            }
            lines.push(Line::raw(""));
            ListItem::new(lines)
        })
        .collect();

    let list_title = format!(" Events ({}) ", state.events.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);

    // --- 3. Input ---
    let input = Paragraph::new(state.input_buffer.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Command (Tab: complete, Enter: run, Esc: clear) "),
    );
    f.render_widget(input, chunks[2]);

    if state.mode == InputMode::Typing {
        let x = chunks[2].x + 1 + state.cursor_position as u16;
        let max_x = chunks[2].x + chunks[2].width.saturating_sub(2);
        f.set_cursor_position((x.min(max_x), chunks[2].y + 1));
    }

    // --- 4. Overlays ---
    match &state.mode {
        InputMode::Typing => {}
        InputMode::Help(tab) => draw_help(f, *tab),
        InputMode::Confirming { title, prompt } => draw_confirm(f, title, prompt),
    }
}

fn draw_help(f: &mut Frame, tab: HelpTab) {
    let area = centered_rect(80, 80, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help (Tab: switch, Esc: close) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let selected = match tab {
        HelpTab::General => 0,
        HelpTab::Commands => 1,
    };
    let tabs = Tabs::new(vec![HelpTab::General.title(), HelpTab::Commands.title()])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, rows[0]);

    let mut lines = Vec::new();
    for section in tab.sections() {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for item in section.items {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}", item.keys),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
            lines.push(Line::raw(format!("      {}", item.desc)));
            lines.push(Line::from(Span::styled(
                format!("      e.g. {}", item.example),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::raw(""));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[1]);
}

fn draw_confirm(f: &mut Frame, title: &str, prompt: &str) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);
    let text = vec![
        Line::raw(prompt.to_string()),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(Color::Green)),
            Span::raw("    "),
            Span::styled("[n] No", Style::default().fg(Color::Red)),
        ]),
    ];
    let popup = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
