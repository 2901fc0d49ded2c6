//! Overlay menus and the selection picker.

use super::app::{App, Menu, MenuEntry, Overlay};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use stagequest::combat::Choice;
use stagequest::core::snapshot::GameSnapshot;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn draw_list(frame: &mut Frame, title: String, rows: &[String], cursor: Option<usize>, help: &str) {
    let width = rows
        .iter()
        .map(|r| r.chars().count())
        .chain(std::iter::once(help.chars().count()))
        .max()
        .unwrap_or(20) as u16
        + 6;
    let height = rows.len().max(1) as u16 + 4;
    let area = centered(frame.size(), width.max(30), height);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new("  (nothing here)").style(Style::default().fg(Color::DarkGray))]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = cursor == Some(i);
                let prefix = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("{}{}", prefix, row)).style(style)
            })
            .collect()
    };
    frame.render_widget(List::new(items), inner);

    if inner.height > rows.len() as u16 {
        let help_area = Rect {
            x: inner.x,
            y: inner.y + inner.height - 1,
            width: inner.width,
            height: 1,
        };
        let help = Paragraph::new(Line::from(help.to_string()))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);
    }
}

/// Renders the open menu on top of the battle screen.
pub fn draw_menu(frame: &mut Frame, app: &App, menu: Menu, snapshot: &GameSnapshot) {
    let entries: Vec<MenuEntry> = app.menu_entries(menu.overlay, snapshot);
    let rows: Vec<String> = entries.into_iter().map(|e| e.label).collect();

    let member = snapshot
        .members
        .get(app.focus_member)
        .map(|m| m.stats.name.as_str())
        .unwrap_or("");
    let title = match menu.overlay {
        Overlay::Upgrade | Overlay::Unequip => format!("{}- {} ", menu.overlay.title(), member),
        _ => menu.overlay.title().to_string(),
    };
    let (cursor, help) = match menu.overlay {
        Overlay::Help => (None, "Enter/Esc close"),
        Overlay::Upgrade | Overlay::Unequip => (Some(menu.cursor), "Enter select  Tab member  Esc close"),
        _ => (Some(menu.cursor), "Enter select  Esc close"),
    };
    draw_list(frame, title, &rows, cursor, help);
}

/// Renders a target or member picker for an engine request.
pub fn draw_picker(frame: &mut Frame, title: &str, candidates: &[Choice], cursor: usize) {
    let rows: Vec<String> = candidates.iter().map(|c| c.label.clone()).collect();
    draw_list(
        frame,
        format!(" {} ", title),
        &rows,
        Some(cursor),
        "Enter choose  Esc default",
    );
}
