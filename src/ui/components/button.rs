//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Minimum width of a button, borders included
const MIN_BUTTON_WIDTH: u16 = 16;

/// Width a button needs for `label`, clamped to `available`
pub fn button_width(label: &str, available: u16) -> u16 {
    let needed = label.chars().count() as u16 + 4; // padding + borders
    needed.max(MIN_BUTTON_WIDTH).min(available)
}

/// Render a bordered button, horizontally centered in `area`.
///
/// A disabled button stays dimmed even when focused; focus then only shows
/// on the border.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let width = button_width(label, area.width);
    let button_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: area.height.min(BUTTON_HEIGHT),
    };

    let border_style = match (is_selected, is_enabled) {
        (true, true) => Style::default().fg(Color::Green),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, _) => Style::default().fg(Color::DarkGray),
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(label)
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), button_area);
}
