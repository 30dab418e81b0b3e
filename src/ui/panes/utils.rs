//! Helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding},
};

/// Bordered block whose border reflects focus
pub fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0))
}

/// Clamp `scroll_offset` to the content and keep only the rows that fit.
///
/// An offset of `usize::MAX` pins the view to the bottom.
pub fn visible_items<'a>(
    items: Vec<ListItem<'a>>,
    area: Rect,
    scroll_offset: &mut usize,
) -> Vec<ListItem<'a>> {
    let total_items = items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect()
}

/// `[a, b, c]` rendering of any displayable sequence
pub fn bracketed<T: std::fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(T::to_string).collect();
    format!("[{}]", parts.join(", "))
}
