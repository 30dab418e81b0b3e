//! Narration pane: every step description up to the current one

use super::utils::{pane_block, visible_items};
use crate::playback::Navigator;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the narration history, newest line highlighted
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    navigator: &dyn Navigator,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" {} ", title);
    let block = pane_block(&title, is_focused);
    let lines = navigator.narration();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no steps)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let last = lines.len() - 1;
    let items: Vec<ListItem> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let text = format!("{:>3}  {}", index + 1, line);
            let style = if index == last {
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(visible_items(items, area, scroll_offset)).block(block);
    frame.render_widget(list, area);
}
