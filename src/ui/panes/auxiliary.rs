//! Auxiliary state pane: queue, stack, distances, order, pointer, values

use super::utils::{bracketed, pane_block, visible_items};
use crate::engine::{GraphStep, ListStep, Outcome, TreeStep};
use crate::playback::Session;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the auxiliary pane
pub fn render_auxiliary_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" State ", is_focused);
    let navigator = session.navigator();

    let mut rows = match session {
        Session::Graph(s) => s.timeline().current().map(graph_rows).unwrap_or_default(),
        Session::Tree(s) => s.timeline().current().map(tree_rows).unwrap_or_default(),
        Session::List(s) => s.timeline().current().map(list_rows).unwrap_or_default(),
    };

    if navigator.position() + 1 >= navigator.total_steps() {
        rows.push(outcome_row(navigator.outcome()));
    }

    if rows.is_empty() {
        let paragraph = Paragraph::new("(nothing to show)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(visible_items(rows, area, scroll_offset)).block(block);
    frame.render_widget(list, area);
}

fn row(label: &str, value: String) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ]))
}

fn outcome_row(outcome: Outcome) -> ListItem<'static> {
    let color = match outcome {
        Outcome::Completed | Outcome::Found | Outcome::NoCycle => DEFAULT_THEME.success,
        _ if outcome.is_precondition_failure() => DEFAULT_THEME.error,
        _ => DEFAULT_THEME.secondary,
    };
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<10}", "outcome"),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
        Span::styled(
            outcome.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
}

fn graph_rows(step: &GraphStep) -> Vec<ListItem<'static>> {
    let mut rows = Vec::new();
    if let Some(queue) = &step.queue {
        rows.push(row("queue", bracketed(queue)));
    }
    if let Some(stack) = &step.stack {
        rows.push(row("stack", bracketed(stack)));
    }
    if let Some(order) = &step.order {
        rows.push(row("order", bracketed(order)));
    }
    if let Some(distances) = &step.distances {
        rows.push(row("distances", String::new()));
        for (vertex, distance) in distances {
            rows.push(row(&format!("  {}", vertex), distance.to_string()));
        }
    }
    rows
}

fn tree_rows(step: &TreeStep) -> Vec<ListItem<'static>> {
    let mut rows = vec![row("output", bracketed(&step.values))];
    if let Some(queue) = &step.queue {
        rows.push(row("queue", bracketed(queue)));
    }
    rows
}

fn list_rows(step: &ListStep) -> Vec<ListItem<'static>> {
    let pointer = step
        .current_pointer
        .map_or_else(|| "null".to_string(), |id| id.to_string());
    vec![
        row("pointer", pointer),
        row("values", bracketed(&step.values)),
    ]
}
