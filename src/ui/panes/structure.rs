//! Structure pane: every entity, coloured by its status in the current step

use super::utils::{pane_block, visible_items};
use crate::engine::{GraphStep, ListStep, TreeStep};
use crate::model::{
    EdgeId, EdgeStatus, Graph, LinkedList, ListNodeId, NodeColor, NodeStatus, Tree, TreeKind,
    TreeNode, VertexId,
};
use crate::playback::Session;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Render the structure pane for whichever session is active
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let (title, items) = match session {
        Session::Graph(s) => (
            " Graph ",
            graph_items(s.graph(), s.timeline().current()),
        ),
        Session::Tree(s) => (" Tree ", tree_items(s.tree(), s.timeline().current())),
        Session::List(s) => (" List ", list_items(s.list(), s.timeline().current())),
    };
    let block = pane_block(title, is_focused);

    if items.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(visible_items(items, area, scroll_offset)).block(block);
    frame.render_widget(list, area);
}

fn status_span(label: String, status: NodeStatus) -> Span<'static> {
    let mut style = Style::default().fg(DEFAULT_THEME.node_color(status));
    if status != NodeStatus::Default {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(label, style)
}

fn tag(status: NodeStatus) -> Span<'static> {
    if status == NodeStatus::Default {
        Span::raw("")
    } else {
        Span::styled(
            format!("  {}", status),
            Style::default().fg(DEFAULT_THEME.comment),
        )
    }
}

fn graph_items(graph: &Graph, step: Option<&GraphStep>) -> Vec<ListItem<'static>> {
    let vertex_status = |id: VertexId| {
        step.and_then(|s| s.vertices.get(&id).copied())
            .unwrap_or_default()
    };
    let edge_status = |id: EdgeId| {
        step.and_then(|s| s.edges.get(&id).copied())
            .unwrap_or_default()
    };

    let mut items = vec![ListItem::new(Span::styled(
        format!(
            "{} {} graph",
            if graph.is_directed() { "directed" } else { "undirected" },
            if graph.is_weighted() { "weighted" } else { "unweighted" },
        ),
        Style::default().fg(DEFAULT_THEME.type_name),
    ))];

    for vertex in graph.vertices() {
        let status = vertex_status(vertex.id);
        items.push(ListItem::new(Line::from(vec![
            Span::raw("● "),
            status_span(vertex.label.clone(), status),
            tag(status),
        ])));
    }

    let arrow = if graph.is_directed() { "→" } else { "─" };
    let mut shown = FxHashSet::default();
    for edge in graph.edges() {
        if !graph.is_directed() && !shown.insert(edge.id.canonical()) {
            continue;
        }
        // Either record of an undirected pair may carry the status
        let mut status = edge_status(edge.id);
        if status == EdgeStatus::Default && !graph.is_directed() {
            status = edge_status(edge.id.reversed());
        }
        let mut style = Style::default().fg(DEFAULT_THEME.edge_color(status));
        if status != EdgeStatus::Default {
            style = style.add_modifier(Modifier::BOLD);
        }
        let mut spans = vec![Span::styled(
            format!("  {} {} {}", edge.source, arrow, edge.target),
            style,
        )];
        if graph.is_weighted() {
            spans.push(Span::styled(
                format!("  ({})", edge.weight),
                Style::default().fg(DEFAULT_THEME.secondary),
            ));
        }
        if status != EdgeStatus::Default {
            spans.push(Span::styled(
                format!("  {}", status),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }
    items
}

fn tree_items(tree: &Tree, step: Option<&TreeStep>) -> Vec<ListItem<'static>> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let mut items = vec![ListItem::new(Span::styled(
        format!("{} tree, {} node(s), height {}", tree.kind(), tree.len(), tree.height()),
        Style::default().fg(DEFAULT_THEME.type_name),
    ))];

    // Right child first so it prints above, giving a sideways tree
    let mut pending: Vec<(&TreeNode, usize, &'static str)> = vec![(root, 0, "─")];
    while let Some((node, depth, branch)) = pending.pop() {
        let status = step
            .and_then(|s| s.nodes.get(&node.id).copied())
            .unwrap_or_default();

        let mut spans = vec![
            Span::styled(
                format!("{}{} ", "    ".repeat(depth), branch),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            status_span(node.value.to_string(), status),
        ];
        match (tree.kind(), node.color(), node.avl_height()) {
            (TreeKind::RedBlack, Some(color), _) => {
                let fg = match color {
                    NodeColor::Red => DEFAULT_THEME.red_node,
                    NodeColor::Black => DEFAULT_THEME.black_node,
                };
                spans.push(Span::styled(format!(" ({})", color), Style::default().fg(fg)));
            }
            (TreeKind::Avl, _, Some(height)) => spans.push(Span::styled(
                format!(" h={}", height),
                Style::default().fg(DEFAULT_THEME.type_name),
            )),
            _ => {}
        }
        spans.push(tag(status));
        items.push(ListItem::new(Line::from(spans)));

        if let Some(left) = node.left.as_deref() {
            pending.push((left, depth + 1, "└─"));
        }
        if let Some(right) = node.right.as_deref() {
            pending.push((right, depth + 1, "┌─"));
        }
    }
    items
}

fn list_items(list: &LinkedList, step: Option<&ListStep>) -> Vec<ListItem<'static>> {
    if list.is_empty() {
        return Vec::new();
    }
    let node_status = |id: ListNodeId| {
        step.and_then(|s| s.nodes.get(&id).copied())
            .unwrap_or_default()
    };
    let pointer = step.and_then(|s| s.current_pointer);

    let mut items = vec![ListItem::new(Span::styled(
        format!("{} linked list, {} node(s)", list.kind(), list.len()),
        Style::default().fg(DEFAULT_THEME.type_name),
    ))];

    for node in list.nodes() {
        let status = node_status(node.id);
        let marker = if pointer == Some(node.id) { "▶ " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(DEFAULT_THEME.highlight)),
            status_span(format!("{} = {}", node.id, node.value), status),
        ];
        if list.head() == Some(node.id) {
            spans.push(Span::styled(
                "  head",
                Style::default().fg(DEFAULT_THEME.success),
            ));
        }
        let next = node.next.map_or_else(|| "null".to_string(), |n| n.to_string());
        spans.push(Span::styled(
            format!("  next → {}", next),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
        if let Some(prev) = node.prev {
            spans.push(Span::styled(
                format!("  prev ← {}", prev),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
        spans.push(tag(status));
        items.push(ListItem::new(Line::from(spans)));
    }
    items
}
