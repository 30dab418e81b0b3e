use crate::model::{EdgeStatus, NodeStatus};
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub highlight: Color,   // Yellow for the entity being worked on
    pub path: Color,        // Pink for paths and spanning trees
    pub type_name: Color,   // Cyan for structure annotations
    pub red_node: Color,    // Red-black tree colors
    pub black_node: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    highlight: Color::Rgb(249, 226, 175),
    path: Color::Rgb(245, 194, 231),
    type_name: Color::Rgb(148, 226, 213),
    red_node: Color::Rgb(243, 139, 168),
    black_node: Color::Rgb(147, 153, 178),
};

impl Theme {
    pub fn node_color(&self, status: NodeStatus) -> Color {
        match status {
            NodeStatus::Default => self.fg,
            NodeStatus::Active => self.highlight,
            NodeStatus::Visited => self.primary,
            NodeStatus::Path => self.path,
            NodeStatus::Start => self.success,
            NodeStatus::End => self.error,
        }
    }

    pub fn edge_color(&self, status: EdgeStatus) -> Color {
        match status {
            EdgeStatus::Default => self.comment,
            EdgeStatus::Active => self.highlight,
            EdgeStatus::Visited => self.primary,
            EdgeStatus::Path => self.path,
            EdgeStatus::Discarded => self.error,
        }
    }
}
