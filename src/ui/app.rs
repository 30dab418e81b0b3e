//! Main TUI application state and logic

use crate::errors::PlaybackError;
use crate::playback::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Narration,
    State,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: structure -> narration -> state)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::State,
            FocusedPane::State => FocusedPane::Structure,
        }
    }
}

/// The main application state
pub struct App {
    /// The structure, algorithm and timeline being shown
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub structure_scroll: usize,
    pub narration_scroll: usize,
    pub state_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Structure,
            structure_scroll: 0,
            narration_scroll: usize::MAX,
            state_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Right column: Narration (top) | State (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        super::panes::render_structure_pane(
            frame,
            columns[0],
            &self.session,
            self.focused_pane == FocusedPane::Structure,
            &mut self.structure_scroll,
        );

        super::panes::render_narration_pane(
            frame,
            right_rows[0],
            self.session.title(),
            self.session.navigator(),
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        super::panes::render_auxiliary_pane(
            frame,
            right_rows[1],
            &self.session,
            self.focused_pane == FocusedPane::State,
            &mut self.state_scroll,
        );

        let navigator = self.session.navigator();
        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            navigator.position(),
            navigator.total_steps(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                let stepped = self.session.navigator_mut().step_forward_by(n);
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.session.cycle_algorithm();
                self.status_message = format!("Switched to {}", self.session.title());
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                let result = self.session.navigator_mut().step_backward();
                self.report(result, "Stepped backward");
            }
            KeyCode::Right => {
                let result = self.session.navigator_mut().step_forward();
                self.report(result, "Stepped forward");
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Enter => {
                self.session.navigator_mut().jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.session.navigator_mut().rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.narration_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Structure => &mut self.structure_scroll,
            FocusedPane::Narration => &mut self.narration_scroll,
            FocusedPane::State => &mut self.state_scroll,
        }
    }

    fn report(&mut self, result: Result<usize, PlaybackError>, success: &str) {
        match result {
            Ok(_) => {
                self.status_message = success.to_string();
                // Auto-scroll narration to bottom
                self.narration_scroll = usize::MAX;
            }
            Err(e) => {
                self.status_message = format!("Cannot move: {}", e);
            }
        }
    }
}
