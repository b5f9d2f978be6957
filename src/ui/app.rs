//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::printer::{AstPrinter, PrintedLine};
use crate::ui::panes::{self, SourceScrollState, TreeScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Rows skipped by PgUp/PgDn
const PAGE_SIZE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code the tree was parsed from
    pub source_code: String,

    /// Printed tree rows with their source lines
    pub tree: Vec<PrintedLine>,

    /// Selected tree row
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tree_scroll: TreeScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app showing `program`, parsed from `source_code`
    pub fn new(source_code: String, program: &Program) -> Self {
        Self::from_lines(source_code, AstPrinter::program_lines(program))
    }

    pub fn from_lines(source_code: String, tree: Vec<PrintedLine>) -> Self {
        App {
            source_code,
            tree,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            source_scroll: SourceScrollState::default(),
            tree_scroll: TreeScrollState::default(),
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

    /// Source line of the selected tree row, 0 if it has none
    pub fn current_source_line(&self) -> usize {
        self.tree
            .get(self.selected)
            .map_or(0, |line| line.source_line)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Two panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let current_line = self.current_source_line();

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tree_pane(
            frame,
            columns[1],
            &self.tree,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.tree.len(),
            current_line,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
                self.status_message = match self.focused_pane {
                    FocusedPane::Source => "Moving by source line".to_string(),
                    FocusedPane::Tree => "Moving by tree node".to_string(),
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Source => self.select_previous_source_line(),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_add(1)),
                FocusedPane::Source => self.select_next_source_line(),
            },
            KeyCode::PageUp => self.select(self.selected.saturating_sub(PAGE_SIZE)),
            KeyCode::PageDown => self.select(self.selected.saturating_add(PAGE_SIZE)),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
    }

    /// Select a tree row, clamped to the last one
    fn select(&mut self, row: usize) {
        self.selected = row.min(self.tree.len().saturating_sub(1));
    }

    /// Select the first row belonging to a later source line
    fn select_next_source_line(&mut self) {
        let current = self.current_source_line();
        if let Some(row) = self
            .tree
            .iter()
            .enumerate()
            .skip(self.selected)
            .find(|(_, line)| line.source_line > current)
            .map(|(row, _)| row)
        {
            self.selected = row;
        } else {
            self.status_message = "No later source line".to_string();
        }
    }

    /// Select the first row of the closest earlier source line
    fn select_previous_source_line(&mut self) {
        let current = self.current_source_line();
        let previous = self
            .tree
            .iter()
            .map(|line| line.source_line)
            .filter(|&line| line > 0 && line < current)
            .max();

        match previous {
            Some(target) => {
                if let Some(row) = self.tree.iter().position(|line| line.source_line == target) {
                    self.selected = row;
                }
            }
            None => self.status_message = "No earlier source line".to_string(),
        }
    }
}
