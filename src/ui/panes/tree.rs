//! Syntax tree pane
//!
//! Shows the printed tree one node per row. The label part of each row
//! (everything up to the first `:` or space) is coloured by node category.

use crate::printer::PrintedLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the tree pane
#[derive(Debug, Default)]
pub struct TreeScrollState {
    pub offset: usize,
}

impl TreeScrollState {
    /// Adjust the offset so `selected` is inside a window of `visible_height` rows
    pub fn follow(&mut self, selected: usize, visible_height: usize) {
        let visible_height = visible_height.max(1);
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible_height {
            self.offset = selected + 1 - visible_height;
        }
    }
}

fn label_style(label: &str) -> Style {
    match label {
        "Program" | "Class" | "MainClass" | "Classes" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "Method" | "MethodInvocation" | "MethodCall" => Style::default().fg(DEFAULT_THEME.function),
        "Variable" => Style::default().fg(DEFAULT_THEME.type_name),
        "IntegerLiteral" | "BooleanLiteral" => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn render_tree_line(line: &PrintedLine) -> Line<'_> {
    let text = line.text.as_str();
    let indent_len = text.len() - text.trim_start().len();
    let (indent, rest) = text.split_at(indent_len);

    let label_len = rest
        .find(|c: char| c == ':' || c == ' ' || c == '(')
        .unwrap_or(rest.len());
    let (label, detail) = rest.split_at(label_len);

    Line::from(vec![
        Span::raw(indent),
        Span::styled(label, label_style(label)),
        Span::styled(detail, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the tree pane with `selected` highlighted
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[PrintedLine],
    selected: usize,
    is_focused: bool,
    scroll_state: &mut TreeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    scroll_state.follow(selected, visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut rendered = render_tree_line(line);
            if idx == selected {
                let highlight = Style::default().bg(DEFAULT_THEME.selection_bg);
                for span in &mut rendered.spans {
                    span.style = span.style.patch(highlight);
                }
            }
            rendered
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
