//! # SearchBox Component
//!
//! Single-line query input on the Search tab.
//!
//! The buffer is internal state and survives submission, so the last query
//! stays visible above its results. Scope and focus are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::api::SearchScope;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Enter pressed; carries the whole buffer
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary
    cursor: usize,
    /// Current search scope (Prop)
    pub scope: SearchScope,
    /// Whether keystrokes go here (Prop)
    pub focused: bool,
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scope: SearchScope::default(),
            focused: false,
        }
    }

    /// Visible slice of the buffer and the cursor column within it.
    ///
    /// When the text is wider than the box, the window slides so the cursor
    /// stays on screen.
    fn visible(&self, width: usize) -> (&str, u16) {
        let before = &self.buffer[..self.cursor];
        let mut start = 0;
        let mut cursor_col = before.width();
        for (i, c) in before.char_indices() {
            if cursor_col < width {
                break;
            }
            cursor_col -= c.width().unwrap_or(0);
            start = i + c.len_utf8();
        }
        (&self.buffer[start..], cursor_col as u16)
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("Search (Scope: {})", self.scope.label());
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);

        let (text, cursor_col) = self.visible(inner.width.saturating_sub(1) as usize);
        let paragraph = if text.is_empty() && !self.focused {
            Paragraph::new("Press / to search scripture...").style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(text.to_string()).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(SearchEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(SearchEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(SearchEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
