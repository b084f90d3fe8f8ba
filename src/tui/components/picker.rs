//! # Picker Component
//!
//! Centered overlay list used for choosing a book, a chapter, or a language.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState<T>` lives in `TuiState` while the overlay is open
//! - `Picker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::event::TuiEvent;

/// Rows moved by PgUp/PgDn.
const PAGE_STEP: usize = 10;

/// One selectable row.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerItem<T> {
    pub label: String,
    /// Dim suffix, e.g. a book's testament
    pub tag: Option<String>,
    pub value: T,
}

impl<T> PickerItem<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            tag: None,
            value,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Events emitted by a picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent<T> {
    Select(T),
    Dismiss,
}

/// Persistent state for a picker overlay.
pub struct PickerState<T> {
    pub title: String,
    pub items: Vec<PickerItem<T>>,
    pub selected: usize,
    /// Row matching the current value, marked with `*`
    pub active: Option<usize>,
    pub list_state: ListState,
}

impl<T: Clone + PartialEq> PickerState<T> {
    /// Opens with the cursor on `current` when it is one of the items.
    pub fn new(title: impl Into<String>, items: Vec<PickerItem<T>>, current: Option<&T>) -> Self {
        let active = current.and_then(|value| items.iter().position(|item| &item.value == value));
        let selected = active.unwrap_or(0);
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            title: title.into(),
            items,
            selected,
            active,
            list_state,
        }
    }

    fn move_to(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = index.min(self.items.len() - 1);
        self.list_state.select(Some(self.selected));
    }

    /// Handle a key event, returning a PickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent<T>> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.move_to(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.move_to(self.selected + 1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.move_to(self.selected.saturating_sub(PAGE_STEP));
                None
            }
            TuiEvent::ScrollPageDown => {
                self.move_to(self.selected + PAGE_STEP);
                None
            }
            TuiEvent::Submit => self
                .items
                .get(self.selected)
                .map(|item| PickerEvent::Select(item.value.clone())),
            _ => None,
        }
    }
}

/// Transient render wrapper for a picker overlay.
pub struct Picker<'a, T> {
    state: &'a mut PickerState<T>,
}

impl<'a, T> Picker<'a, T> {
    pub fn new(state: &'a mut PickerState<T>) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 70, area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.state.title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.items.is_empty() {
            let empty = Paragraph::new("Nothing to choose from yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_active = self.state.active == Some(i);
                let marker = if is_active { " *" } else { "" };
                let tag = item
                    .tag
                    .as_deref()
                    .map(|t| format!("  {t}"))
                    .unwrap_or_default();
                let label_width = inner_width
                    .saturating_sub(marker.len())
                    .saturating_sub(tag.width());
                let label = truncate_str(&item.label, label_width);

                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let mut spans = vec![Span::styled(label, style)];
                if !tag.is_empty() {
                    spans.push(Span::styled(
                        tag,
                        if i == self.state.selected {
                            style
                        } else {
                            Style::default().fg(Color::DarkGray)
                        },
                    ));
                }
                if is_active {
                    spans.push(Span::styled(marker, style));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
