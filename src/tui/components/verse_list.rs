//! # VerseList Component
//!
//! Scrollable column of verse cards, used by all three tabs.
//!
//! ## Architecture
//!
//! `VerseList` is a transient component (created each frame) that wraps
//! `&'a mut VerseListState` (persistent state) plus the verses and the bits
//! of `App` needed to project them.
//!
//! Heights are recomputed every frame. A chapter is at most a few hundred
//! verses and toggling a panel or switching language changes heights anyway,
//! so there is nothing worth caching.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::{Language, Verse};
use crate::core::render::{VerseView, project};
use crate::core::state::CrossReferenceState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::verse_card::VerseCard;
use crate::tui::event::TuiEvent;

/// Emitted when the user acts on the selected card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseListEvent {
    /// Index into the list that was rendered last.
    ToggleCrossReferences(usize),
}

/// Scroll and selection state for one verse list.
/// Must be persisted in the parent TuiState.
pub struct VerseListState {
    pub scroll_state: ScrollViewState,
    pub selected_index: Option<usize>,
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for VerseListState {
    fn default() -> Self {
        Self::new()
    }
}

impl VerseListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected_index: None,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            viewport_height: 0,
        }
    }

    fn item_count(&self) -> usize {
        self.heights.len()
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected card is fully visible.
    /// If the card is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }

        let item_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let item_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    fn select_next(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + 1).min(count - 1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    fn select_prev(&mut self) {
        if self.item_count() == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
        self.scroll_to_selected();
    }

    /// Range of items intersecting the viewport (plus half a screen either side).
    fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

/// Scrollable verse view. Created fresh each frame.
pub struct VerseList<'a> {
    pub state: &'a mut VerseListState,
    pub verses: &'a [Verse],
    pub language: Language,
    pub cross_refs: &'a CrossReferenceState,
}

impl<'a> VerseList<'a> {
    pub fn new(
        state: &'a mut VerseListState,
        verses: &'a [Verse],
        language: Language,
        cross_refs: &'a CrossReferenceState,
    ) -> Self {
        Self {
            state,
            verses,
            language,
            cross_refs,
        }
    }
}

impl Component for VerseList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        let views: Vec<VerseView> = self
            .verses
            .iter()
            .map(|verse| project(verse, self.language, self.cross_refs))
            .collect();

        self.state.heights = views
            .iter()
            .map(|view| VerseCard::calculate_height(view, content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        if let Some(idx) = self.state.selected_index
            && idx >= views.len()
        {
            self.state.selected_index = views.len().checked_sub(1);
        }

        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let total_height = self.state.total_height();
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let view = &views[i];
            let height = self.state.heights[i];
            let card = VerseCard::new(
                view,
                self.state.selected_index == Some(i),
                self.cross_refs.is_pending(&self.verses[i].id),
            );
            scroll_view.render_widget(card, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for VerseListState {
    type Event = VerseListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
                None
            }
            TuiEvent::CursorUp => {
                self.select_prev();
                None
            }
            TuiEvent::CursorDown => {
                self.select_next();
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar('x') => self
                .selected_index
                .filter(|&i| i < self.item_count())
                .map(VerseListEvent::ToggleCrossReferences),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_verse;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn chapter(n: u32) -> Vec<Verse> {
        (1..=n)
            .map(|v| sample_verse(&format!("gen-1-{}", v), "Genesis", 1, v))
            .collect()
    }

    fn render(state: &mut VerseListState, verses: &[Verse], refs: &CrossReferenceState, height: u16) -> String {
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                VerseList::new(state, verses, Language::English, refs).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_render_lays_out_cards_in_order() {
        let verses = chapter(2);
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        let text = render(&mut state, &verses, &refs, 20);

        assert_eq!(state.heights.len(), 2);
        assert_eq!(state.prefix_heights[1], state.heights[0] + state.heights[1]);
        let first = text.find("Genesis 1:1").unwrap();
        let second = text.find("Genesis 1:2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_cursor_moves_selection_within_bounds() {
        let verses = chapter(3);
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        render(&mut state, &verses, &refs, 10);

        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_index, Some(0));
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_index, Some(2));
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected_index, Some(1));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let verses = chapter(5);
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        render(&mut state, &verses, &refs, 8);

        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        let bottom = state.prefix_heights[4];
        let offset = state.scroll_state.offset().y;
        assert!(offset + state.viewport_height >= bottom);
    }

    #[test]
    fn test_submit_toggles_selected_card() {
        let verses = chapter(2);
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        render(&mut state, &verses, &refs, 20);

        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('x')),
            Some(VerseListEvent::ToggleCrossReferences(1))
        );
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        render(&mut state, &chapter(3), &refs, 20);
        state.selected_index = Some(2);

        render(&mut state, &chapter(1), &refs, 20);
        assert_eq!(state.selected_index, Some(0));

        render(&mut state, &[], &refs, 20);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_scroll_never_passes_content() {
        let verses = chapter(2);
        let refs = CrossReferenceState::default();
        let mut state = VerseListState::new();
        render(&mut state, &verses, &refs, 40);

        for _ in 0..10 {
            state.handle_event(&TuiEvent::ScrollPageDown);
        }
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
