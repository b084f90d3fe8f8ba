//! # TitleBar Component
//!
//! Top status line: app name, current language, status message, and a
//! spinner while a chapter or search request is outstanding.
//!
//! Stateless. Everything it shows is passed in as props, so it doesn't care
//! whether a value came from `App` or from the TUI layer.
//!
//! Text priority, most important first:
//!
//! 1. **Loading**: `"Lectio · English | ⠋ Loading..."`
//! 2. **Status message**: `"Lectio · English | Found 3 results"`
//! 3. **Default**: `"Lectio · English"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    /// Display name of the current language (e.g. "עברית")
    pub language_name: String,
    /// Transient status (e.g. "Found 3 results")
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(
        language_name: String,
        status_message: String,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            language_name,
            status_message,
            is_loading,
            spinner_frame,
        }
    }

    fn status_text(&self) -> Option<String> {
        if self.is_loading {
            Some(format!(
                "{} Loading...",
                SPINNER[self.spinner_frame % SPINNER.len()]
            ))
        } else if self.status_message.is_empty() {
            None
        } else {
            Some(self.status_message.clone())
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Lectio",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" · "),
            Span::raw(self.language_name.clone()),
        ];
        if let Some(status) = self.status_text() {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(status));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_loading_beats_status() {
        let mut title_bar = TitleBar::new("English".into(), "Found 3 results".into(), true, 0);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Lectio"));
        assert!(text.contains("Loading..."));
        assert!(!text.contains("Found 3 results"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("Greek".into(), "Found 3 results".into(), false, 0);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Greek"));
        assert!(text.contains("Found 3 results"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("English".into(), String::new(), false, 0);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Lectio"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_spinner_wraps() {
        let title_bar = TitleBar::new("English".into(), String::new(), true, SPINNER.len() + 1);
        assert_eq!(title_bar.status_text().unwrap(), format!("{} Loading...", SPINNER[1]));
    }
}
