//! # TabBar Component
//!
//! Read / Search / Daily selector. Stateless; the active tab is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Tabs};

use crate::core::state::Tab;
use crate::tui::component::Component;

pub struct TabBar {
    pub active: Tab,
}

impl TabBar {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!(" {} {} ", i + 1, tab.label()));

        let tabs = Tabs::new(titles)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .select(self.active.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(tabs, area);
    }
}
