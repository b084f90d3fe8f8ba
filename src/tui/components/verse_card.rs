use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::api::{TextDirection, Typography};
use crate::core::render::VerseView;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A single verse: text, transliteration, notes and the cross-reference panel.
///
/// Transient, like the other list items: built each frame from a
/// [`VerseView`], which already decided what is visible. The card only lays it
/// out.
///
/// Lines are wrapped up front with `textwrap` rather than by `Paragraph`, so
/// that each line can carry its own alignment (right-to-left languages are
/// right-aligned) and so [`calculate_height`](Self::calculate_height) is exact.
#[derive(Clone, Copy)]
pub struct VerseCard<'a> {
    pub view: &'a VerseView<'a>,
    pub is_selected: bool,
    /// A cross-reference fetch for this verse is outstanding
    pub is_fetching: bool,
}

impl<'a> VerseCard<'a> {
    pub fn new(view: &'a VerseView<'a>, is_selected: bool, is_fetching: bool) -> Self {
        Self {
            view,
            is_selected,
            is_fetching,
        }
    }

    pub fn calculate_height(view: &VerseView, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let lines = build_lines(view, content_width as usize);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn header(&self) -> String {
        let marker = if self.view.cross_references_open {
            "▼"
        } else {
            "▶"
        };
        let mut header = format!("Cross References {}", marker);
        if self.view.reference_count > 0 {
            header.push_str(&format!(" ({})", self.view.reference_count));
        }
        if self.is_fetching {
            header.push_str(" …");
        }
        header
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let options = textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text.trim(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

fn text_style(typography: Typography) -> Style {
    match typography {
        Typography::Serif => Style::default().fg(Color::White),
        Typography::Sans => Style::default().fg(Color::LightCyan),
        Typography::Monospace => Style::default().fg(Color::LightYellow),
    }
}

fn alignment(direction: TextDirection) -> Alignment {
    match direction {
        TextDirection::LeftToRight => Alignment::Left,
        TextDirection::RightToLeft => Alignment::Right,
    }
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style, align: Alignment) {
    for row in wrap(text, width) {
        lines.push(Line::from(Span::styled(row, style)).alignment(align));
    }
}

fn push_heading(lines: &mut Vec<Line<'static>>, heading: &'static str, color: Color) {
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        heading,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
}

/// Every row the card body shows, already wrapped to `width`.
fn build_lines(view: &VerseView, width: usize) -> Vec<Line<'static>> {
    let style = text_style(view.descriptor.typography);
    let align = alignment(view.descriptor.direction);
    let mut lines = Vec::new();

    push_wrapped(&mut lines, view.text, width, style, align);

    if let Some(transliteration) = view.transliteration {
        lines.push(Line::default());
        push_wrapped(
            &mut lines,
            transliteration,
            width,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            align,
        );
    }

    let note_style = Style::default().fg(Color::Yellow);
    if let Some(commentary) = view.commentary {
        push_heading(&mut lines, "Commentary:", Color::Yellow);
        push_wrapped(&mut lines, commentary, width, note_style, Alignment::Left);
    }
    if let Some(study_notes) = view.study_notes {
        push_heading(&mut lines, "Study Notes:", Color::Yellow);
        push_wrapped(&mut lines, study_notes, width, note_style, Alignment::Left);
    }

    if let Some(related) = &view.cross_references {
        push_heading(&mut lines, "Related Verses:", Color::Blue);
        if related.is_empty() {
            lines.push(Line::from(Span::styled(
                "No related verses",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for verse in related {
            lines.push(Line::from(Span::styled(
                verse.citation.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            push_wrapped(&mut lines, verse.text, width, style, align);
        }
    }

    lines
}

impl Widget for VerseCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_top(Line::from(Span::styled(
                self.view.citation.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )))
            .title_top(Line::from(Span::styled(self.header(), border_style)).right_aligned())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let lines = build_lines(self.view, inner_area.width as usize);
        Paragraph::new(lines).render(inner_area, buf);
    }
}

impl Component for VerseCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
