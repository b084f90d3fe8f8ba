//! Frame layout: title, tabs, the active tab's body, a help line, and any
//! open picker on top.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::{App, Tab};
use crate::tui::component::Component;
use crate::tui::components::{Picker, TabBar, TitleBar, VerseList};
use crate::tui::{InputMode, Overlay, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let area = frame.area();
    let [title_area, tabs_area, main_area, help_area] =
        Layout::vertical([Length(1), Length(3), Min(0), Length(1)]).areas(area);

    TitleBar::new(
        app.language.descriptor().display_name.to_string(),
        app.status_message.clone(),
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, title_area);
    TabBar::new(app.active_tab).render(frame, tabs_area);

    match app.active_tab {
        Tab::Read => draw_read(frame, main_area, app, tui),
        Tab::Search => draw_search(frame, main_area, app, tui),
        Tab::Daily => draw_daily(frame, main_area, app, tui),
    }

    frame.render_widget(help_line(app.active_tab, tui.input_mode), help_area);

    match tui.overlay.as_mut() {
        Some(Overlay::Book(state)) => Picker::new(state).render(frame, area),
        Some(Overlay::Chapter(state)) => Picker::new(state).render(frame, area),
        Some(Overlay::Language(state)) => Picker::new(state).render(frame, area),
        None => {}
    }
}

fn hint(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

fn draw_read(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let header = match &app.selected_book {
        Some(book) => Line::from(vec![
            Span::styled(
                book.display_name(app.language).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " · Chapter {} of {}",
                app.selected_chapter, book.chapters
            )),
        ]),
        None if app.books.is_empty() => Line::from("Loading books..."),
        None => Line::from("Press b to choose a book"),
    };
    let header = Paragraph::new(header).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Passage"),
    );
    frame.render_widget(header, header_area);

    if app.requests.chapter_in_flight() {
        frame.render_widget(hint("Loading chapter..."), body_area);
    } else if app.selected_book.is_none() {
        frame.render_widget(hint("Select a book and chapter to begin reading"), body_area);
    } else if app.verses.is_empty() {
        frame.render_widget(hint("No verses to show"), body_area);
    } else {
        VerseList::new(&mut tui.read_list, &app.verses, app.language, &app.cross_refs)
            .render(frame, body_area);
    }
}

/// "Found 3 results", plus the server total when it is larger.
fn result_summary(app: &App) -> String {
    let shown = app.search_results.len();
    match app.search_total {
        Some(total) if total > shown as u64 => {
            format!("Found {} results (showing {})", total, shown)
        }
        _ => format!("Found {} results", shown),
    }
}

fn draw_search(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [box_area, summary_area, body_area] =
        Layout::vertical([Length(3), Length(1), Min(0)]).areas(area);

    tui.search_box.render(frame, box_area);

    if app.requests.search_in_flight() {
        frame.render_widget(hint("Searching..."), summary_area);
    } else if !app.search_results.is_empty() {
        let summary = Paragraph::new(result_summary(app)).style(Style::default().fg(Color::Gray));
        frame.render_widget(summary, summary_area);
        VerseList::new(
            &mut tui.search_list,
            &app.search_results,
            app.language,
            &app.cross_refs,
        )
        .render(frame, body_area);
    }
}

fn draw_daily(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let [heading_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let today = Local::now().format("%A, %B %-d, %Y").to_string();
    let heading = Line::from(vec![
        Span::styled(
            "Verse of the Day",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", today), Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(heading).alignment(Alignment::Center), heading_area);

    match &app.daily_verse {
        Some(verse) => VerseList::new(
            &mut tui.daily_list,
            std::slice::from_ref(verse),
            app.language,
            &app.cross_refs,
        )
        .render(frame, body_area),
        None => frame.render_widget(hint("No daily verse available"), body_area),
    }
}

fn help_line(tab: Tab, mode: InputMode) -> Line<'static> {
    let keys: &[(&str, &str)] = match (mode, tab) {
        (InputMode::Search, _) => &[("Enter", "search"), ("Esc", "done"), ("Tab", "switch tab")],
        (InputMode::Browse, Tab::Read) => &[
            ("b", "book"),
            ("c", "chapter"),
            ("[ ]", "prev/next"),
            ("↑↓", "select"),
            ("Enter", "cross refs"),
            ("l", "language"),
            ("/", "search"),
            ("q", "quit"),
        ],
        (InputMode::Browse, Tab::Search) => &[
            ("/", "edit query"),
            ("t", "scope"),
            ("↑↓", "select"),
            ("Enter", "cross refs"),
            ("l", "language"),
            ("q", "quit"),
        ],
        (InputMode::Browse, Tab::Daily) => &[
            ("↑↓", "select"),
            ("Enter", "cross refs"),
            ("l", "language"),
            ("/", "search"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{} ", label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_books, sample_verse, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_read_tab_before_books_arrive() {
        let app = test_app();
        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("Welcome to Lectio"));
        assert!(text.contains("Loading books..."));
    }

    #[test]
    fn test_read_tab_shows_chapter() {
        let mut app = test_app();
        app.books = sample_books();
        app.selected_book = app.books.first().cloned();
        app.verses = vec![sample_verse("gen-1-1", "Genesis", 1, 1)];

        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("Chapter 1 of 50"));
        assert!(text.contains("Genesis 1:1"));
        assert!(text.contains("In the beginning"));
    }

    #[test]
    fn test_search_tab_summarises_results() {
        let mut app = test_app();
        app.active_tab = Tab::Search;
        app.search_results = vec![sample_verse("v1", "John", 3, 16)];
        app.search_total = Some(40);

        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("Found 40 results (showing 1)"));
        assert!(text.contains("John 3:16"));
    }

    #[test]
    fn test_daily_tab_without_verse() {
        let mut app = test_app();
        app.active_tab = Tab::Daily;
        let text = draw(&app, &mut TuiState::new());
        assert!(text.contains("Verse of the Day"));
        assert!(text.contains("No daily verse available"));
    }

    #[test]
    fn test_help_line_follows_mode() {
        let mut tui = TuiState::new();
        tui.input_mode = InputMode::Search;
        let mut app = test_app();
        app.active_tab = Tab::Search;
        let text = draw(&app, &mut tui);
        assert!(text.contains("Esc"));
        assert!(!text.contains("quit"));
    }
}
