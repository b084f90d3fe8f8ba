//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading** (chapter or search in flight): draws every ~80ms so the
//!   spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on input, on a finished fetch,
//!   or on terminal resize.
//!
//! ## Fetches
//!
//! `update()` returns `Effect::Fetch` for anything that needs the network.
//! Each fetch runs as its own tokio task and reports back by sending its
//! completion `Action` over an `mpsc` channel, which the loop drains between
//! frames. Fetches are never awaited on the UI thread.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{HttpScriptureClient, Language, ScriptureSource, Verse};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fetch::Fetch;
use crate::core::state::{App, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    PickerEvent, PickerItem, PickerState, SearchBox, SearchEvent, VerseListEvent, VerseListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands; arrows move the verse selection.
    Browse,
    /// Keys edit the search query. Esc returns to Browse.
    Search,
}

/// Picker overlay currently open, if any.
pub enum Overlay {
    Book(PickerState<String>),
    Chapter(PickerState<u32>),
    Language(PickerState<Language>),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // One scroll/selection state per tab
    pub read_list: VerseListState,
    pub search_list: VerseListState,
    pub daily_list: VerseListState,
    pub search_box: SearchBox,
    pub input_mode: InputMode,
    pub overlay: Option<Overlay>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            read_list: VerseListState::new(),
            search_list: VerseListState::new(),
            daily_list: VerseListState::new(),
            search_box: SearchBox::new(),
            input_mode: InputMode::Browse,
            overlay: None,
        }
    }

    fn list_mut(&mut self, tab: Tab) -> &mut VerseListState {
        match tab {
            Tab::Read => &mut self.read_list,
            Tab::Search => &mut self.search_list,
            Tab::Daily => &mut self.daily_list,
        }
    }
}

/// Verses shown on `tab`, in display order.
fn verses_on(app: &App, tab: Tab) -> &[Verse] {
    match tab {
        Tab::Read => &app.verses,
        Tab::Search => &app.search_results,
        Tab::Daily => app.daily_verse.as_slice(),
    }
}

fn book_picker(app: &App) -> PickerState<String> {
    let items = app
        .books
        .iter()
        .map(|book| {
            let item = PickerItem::new(book.display_name(app.language), book.id.clone());
            match book.testament {
                Some(testament) => item.with_tag(testament.label()),
                None => item,
            }
        })
        .collect();
    let current = app.selected_book.as_ref().map(|b| &b.id);
    PickerState::new("Book", items, current)
}

fn chapter_picker(app: &App) -> Option<PickerState<u32>> {
    let book = app.selected_book.as_ref()?;
    let items = book
        .chapter_options()
        .map(|c| PickerItem::new(format!("Chapter {c}"), c))
        .collect();
    Some(PickerState::new(
        format!("{} · Chapter", book.display_name(app.language)),
        items,
        Some(&app.selected_chapter),
    ))
}

fn language_picker(app: &App) -> PickerState<Language> {
    let items = Language::ALL
        .iter()
        .map(|&language| PickerItem::new(language.descriptor().display_name, language).with_tag(language.code()))
        .collect();
    PickerState::new("Language", items, Some(&app.language))
}

/// Maps a picker event to (action, close overlay).
fn picked<T>(event: Option<PickerEvent<T>>, to_action: impl FnOnce(T) -> Action) -> (Option<Action>, bool) {
    match event {
        Some(PickerEvent::Select(value)) => (Some(to_action(value)), true),
        Some(PickerEvent::Dismiss) => (None, true),
        None => (None, false),
    }
}

/// Translates one terminal event into at most one `Action`.
///
/// Only presentation state (`tui`) is touched here; `App` changes go through
/// the returned action and `update()`.
fn handle_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of mode
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // An open picker takes every event
    if let Some(overlay) = tui.overlay.as_mut() {
        let (action, close) = match overlay {
            Overlay::Book(picker) => picked(picker.handle_event(&event), Action::SelectBook),
            Overlay::Chapter(picker) => picked(picker.handle_event(&event), Action::SelectChapter),
            Overlay::Language(picker) => picked(picker.handle_event(&event), Action::SetLanguage),
        };
        if close {
            tui.overlay = None;
        }
        if matches!(action, Some(Action::SelectBook(_) | Action::SelectChapter(_))) {
            tui.read_list = VerseListState::new();
        }
        return action;
    }

    match tui.input_mode {
        InputMode::Search => match event {
            TuiEvent::Escape => {
                tui.input_mode = InputMode::Browse;
                None
            }
            TuiEvent::NextTab | TuiEvent::PrevTab => {
                tui.input_mode = InputMode::Browse;
                handle_event(app, tui, event)
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                tui.search_list.handle_event(&event);
                None
            }
            // Arrows leave the query and walk the results
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                tui.input_mode = InputMode::Browse;
                tui.search_list.handle_event(&event);
                None
            }
            _ => match tui.search_box.handle_event(&event) {
                Some(SearchEvent::Submit(query)) => {
                    tui.input_mode = InputMode::Browse;
                    tui.search_list = VerseListState::new();
                    Some(Action::Search(query))
                }
                Some(SearchEvent::ContentChanged) | None => None,
            },
        },
        InputMode::Browse => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::NextTab => Some(Action::SetTab(app.active_tab.next())),
            TuiEvent::PrevTab => Some(Action::SetTab(app.active_tab.prev())),
            TuiEvent::InputChar(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                Tab::ALL.get(index).map(|&tab| Action::SetTab(tab))
            }
            TuiEvent::InputChar('/') => {
                tui.input_mode = InputMode::Search;
                Some(Action::SetTab(Tab::Search))
            }
            TuiEvent::InputChar('t') => Some(Action::CycleSearchScope),
            TuiEvent::InputChar('l') => {
                tui.overlay = Some(Overlay::Language(language_picker(app)));
                None
            }
            TuiEvent::InputChar('b') if app.active_tab == Tab::Read => {
                if app.books.is_empty() {
                    debug!("Book picker requested before books loaded");
                } else {
                    tui.overlay = Some(Overlay::Book(book_picker(app)));
                }
                None
            }
            TuiEvent::InputChar('c') if app.active_tab == Tab::Read => {
                tui.overlay = chapter_picker(app).map(Overlay::Chapter);
                None
            }
            TuiEvent::InputChar('[') if app.active_tab == Tab::Read => {
                tui.read_list = VerseListState::new();
                Some(Action::PrevChapter)
            }
            TuiEvent::InputChar(']') if app.active_tab == Tab::Read => {
                tui.read_list = VerseListState::new();
                Some(Action::NextChapter)
            }
            _ => {
                let tab = app.active_tab;
                match tui.list_mut(tab).handle_event(&event)? {
                    VerseListEvent::ToggleCrossReferences(index) => verses_on(app, tab)
                        .get(index)
                        .map(|verse| Action::ToggleCrossReferences(verse.id.clone())),
                }
            }
        },
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Show);
    }
}

fn spawn_fetch(fetch: Fetch, source: Arc<dyn ScriptureSource>, tx: mpsc::Sender<Action>) {
    debug!("Spawning {} fetch on {}", fetch.operation().label(), source.name());
    tokio::spawn(async move {
        let action = fetch.perform(source.as_ref()).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    });
}

/// Runs `action` through `update()` and starts whatever it asks for.
/// Returns true when the app should exit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::Fetch(fetches) => {
            for fetch in fetches {
                spawn_fetch(fetch, app.source.clone(), tx.clone());
            }
            false
        }
        Effect::None => false,
    }
}

/// Dispatches a completed fetch. Scroll position on the Search tab is
/// reset only when a current search response was applied.
fn dispatch_completion(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let searching = app.requests.search_in_flight();
    let quit = dispatch(app, action, tx);
    if searching && !app.requests.search_in_flight() {
        tui.search_list = VerseListState::new();
    }
    quit
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn ScriptureSource> = Arc::new(HttpScriptureClient::new(
        &config.backend_url,
        config.request_timeout,
    ));
    info!("Using {} at {}", source.name(), config.backend_url);
    let mut app = App::from_config(source, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Channel for actions from fetch tasks
    let (tx, rx) = mpsc::channel();
    dispatch(&mut app, Action::Start, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        // Sync SearchBox props with App/TUI state
        tui.search_box.scope = app.search_scope;
        tui.search_box.focused = tui.input_mode == InputMode::Search;

        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = handle_event(&app, &mut tui, event)
                && dispatch(&mut app, action, &tx)
            {
                break 'main;
            }
        }

        // Completed fetches
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch_completion(&mut app, &mut tui, action, &tx) {
                break 'main;
            }
        }
    }

    ratatui::restore();
    Ok(())
}
