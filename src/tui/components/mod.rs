//! # TUI Components
//!
//! All UI components for the terminal reader.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: App name, language, status and loading spinner
//! - `TabBar`: Read / Search / Daily selector
//! - `VerseCard`: One verse with its notes and cross-reference panel
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `SearchBox`: Single-line query input
//! - `VerseList`: Scrollable, selectable column of `VerseCard`s
//! - `Picker`: Overlay list for books, chapters and languages
//!
//! Stateful components split into a persistent `…State` that lives in
//! `TuiState` and a transient wrapper built each frame around borrowed state
//! and props.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs
//! ├── tab_bar.rs
//! ├── verse_card.rs
//! ├── verse_list.rs
//! ├── search_box.rs
//! └── picker.rs
//! ```

mod picker;
mod search_box;
mod tab_bar;
mod title_bar;
mod verse_card;
mod verse_list;

pub use picker::{Picker, PickerEvent, PickerItem, PickerState};
pub use search_box::{SearchBox, SearchEvent};
pub use tab_bar::TabBar;
pub use title_bar::TitleBar;
pub use verse_list::{VerseList, VerseListEvent, VerseListState};
