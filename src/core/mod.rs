//! # Core Application Logic
//!
//! This module contains the reader's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Fetch (requested I/O)│
//!                    │  • project() (views)    │
//!                    │                         │
//!                    │  update() does no I/O.  │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │    API     │
//!            │  Adapter   │            │  client    │
//!            │ (ratatui)  │            │ (reqwest)  │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`fetch`]: Requests the reducer asks for, and their failure policies
//! - [`render`]: Pure projection of a verse into what a card shows
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod fetch;
pub mod render;
pub mod state;
