//! # UI Module
//!
//! This module provides the terminal user interface for the explorer.
//!
//! ## Components
//!
//! - [`App`] - TUI state (selection, edit mode, theme) and key mapping
//! - [`mod@card`] - record to card mapping
//! - [`mod@render`] - rendering functions for drawing the TUI
//! - [`theme`] - built-in color themes
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           ⚡ Harry Potter Explorer ⚡            │
//! ├─────────────────────────────────────────────────┤
//! │  Characters   Spells   Houses   Books           │
//! ├─────────────────────────────────────────────────┤
//! │  🔍 Search                                       │
//! ├─────────────────────┬───────────────────────────┤
//! │                     │                           │
//! │   Result List       │      Card Details         │
//! │                     │                           │
//! ├─────────────────────┴───────────────────────────┤
//! │                    Footer                        │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! While a search is loading the body shows a spinner; an error or
//! "no results" notice replaces the result list.

pub mod app;
pub mod card;
pub mod render;
pub mod theme;

pub use app::{Action, App};
pub use card::{Card, CardField};
pub use render::render;
