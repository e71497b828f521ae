//! Harry Potter Explorer - browse the Wizarding World from the terminal
//!
//! This library provides the content API client, the query controller that
//! drives searches, and the TUI that renders results as cards.

pub mod api;
pub mod config;
pub mod controller;
pub mod logging;
pub mod ui;
