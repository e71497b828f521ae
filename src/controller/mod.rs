//! # Query Controller
//!
//! The search state machine behind the explorer.
//!
//! ```text
//!            SubmitSearch               2xx + JSON array
//!   Idle ──────────────────▶ Loading ──────────────────▶ Success
//!    ▲                          │ ▲                         │
//!    │ SelectCategory           │ │ SubmitSearch            │
//!    │ (from any state)         ▼ │                         │
//!    └───────────────────── Failure ◀───────────────────────┘
//!                     network / status / parse error
//! ```
//!
//! A success with zero records still carries a "no results" notice in
//! [`QueryState::error`], so the UI checks the result list, not just the phase.

mod state;
mod store;

pub use state::{Intent, Phase, QueryState, NO_RESULTS_NOTICE};
pub use store::QueryController;
