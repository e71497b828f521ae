//! # Content API
//!
//! Everything needed to talk to the public Harry Potter content API:
//!
//! - [`Category`] - the four content partitions
//! - [`SearchRequest`] / [`ContentClient`] - request building and the HTTP fetch
//! - [`Record`] - typed records, one variant per category
//! - [`FetchError`] - network, status and parse failures
//!
//! ## Endpoint
//!
//! ```text
//! GET <base>/<locale>/<category>[?search=<text>]
//! ```
//!
//! The response is a JSON array of records whose shape depends on the category.

pub mod category;
pub mod client;
pub mod error;
pub mod records;

pub use category::{Category, UnknownCategory};
pub use client::{ContentClient, ContentSource, SearchRequest, DEFAULT_BASE_URL, DEFAULT_LOCALE};
pub use error::FetchError;
pub use records::{decode_records, Book, Character, House, Record, Spell};
