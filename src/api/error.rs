use thiserror::Error;

/// Ways a fetch against the content API can fail.
///
/// Causes are kept as strings so outcomes can be cloned and compared; the
/// controller only ever shows them to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or no response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived with a non-success status.
    #[error("HTTP error: server responded with status {status}")]
    Http { status: u16 },

    /// The body was not a JSON array of records.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The fetch task ended without producing an outcome.
    #[error("Request interrupted: {0}")]
    Interrupted(String),
}

impl FetchError {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
