use crate::api::records::{decode_records, Record};
use crate::api::{Category, FetchError};
use anyhow::{bail, Context, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

/// Public instance of the content API.
pub const DEFAULT_BASE_URL: &str = "https://potterapi-fedeperin.vercel.app";

pub const DEFAULT_LOCALE: &str = "en";

/// A single search submission: which partition to query and the (trimmed) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub category: Category,
    pub query: String,
}

impl SearchRequest {
    pub fn new(category: Category, query: &str) -> Self {
        Self {
            category,
            query: query.trim().to_string(),
        }
    }

    /// The `search` parameter, absent when the query is blank.
    pub fn search_term(&self) -> Option<&str> {
        if self.query.is_empty() {
            None
        } else {
            Some(&self.query)
        }
    }
}

/// Anything that can answer a [`SearchRequest`] with records.
///
/// The controller is generic over this so it can run against the real API
/// or against canned responses.
pub trait ContentSource: Send + Sync + 'static {
    fn fetch(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<Record>, FetchError>> + Send;
}

/// HTTP client for the content API.
#[derive(Debug, Clone)]
pub struct ContentClient {
    base_url: Url,
    locale: String,
    http: reqwest::Client,
}

impl ContentClient {
    /// Build a client for `base_url`. No timeout is applied unless one is given.
    pub fn new(base_url: &str, locale: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {}", base_url);
        }

        let locale = locale.trim();
        if locale.is_empty() {
            bail!("Locale must not be empty");
        }

        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url,
            locale: locale.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// `<base>/<locale>/<category>`, plus `?search=<text>` when the query is not blank.
    pub fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        // new() rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.locale)
                .push(request.category.as_str());
        }

        if let Some(term) = request.search_term() {
            url.set_query(Some(&format!("search={}", encode_query_value(term))));
        }

        url
    }
}

/// Percent-encode a query value, spaces as `%20` rather than `+`.
fn encode_query_value(value: &str) -> String {
    // byte_serialize writes a literal '+' as %2B, so every '+' left is a space
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

impl ContentSource for ContentClient {
    async fn fetch(&self, request: &SearchRequest) -> Result<Vec<Record>, FetchError> {
        let url = self.request_url(request);
        debug!(%url, "fetching records");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "content API returned an error status");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let records = decode_records(request.category, &body)?;
        info!(%url, count = records.len(), "fetched records");
        Ok(records)
    }
}
