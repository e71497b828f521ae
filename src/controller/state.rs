use crate::api::{Category, FetchError, Record, SearchRequest};

/// Prefix of the notice shown when a search succeeds with zero records.
pub const NO_RESULTS_NOTICE: &str = "No results found";

/// Where the controller is in the search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// A user intent emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectCategory(Category),
    ChangeQueryText(String),
    SubmitSearch,
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    pub category: Category,
    pub search_query: String,
    pub results: Vec<Record>,
    pub error: Option<String>,
    pub phase: Phase,
}

impl QueryState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// True strictly between a submit and its completion.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The error to show, if any. Hidden while loading.
    pub fn visible_error(&self) -> Option<&str> {
        if self.is_loading() {
            None
        } else {
            self.error.as_deref()
        }
    }

    /// The records to show. Empty while loading or when an error is active.
    pub fn visible_results(&self) -> &[Record] {
        if self.is_loading() || self.error.is_some() {
            &[]
        } else {
            &self.results
        }
    }

    pub(crate) fn begin_loading(&mut self) {
        self.error = None;
        self.phase = Phase::Loading;
    }

    pub(crate) fn reset_for_category(&mut self, category: Category, clear_query: bool) {
        self.category = category;
        self.results.clear();
        self.error = None;
        self.phase = Phase::Idle;
        if clear_query {
            self.search_query.clear();
        }
    }

    /// Apply the outcome of `request`. Messages name the request's category.
    pub(crate) fn complete(
        &mut self,
        request: &SearchRequest,
        outcome: Result<Vec<Record>, FetchError>,
    ) {
        match outcome {
            Ok(records) => {
                self.error = if records.is_empty() {
                    Some(no_results_message(request.category, &request.query))
                } else {
                    None
                };
                self.results = records;
                self.phase = Phase::Success;
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(format!("Could not load {}: {}", request.category, err));
                self.phase = Phase::Failure;
            }
        }
    }
}

fn no_results_message(category: Category, query: &str) -> String {
    if query.is_empty() {
        format!("{} in {}.", NO_RESULTS_NOTICE, category)
    } else {
        format!("{} for \"{}\" in {}.", NO_RESULTS_NOTICE, query, category)
    }
}
