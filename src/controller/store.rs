use crate::api::{Category, ContentSource, FetchError, Record, SearchRequest};
use crate::controller::state::{Intent, QueryState};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Result of one fetch, tagged with the submission it answers.
#[derive(Debug)]
struct Completion {
    generation: u64,
    request: SearchRequest,
    outcome: Result<Vec<Record>, FetchError>,
}

/// The fetch currently running and what it was asked for.
#[derive(Debug)]
struct InFlight {
    request: SearchRequest,
    task: JoinHandle<()>,
}

/// Owns the search state and drives fetches against a [`ContentSource`].
///
/// Intents are applied synchronously through [`QueryController::dispatch`].
/// Fetches run on spawned tasks and report back over a channel; the owner
/// applies them with [`QueryController::drain_completions`] or
/// [`QueryController::wait_for_completion`]. A new submit aborts the request
/// in flight and any answer that still arrives for it is discarded.
///
/// `dispatch` must be called from within a tokio runtime.
pub struct QueryController<S> {
    source: Arc<S>,
    state: watch::Sender<QueryState>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    generation: u64,
    in_flight: Option<InFlight>,
    clear_query_on_category_change: bool,
}

impl<S: ContentSource> QueryController<S> {
    pub fn new(source: S, category: Category) -> Self {
        let (state, _) = watch::channel(QueryState::new(category));
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            state,
            completion_tx,
            completion_rx,
            generation: 0,
            in_flight: None,
            clear_query_on_category_change: false,
        }
    }

    /// Also clear the typed text whenever the category changes.
    pub fn with_query_reset(mut self, clear: bool) -> Self {
        self.clear_query_on_category_change = clear;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.subscribe()
    }

    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");
        match intent {
            Intent::SelectCategory(category) => self.select_category(category),
            Intent::ChangeQueryText(text) => self.change_query_text(text),
            Intent::SubmitSearch => self.submit_search(),
        }
    }

    fn select_category(&mut self, category: Category) {
        self.cancel_in_flight();
        let clear_query = self.clear_query_on_category_change;
        self.state
            .send_modify(|state| state.reset_for_category(category, clear_query));
        info!(%category, "category selected");
    }

    fn change_query_text(&mut self, text: String) {
        self.state.send_if_modified(|state| {
            if state.search_query == text {
                false
            } else {
                state.search_query = text;
                true
            }
        });
    }

    fn submit_search(&mut self) {
        self.cancel_in_flight();

        let request = {
            let state = self.state.borrow();
            SearchRequest::new(state.category, &state.search_query)
        };
        self.state.send_modify(QueryState::begin_loading);
        info!(category = %request.category, query = %request.query, generation = self.generation, "search submitted");

        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        let generation = self.generation;
        let task_request = request.clone();
        let task = tokio::spawn(async move {
            let outcome = source.fetch(&task_request).await;
            // The receiver lives as long as the controller; a send error only
            // means the controller is gone.
            let _ = tx.send(Completion {
                generation,
                request: task_request,
                outcome,
            });
        });
        self.in_flight = Some(InFlight { request, task });
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.task.is_finished() {
                debug!(generation = self.generation, "aborting request in flight");
            }
            in_flight.task.abort();
        }
        // anything already queued for the old generation is dropped on arrival
        self.generation += 1;
    }

    /// Apply a completion. Returns false when it answered a superseded request.
    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            debug!(
                stale = completion.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }

        self.in_flight = None;
        match &completion.outcome {
            Ok(records) => info!(count = records.len(), "search completed"),
            Err(err) => info!(error = %err, "search failed"),
        }
        let Completion {
            request, outcome, ..
        } = completion;
        self.state.send_modify(|state| state.complete(&request, outcome));
        true
    }

    /// The current task ended without sending anything (it panicked or was
    /// aborted elsewhere). Fail the search so loading always ends.
    fn abandon_in_flight(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        warn!(
            generation = self.generation,
            "search task ended without a response"
        );
        let outcome = Err(FetchError::Interrupted(
            "the search task stopped before a response arrived".to_string(),
        ));
        self.state
            .send_modify(|state| state.complete(&in_flight.request, outcome));
    }

    /// Apply every completion that has already arrived without waiting.
    /// Returns true if the state changed.
    pub fn drain_completions(&mut self) -> bool {
        // a finished task has already queued its completion, if it sent one
        let task_ended = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.task.is_finished());

        let mut applied = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            applied |= self.apply(completion);
        }

        if task_ended && self.in_flight.is_some() {
            self.abandon_in_flight();
            applied = true;
        }
        applied
    }

    /// Wait until the current request completes and apply it.
    /// Returns immediately when nothing is in flight.
    pub async fn wait_for_completion(&mut self) {
        while let Some(in_flight) = self.in_flight.as_mut() {
            if let Err(err) = (&mut in_flight.task).await {
                warn!(error = %err, "search task failed");
            }
            self.drain_completions();
        }
    }
}

impl<S> Drop for QueryController<S> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}
