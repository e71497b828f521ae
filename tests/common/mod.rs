//! Shared helpers for integration tests.

#![allow(dead_code)]

use hp_explorer::api::{ContentSource, FetchError, Record, SearchRequest, Spell};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// One scripted answer: optionally wait for a gate, then return the outcome.
pub struct Step {
    pub gate: Option<Arc<Notify>>,
    pub outcome: Result<Vec<Record>, FetchError>,
}

/// Content source that answers requests from a script, in order.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    steps: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<SearchRequest>>>,
    finished: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate answer.
    pub fn then(self, outcome: Result<Vec<Record>, FetchError>) -> Self {
        self.push(Step {
            gate: None,
            outcome,
        });
        self
    }

    /// Queue an answer that is held until the returned gate is notified.
    pub fn then_gated(&self, outcome: Result<Vec<Record>, FetchError>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Step {
            gate: Some(Arc::clone(&gate)),
            outcome,
        });
        gate
    }

    fn push(&self, step: Step) {
        self.steps.lock().expect("steps lock").push_back(step);
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ContentSource for ScriptedSource {
    async fn fetch(&self, request: &SearchRequest) -> Result<Vec<Record>, FetchError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        let step = self.steps.lock().expect("steps lock").pop_front();

        let outcome = match step {
            Some(step) => {
                if let Some(gate) = step.gate {
                    gate.notified().await;
                }
                step.outcome
            }
            None => Err(FetchError::Network("no scripted response".to_string())),
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

pub fn spell(name: &str) -> Record {
    Record::Spell(Spell {
        spell: Some(name.to_string()),
        ..Spell::default()
    })
}

/// Yield to the runtime until `done` holds (bounded so a bug fails instead of hanging).
pub async fn yield_until(mut done: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

/// Serve exactly one HTTP response on a random local port.
///
/// Returns the base URL and a handle resolving to the request line received.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            if n == 0 {
                break;
            }
            received.extend_from_slice(&chunk[..n]);
            if received.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&received)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}", addr), handle)
}

/// A base URL nothing is listening on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
