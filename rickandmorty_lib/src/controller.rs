//! Debounced search controller.
//!
//! [`SearchController`] owns a background task that is the only writer of
//! [`SearchState`]. Input reaches the task over a channel and state is
//! published through a `watch` channel. Every issued search carries a
//! generation number; a completion is applied only while its generation is
//! still the latest one issued, so responses arriving out of order can never
//! overwrite newer state.

use std::sync::Arc;
use std::time::Duration;

use rickandmorty_api::transport::TransportError;
use rickandmorty_api::types::Character;
use rickandmorty_api::{CharacterSearch, Error, ExecutionResult};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Quiet period the input must stay unchanged before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// What the presentation layer should show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Loaded {
        characters: Vec<Character>,
    },
    Error {
        message: String,
    },
}

/// Handle to a running search task.
///
/// Dropping the handle stops the task and aborts any search in flight.
pub struct SearchController {
    input: mpsc::UnboundedSender<String>,
    query: watch::Sender<String>,
    state: watch::Receiver<SearchState>,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Starts the search task on the current tokio runtime.
    pub fn spawn(client: Arc<dyn CharacterSearch>, debounce: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (query_tx, _) = watch::channel(String::new());
        let (worker, state) = SearchWorker::new(client, debounce, input_rx);
        let task = tokio::spawn(worker.run());
        Self {
            input: input_tx,
            query: query_tx,
            state,
            task,
        }
    }

    /// Records new input text. The text is visible through [`query`](Self::query)
    /// right away; a search follows only once the input has been quiet for
    /// the debounce period.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.query.send_replace(text.clone());
        if self.input.send(text).is_err() {
            tracing::warn!("search task has stopped, input ignored");
        }
    }

    /// Current input text.
    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(self) {
        let Self { input, task, .. } = self;
        drop(input);
        if let Err(e) = task.await {
            tracing::error!("search task ended abnormally: {}", e);
        }
    }
}

/// Maps a failed search to the text shown to the user.
pub fn user_message(error: &Error) -> String {
    match error {
        Error::InvalidUrl(_) => {
            "The search address is invalid. Check the configured API URL.".to_string()
        }
        Error::NoData => "The server sent an empty response.".to_string(),
        Error::Decoding(_) => "The server response could not be understood.".to_string(),
        Error::Http { status: 404, .. } => "No characters found for this search.".to_string(),
        Error::Http { status, .. } if (500..=599).contains(status) => format!(
            "The server is having trouble (HTTP {}). Try again later.",
            status
        ),
        Error::Http { status, .. } => format!("The request was rejected (HTTP {}).", status),
        Error::Transport(TransportError::Timeout) => {
            "The request timed out. Check your connection and try again.".to_string()
        }
        Error::Transport(_) => "Could not reach the server. Check your connection.".to_string(),
        Error::InvalidResponse { .. } => "The server sent an invalid response.".to_string(),
    }
}

struct Completion {
    generation: u64,
    query: String,
    outcome: ExecutionResult<Vec<Character>>,
}

struct SearchWorker {
    client: Arc<dyn CharacterSearch>,
    debounce: Duration,
    input: mpsc::UnboundedReceiver<String>,
    state: watch::Sender<SearchState>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    /// Bumped on every debounced value that changes what should be shown.
    generation: u64,
    last_debounced: Option<String>,
    in_flight: Option<JoinHandle<()>>,
}

impl SearchWorker {
    fn new(
        client: Arc<dyn CharacterSearch>,
        debounce: Duration,
        input: mpsc::UnboundedReceiver<String>,
    ) -> (Self, watch::Receiver<SearchState>) {
        let (state_tx, state_rx) = watch::channel(SearchState::Idle);
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let worker = Self {
            client,
            debounce,
            input,
            state: state_tx,
            completions_tx,
            completions,
            generation: 0,
            last_debounced: None,
            in_flight: None,
        };
        (worker, state_rx)
    }

    async fn run(mut self) {
        let quiet_period = time::sleep(self.debounce);
        tokio::pin!(quiet_period);
        let mut pending: Option<String> = None;

        loop {
            tokio::select! {
                input = self.input.recv() => match input {
                    Some(text) => {
                        quiet_period.as_mut().reset(Instant::now() + self.debounce);
                        pending = Some(text);
                    }
                    None => break,
                },
                () = &mut quiet_period, if pending.is_some() => {
                    if let Some(text) = pending.take() {
                        self.on_debounced(text);
                    }
                }
                Some(done) = self.completions.recv() => self.on_completed(done),
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        tracing::debug!("search controller stopped");
    }

    fn on_debounced(&mut self, text: String) {
        if self.last_debounced.as_deref() == Some(text.as_str()) {
            tracing::debug!(query = %text, "query unchanged, search skipped");
            return;
        }
        self.last_debounced = Some(text.clone());
        self.generation += 1;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }

        if text.trim().is_empty() {
            self.publish(SearchState::Idle);
            return;
        }

        let generation = self.generation;
        tracing::debug!(query = %text, generation, "issuing search");
        self.publish(SearchState::Loading {
            query: text.clone(),
        });

        let client = Arc::clone(&self.client);
        let done = self.completions_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = client.search_by_name(&text).await;
            // The worker may already be gone; nothing left to update then.
            let _ = done.send(Completion {
                generation,
                query: text,
                outcome,
            });
        }));
    }

    fn on_completed(&mut self, done: Completion) {
        if done.generation != self.generation {
            tracing::debug!(
                query = %done.query,
                generation = done.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return;
        }
        self.in_flight = None;

        let next = match done.outcome.result {
            Ok(characters) => {
                tracing::debug!(query = %done.query, count = characters.len(), "search finished");
                SearchState::Loaded { characters }
            }
            Err(e) => {
                tracing::warn!(query = %done.query, "search failed: {}", e);
                SearchState::Error {
                    message: user_message(&e),
                }
            }
        };
        self.publish(next);
    }

    fn publish(&self, next: SearchState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
