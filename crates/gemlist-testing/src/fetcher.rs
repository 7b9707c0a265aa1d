//! Scripted `Fetcher` for deterministic session tests.
//!
//! Responses are consumed in request order. A gated response does not
//! resolve until the test releases it, which lets a test finish requests
//! out of order.

use gemlist_runtime::{FetchError, FetchRequest, Fetcher};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tokio::sync::oneshot;

type Outcome = Result<Value, FetchError>;

enum Script {
    Ready(Outcome),
    Gated(oneshot::Receiver<Outcome>),
}

/// Releases a gated response.
pub struct Gate(oneshot::Sender<Outcome>);

impl Gate {
    pub fn respond(self, raw: Value) {
        let _ = self.0.send(Ok(raw));
    }

    pub fn fail(self, err: FetchError) {
        let _ = self.0.send(Err(err));
    }
}

#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate successful response.
    pub fn respond(&self, raw: Value) -> &Self {
        self.push(Script::Ready(Ok(raw)));
        self
    }

    /// Queue an immediate failure.
    pub fn fail(&self, err: FetchError) -> &Self {
        self.push(Script::Ready(Err(err)));
        self
    }

    /// Queue a response that waits for the returned gate.
    pub fn gate(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(Script::Gated(rx));
        Gate(tx)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(&self, script: Script) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(script);
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<Value, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        let script = self
            .scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match script {
            Some(Script::Ready(outcome)) => outcome,
            Some(Script::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string()))),
            None => Err(FetchError::Transport("no scripted response".to_string())),
        }
    }
}
