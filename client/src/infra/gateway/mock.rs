//! Scripted [`Gateway`] recording the [`Request`]s it receives.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use common::operations::Perform;
use http::StatusCode;
use serde_json::Value;
use tokio::sync::Notify;
use tracerr::Traced;

use super::{Error, Gateway, Request, Response};

/// [`Gateway`] answering with the scripted [`Response`]s in their order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recording {
    /// Scripted outcomes, consumed one per [`Request`].
    script: Arc<Mutex<VecDeque<Result<Response, Error>>>>,

    /// [`Request`]s received so far.
    requests: Arc<Mutex<Vec<Request>>>,

    /// [`Notify`] every [`Request`] waits for before being answered.
    gate: Option<Arc<Notify>>,
}

impl Recording {
    /// Creates a new [`Recording`] holding every [`Request`] until the
    /// returned [`Notify`] is notified.
    pub(crate) fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let this = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (this, gate)
    }

    /// Scripts a successful [`Response`] with the provided JSON `body`.
    pub(crate) fn ok(self, body: Value) -> Self {
        self.respond(StatusCode::OK, &body)
    }

    /// Scripts a [`Response`] with the provided `status` and JSON `body`.
    pub(crate) fn status(self, status: u16, body: Value) -> Self {
        self.respond(StatusCode::from_u16(status).unwrap(), &body)
    }

    /// Returns the [`Request`]s received so far.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns `METHOD path` of each [`Request`] received so far.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Scripts the provided outcome.
    fn respond(self, status: StatusCode, body: &Value) -> Self {
        let response = Response {
            status,
            body: body.to_string().into_bytes(),
        };
        let outcome = if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Status(response))
        };
        self.script.lock().unwrap().push_back(outcome);
        self
    }
}

impl Gateway<Perform<Request>> for Recording {
    type Ok = Response;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(req): Perform<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {req:?}"));
        outcome.map_err(|e| tracerr::new!(e))
    }
}
