//! In-memory [`Transport`] for tests: records every request and answers
//! from a per-path script.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use futures::channel::oneshot;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Transport};

type Reply = Result<HttpResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

#[derive(Default)]
pub struct ScriptedTransport {
    requests: RefCell<Vec<HttpRequest>>,
    script: RefCell<HashMap<&'static str, VecDeque<Scripted>>>,
    aborted: Cell<usize>,
}

/// Completes a deferred reply.
pub struct Responder {
    url: String,
    sender: oneshot::Sender<Reply>,
}

impl Responder {
    pub fn reply(self, status: u16, body: &str) {
        let _ = self.sender.send(Ok(response(status, body)));
    }

    pub fn fail(self, message: &str) {
        let _ = self.sender.send(Err(ApiError::network(self.url, message)));
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &'static str, status: u16, body: &str) {
        self.push(path, Scripted::Ready(Ok(response(status, body))));
    }

    pub fn fail(&self, path: &'static str, message: &str) {
        self.push(path, Scripted::Ready(Err(ApiError::network(path, message))));
    }

    /// Leaves the next request to `path` pending until the responder is used.
    pub fn defer(&self, path: &'static str) -> Responder {
        let (sender, receiver) = oneshot::channel();
        self.push(path, Scripted::Deferred(receiver));
        Responder {
            url: path.to_string(),
            sender,
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url.ends_with(path))
            .cloned()
            .collect()
    }

    /// Number of requests dropped while still waiting for their reply.
    pub fn aborted(&self) -> usize {
        self.aborted.get()
    }

    fn push(&self, path: &'static str, scripted: Scripted) {
        self.script
            .borrow_mut()
            .entry(path)
            .or_default()
            .push_back(scripted);
    }

    fn next(&self, url: &str) -> Option<Scripted> {
        let mut script = self.script.borrow_mut();
        let (_, queue) = script.iter_mut().find(|(path, _)| url.ends_with(*path))?;
        queue.pop_front()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.clone();
        let scripted = self.next(&url);
        self.requests.borrow_mut().push(request);

        match scripted {
            None => Err(ApiError::network(url, "no scripted reply")),
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(receiver)) => {
                let mut guard = AbortCounter {
                    aborted: &self.aborted,
                    armed: true,
                };
                let reply = receiver
                    .await
                    .unwrap_or_else(|_| Err(ApiError::network(&url, "responder dropped")));
                guard.armed = false;
                reply
            }
        }
    }
}

struct AbortCounter<'a> {
    aborted: &'a Cell<usize>,
    armed: bool,
}

impl Drop for AbortCounter<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.aborted.set(self.aborted.get() + 1);
        }
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: String::new(),
        body: body.to_string(),
    }
}
