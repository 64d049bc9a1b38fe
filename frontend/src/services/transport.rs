use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use web_sys::{AbortController, RequestCredentials};

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully resolved request, ready to hand to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes HTTP requests.
///
/// Dropping the returned future before it resolves must abort the request.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Browser `fetch` through gloo-net.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.clone();
        let network_error = |e: gloo_net::Error| ApiError::network(&url, e.to_string());

        let controller = AbortController::new()
            .map_err(|e| ApiError::network(&url, format!("{:?}", e)))?;
        let mut guard = AbortOnDrop::new(controller);
        let signal = guard.controller.signal();

        let builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        let mut builder = builder.abort_signal(Some(&signal));
        if request.with_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder.body(body).map_err(network_error)?.send().await,
            None => builder.send().await,
        }
        .map_err(network_error)?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.map_err(network_error)?;
        guard.disarm();

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

/// Aborts the fetch unless the response was read to the end.
struct AbortOnDrop {
    controller: AbortController,
    armed: bool,
}

impl AbortOnDrop {
    fn new(controller: AbortController) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Aborting in-flight fetch");
            self.controller.abort();
        }
    }
}
