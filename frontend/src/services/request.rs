use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::ClientConfig;

/// What an endpoint wrapper asks for; resolved against a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ApiRequestOptions {
    pub method: Method,
    pub path: &'static str,
    pub body: Option<String>,
    pub media_type: Option<&'static str>,
}

impl ApiRequestOptions {
    pub fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            body: None,
            media_type: None,
        }
    }

    pub fn post(path: &'static str) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    /// Sends `body` as-is, labelled with `media_type`.
    pub fn body(mut self, body: impl Into<String>, media_type: &'static str) -> Self {
        self.body = Some(body.into());
        self.media_type = Some(media_type);
        self
    }
}

pub fn build_request(config: &ClientConfig, options: ApiRequestOptions) -> HttpRequest {
    let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
    if let Some(token) = config.bearer_token() {
        headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
    }
    if options.body.is_some() {
        if let Some(media_type) = options.media_type {
            headers.push(("Content-Type".to_string(), media_type.to_string()));
        }
    }

    HttpRequest {
        method: options.method,
        url: config.url(options.path),
        headers,
        body: options.body,
        with_credentials: config.with_credentials,
    }
}

/// Sends one request and decodes the JSON answer into `T`.
pub async fn request<T: DeserializeOwned>(
    config: &ClientConfig,
    transport: &dyn Transport,
    options: ApiRequestOptions,
) -> Result<T, ApiError> {
    let request = build_request(config, options);
    let url = request.url.clone();
    tracing::debug!(method = request.method.as_str(), url = %url, "Sending API request");

    let response = transport.send(request).await.map_err(|err| {
        tracing::warn!(url = %url, error = %err, "API request failed");
        err
    })?;

    decode_response(&url, response)
}

fn decode_response<T: DeserializeOwned>(url: &str, response: HttpResponse) -> Result<T, ApiError> {
    if !response.ok() {
        let err = ApiError::from_response(
            url,
            response.status,
            response.status_text,
            response_body(&response.body),
        );
        tracing::warn!(url = %url, status = response.status, "API returned an error status");
        return Err(err);
    }

    let decoded = if response.body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(&response.body)
    };

    decoded.map_err(|e| ApiError::invalid_body(url, response.status, response.status_text, e))
}

/// Error bodies are JSON when the backend produced them, free text otherwise.
fn response_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}
