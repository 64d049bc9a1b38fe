use std::rc::Rc;

use shared::api::{EventsResult, Message, CREDENTIALS_PATH, EVENTS_NEXT_HOUR_PATH};

use super::cancelable::CancelableRequest;
use super::request::{request, ApiRequestOptions};
use super::transport::{FetchTransport, Transport};
use crate::config::ClientConfig;

/// Google Calendar endpoints of the backend.
#[derive(Clone)]
pub struct GoogleService {
    config: Rc<ClientConfig>,
    transport: Rc<dyn Transport>,
}

impl GoogleService {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
        }
    }

    /// Browser fetch with the build-time configuration.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env(), Rc::new(FetchTransport))
    }

    /// Save Google OAuth credentials.
    ///
    /// The string is posted exactly as given; the backend validates it.
    pub fn save_credentials(&self, credentials_json: impl Into<String>) -> CancelableRequest<Message> {
        let options =
            ApiRequestOptions::post(CREDENTIALS_PATH).body(credentials_json, "application/json");
        self.call(options)
    }

    /// Get Google Calendar events for the next hour.
    pub fn get_events_next_hour(&self) -> CancelableRequest<EventsResult> {
        self.call(ApiRequestOptions::get(EVENTS_NEXT_HOUR_PATH))
    }

    fn call<T>(&self, options: ApiRequestOptions) -> CancelableRequest<T>
    where
        T: serde::de::DeserializeOwned + 'static,
    {
        let config = self.config.clone();
        let transport = self.transport.clone();
        CancelableRequest::new(async move { request(&config, transport.as_ref(), options).await })
    }
}

impl PartialEq for GoogleService {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && Rc::ptr_eq(&self.transport, &other.transport)
    }
}
