pub mod api;
pub mod cancelable;
pub mod error;
pub mod request;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use api::GoogleService;
pub use cancelable::{CancelHandle, CancelableRequest};
pub use error::ApiError;
