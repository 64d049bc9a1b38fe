use crate::components::toast::{show_error_toast, show_success_toast, ToastDispatcher};
use crate::services::ApiError;

/// Surfaces the outcome of user actions.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, err: &ApiError);
}

/// Shared error handler: logs the failure and shows it as a toast.
pub fn handle_error(err: &ApiError, toasts: &ToastDispatcher) {
    tracing::error!(url = %err.url, status = ?err.status, "{}", err);
    show_error_toast(toasts, err.detail_message());
}

/// [`Notifier`] backed by the toast store.
#[derive(Clone, PartialEq)]
pub struct ToastNotifier {
    toasts: ToastDispatcher,
}

impl ToastNotifier {
    pub fn new(toasts: ToastDispatcher) -> Self {
        Self { toasts }
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        show_success_toast(&self.toasts, message);
    }

    fn error(&self, err: &ApiError) {
        handle_error(err, &self.toasts);
    }
}

/// Used when no toast provider is mounted; failures still reach the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, err: &ApiError) {
        tracing::error!(url = %err.url, status = ?err.status, "{}", err.detail_message());
    }
}
