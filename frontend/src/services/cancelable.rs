use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use futures::FutureExt;

use super::error::ApiError;

/// An API call that can be cancelled before it completes.
///
/// Nothing is sent until the future is first polled. It resolves to `None`
/// when cancelled; the transport future is then dropped, which aborts the
/// underlying request, and no result is ever delivered.
pub struct CancelableRequest<T> {
    inner: Abortable<LocalBoxFuture<'static, Result<T, ApiError>>>,
    handle: AbortHandle,
}

/// Cancels a [`CancelableRequest`] from elsewhere.
#[derive(Debug, Clone)]
pub struct CancelHandle(AbortHandle);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

impl<T> CancelableRequest<T> {
    pub fn new(future: impl Future<Output = Result<T, ApiError>> + 'static) -> Self {
        let (handle, registration) = AbortHandle::new_pair();
        Self {
            inner: Abortable::new(future.boxed_local(), registration),
            handle,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.handle.clone())
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl<T> Future for CancelableRequest<T> {
    type Output = Option<Result<T, ApiError>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.poll_unpin(cx).map(Result::ok)
    }
}
