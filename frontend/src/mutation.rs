//! User-triggered API calls with pending/success/error phases.
//!
//! A [`Mutation`] owns one result slot. Invoking it moves the slot to
//! `Pending` synchronously and hands back a future that settles the slot
//! when the call completes; the caller decides where to spawn it.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::services::{ApiError, CancelHandle, CancelableRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum MutationState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(ApiError),
}

impl<T> Default for MutationState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

struct Slot<T> {
    state: MutationState<T>,
    /// Bumped on every invocation; only the latest one writes `state`.
    generation: u64,
    in_flight: Vec<(u64, CancelHandle)>,
    disposed: bool,
}

type MutationFn<A, T> = Rc<dyn Fn(A) -> CancelableRequest<T>>;

pub struct Mutation<A, T> {
    mutation_fn: MutationFn<A, T>,
    slot: Rc<RefCell<Slot<T>>>,
    on_success: Option<Rc<dyn Fn(&T)>>,
    on_error: Option<Rc<dyn Fn(&ApiError)>>,
    on_change: Option<Rc<dyn Fn()>>,
}

impl<A, T> Clone for Mutation<A, T> {
    fn clone(&self) -> Self {
        Self {
            mutation_fn: self.mutation_fn.clone(),
            slot: self.slot.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<A: 'static, T: Clone + 'static> Mutation<A, T> {
    pub fn new(mutation_fn: impl Fn(A) -> CancelableRequest<T> + 'static) -> Self {
        Self {
            mutation_fn: Rc::new(mutation_fn),
            slot: Rc::new(RefCell::new(Slot {
                state: MutationState::Idle,
                generation: 0,
                in_flight: Vec::new(),
                disposed: false,
            })),
            on_success: None,
            on_error: None,
            on_change: None,
        }
    }

    pub fn on_success(mut self, callback: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Rc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&ApiError) + 'static) -> Self {
        self.on_error = Some(Rc::new(callback));
        self
    }

    /// Called after every state transition, e.g. to schedule a re-render.
    pub fn on_change(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_change = Some(Rc::new(callback));
        self
    }

    /// Starts the call.
    ///
    /// Calls still in flight keep running and fire their callbacks when they
    /// finish, but only the latest call decides the observed state.
    pub fn mutate(&self, variables: A) -> LocalBoxFuture<'static, ()> {
        let request = (self.mutation_fn)(variables);

        let generation = {
            let mut slot = self.slot.borrow_mut();
            if slot.disposed {
                request.cancel();
                return future::ready(()).boxed_local();
            }
            slot.generation += 1;
            let generation = slot.generation;
            slot.in_flight.push((generation, request.cancel_handle()));
            slot.state = MutationState::Pending;
            generation
        };
        self.notify_change();

        let this = self.clone();
        async move {
            if let Some(result) = request.await {
                this.settle(generation, result);
            }
        }
        .boxed_local()
    }

    fn settle(&self, generation: u64, result: Result<T, ApiError>) {
        let latest = {
            let mut slot = self.slot.borrow_mut();
            if slot.disposed {
                return;
            }
            slot.in_flight.retain(|(call, _)| *call != generation);
            let latest = slot.generation == generation;
            if latest {
                slot.state = match &result {
                    Ok(data) => MutationState::Succeeded(data.clone()),
                    Err(err) => MutationState::Failed(err.clone()),
                };
            }
            latest
        };

        match &result {
            Ok(data) => {
                if let Some(on_success) = &self.on_success {
                    on_success(data);
                }
            }
            Err(err) => {
                if let Some(on_error) = &self.on_error {
                    on_error(err);
                }
            }
        }
        if latest {
            self.notify_change();
        }
    }

    /// Cancels every in-flight call; the mutation stays inert afterwards.
    pub fn dispose(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.disposed = true;
        for (_, in_flight) in slot.in_flight.drain(..) {
            in_flight.cancel();
        }
    }

    pub fn state(&self) -> MutationState<T> {
        self.slot.borrow().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.slot.borrow().state, MutationState::Pending)
    }

    pub fn data(&self) -> Option<T> {
        match &self.slot.borrow().state {
            MutationState::Succeeded(data) => Some(data.clone()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ApiError> {
        match &self.slot.borrow().state {
            MutationState::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }

    fn notify_change(&self) {
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }
}
