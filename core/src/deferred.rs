//! One-shot deferred result with callback registration.
//!
//! # Design
//! `Deferred<T>` decouples starting an asynchronous operation from consuming
//! its single eventual result. The call site registers continuations with
//! [`then`](Deferred::then) and at most one failure handler with
//! [`error`](Deferred::error); the transport completes the operation by
//! calling [`resolve`](Deferred::resolve) or [`reject`](Deferred::reject)
//! exactly once from its completion callback.
//!
//! The handle is a cheap `Clone` over shared state so producer and consumer
//! can live on different threads; every state transition happens under one
//! mutex, which preserves the exactly-once, in-registration-order delivery
//! guarantee even when completion arrives from another thread. Continuations
//! run outside the lock, so a continuation may register further callbacks on
//! the same deferred without deadlocking.
//!
//! There is no cancellation and no timeout: once an operation has been
//! started, the only outcomes are resolution or rejection. Callers that need
//! a deadline race a timer against the deferred themselves.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Continuation<T> = Box<dyn FnOnce(&T) + Send>;
type ErrorThunk = Box<dyn FnOnce() + Send>;

/// Observable lifecycle of a [`Deferred`].
///
/// A deferred starts `Pending` and settles into `Resolved` or `Rejected`.
/// `Resolved` is terminal for further resolutions; a late `reject` still
/// moves a resolved deferred to `Rejected` (the queue is already empty at
/// that point, so no continuation can fire twice).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    Pending,
    Resolved,
    Rejected,
}

/// Retry intent recorded by [`Deferred::retry`].
///
/// Stored configuration only: nothing in this crate re-drives the producing
/// action on rejection. Callers that want retries read the policy back with
/// [`Deferred::retry_policy`] and loop themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

enum Slot<T> {
    Pending,
    Resolved(Arc<T>),
    Rejected,
}

struct Inner<T> {
    slot: Slot<T>,
    queue: Vec<Continuation<T>>,
    on_error: Option<ErrorThunk>,
    retry: Option<RetryPolicy>,
}

/// A one-shot container for an eventual value of type `T`.
pub struct Deferred<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").field("state", &self.state()).finish()
    }
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                slot: Slot::Pending,
                queue: Vec::new(),
                on_error: None,
                retry: None,
            })),
        }
    }

    /// Invoke `action(&self, param)` synchronously and hand the deferred back.
    ///
    /// Exists so a call site can build the deferred, kick off the
    /// side-effecting operation, and keep registering callbacks in one fluent
    /// expression. `action` is not wrapped: a panicking action propagates to
    /// the caller.
    pub fn start<P, F>(self, action: F, param: P) -> Self
    where
        F: FnOnce(&Self, P),
    {
        action(&self, param);
        self
    }

    /// Register a continuation to run when the deferred resolves.
    ///
    /// Pending: appended to a flat queue. Already resolved: invoked
    /// immediately and synchronously with the stored value. Rejected: never
    /// invoked. Successive `then` calls do not chain data; every continuation
    /// receives the same resolution value.
    pub fn then<F>(&self, continuation: F) -> &Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        let replay = {
            let mut inner = self.inner.lock().unwrap();
            match inner.slot {
                Slot::Pending => {
                    inner.queue.push(Box::new(continuation));
                    return self;
                }
                Slot::Resolved(ref value) => Some(value.clone()),
                Slot::Rejected => None,
            }
        };
        if let Some(value) = replay {
            continuation(&value);
        }
        self
    }

    /// Complete the deferred with `value`.
    ///
    /// Every queued continuation runs exactly once, in registration order,
    /// then the queue is cleared. Resolving a deferred that has already
    /// settled is a recoverable protocol violation: it is logged and ignored.
    pub fn resolve(&self, value: T) {
        let (value, queue) = {
            let mut inner = self.inner.lock().unwrap();
            if !matches!(inner.slot, Slot::Pending) {
                log::warn!("resolve called on a settled deferred, ignoring");
                return;
            }
            let value = Arc::new(value);
            inner.slot = Slot::Resolved(value.clone());
            (value, std::mem::take(&mut inner.queue))
        };
        for continuation in queue {
            continuation(&value);
        }
    }

    /// Fail the deferred.
    ///
    /// Transitions to `Rejected` from any state, discards queued
    /// continuations without invoking them, and reports `error` through the
    /// log channel whether or not a handler is registered. The handler, if
    /// any, is invoked once with the parameter captured at registration time
    /// — not with `error`. Call sites rely on that captured parameter to
    /// recover which request failed.
    pub fn reject(&self, error: impl fmt::Display) {
        let handler = {
            let mut inner = self.inner.lock().unwrap();
            inner.queue.clear();
            inner.slot = Slot::Rejected;
            inner.on_error.take()
        };
        log::error!("deferred rejected: {error}");
        match handler {
            Some(thunk) => thunk(),
            None => log::warn!("deferred rejected with no error handler registered"),
        }
    }

    /// Register the failure handler and the parameter it will be called with.
    ///
    /// At most one handler is supported; a later registration overwrites an
    /// earlier one. The parameter is captured now and delivered verbatim at
    /// rejection time.
    pub fn error<P, F>(&self, handler: F, param: P) -> &Self
    where
        F: FnOnce(P) + Send + 'static,
        P: Send + 'static,
    {
        self.inner.lock().unwrap().on_error = Some(Box::new(move || handler(param)));
        self
    }

    /// Record retry intent on this deferred. See [`RetryPolicy`].
    pub fn retry(&self, max_attempts: u32, interval: Duration) -> &Self {
        self.inner.lock().unwrap().retry = Some(RetryPolicy {
            max_attempts,
            interval,
        });
        self
    }

    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.inner.lock().unwrap().retry
    }

    pub fn state(&self) -> DeferredState {
        match self.inner.lock().unwrap().slot {
            Slot::Pending => DeferredState::Pending,
            Slot::Resolved(_) => DeferredState::Resolved,
            Slot::Rejected => DeferredState::Rejected,
        }
    }
}
