//! # Scope
//!
//! A lifecycle-bound collection of cancellable handles: spawned fetch tasks and bus
//! subscriptions. A presenter owns one scope and clears it on teardown (or when its screen
//! goes to the background), which cancels everything it started in one step.
//!
//! Aborting a task does not recall a completion it already queued for the UI loop, so the
//! scope also issues [`Ticket`]s. Clearing bumps the scope's generation; completions carry
//! the ticket they were issued under and are dropped if it is no longer live.

use log::debug;
use tokio::task::AbortHandle;

use crate::core::bus::SubscriptionGuard;

/// Anything a scope can cancel.
pub trait Cancel: Send {
    fn cancel(&mut self);

    /// True once there is nothing left to cancel. Finished handles are pruned.
    fn is_done(&self) -> bool {
        false
    }
}

impl Cancel for AbortHandle {
    fn cancel(&mut self) {
        self.abort();
    }

    fn is_done(&self) -> bool {
        self.is_finished()
    }
}

impl<T: Send> Cancel for SubscriptionGuard<T> {
    fn cancel(&mut self) {
        self.unsubscribe();
    }
}

/// Identifies one asynchronous request issued within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    sequence: u64,
}

#[derive(Default)]
pub struct Scope {
    generation: u64,
    next_sequence: u64,
    handles: Vec<Box<dyn Cancel>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh ticket. Every ticket is distinct, even across clears.
    pub fn issue(&mut self) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        ticket
    }

    /// True while the scope has not been cleared since `ticket` was issued.
    pub fn is_live(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Keeps `handle` until the next clear. Handles that already finished are dropped
    /// first, so a long-lived scope holds only work that can still be cancelled.
    pub fn add(&mut self, handle: impl Cancel + 'static) {
        self.handles.retain(|existing| !existing.is_done());
        self.handles.push(Box::new(handle));
    }

    /// Spawns `future` on the tokio runtime and keeps its abort handle.
    ///
    /// Must be called from within a runtime.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        self.add(handle.abort_handle());
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Cancels every handle and invalidates all outstanding tickets.
    pub fn clear(&mut self) {
        if !self.handles.is_empty() {
            debug!("Clearing scope: cancelling {} handle(s)", self.handles.len());
        }
        for mut handle in self.handles.drain(..) {
            handle.cancel();
        }
        self.generation += 1;
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.clear();
    }
}
