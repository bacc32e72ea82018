//! # UI Execution Context
//!
//! The single logical owner of all UI-affecting state changes: a
//! single-consumer work queue drained by one dedicated worker thread.
//!
//! ## Contract
//!
//! - `dispatch` is a non-blocking enqueue (unbounded channel): it returns
//!   immediately and the caller never observes completion or a result
//! - Work items execute strictly in submission order, one at a time
//! - `dispatch` is safe from any thread, including from work already running
//!   on the context; re-entrant submissions queue behind pending work, so
//!   UI-affecting calls are never interleaved mid-callback
//! - No cancellation: once dispatched, work always eventually runs. The
//!   context lives until the owning [`UiThread`] and every [`UiHandle`]
//!   are dropped, which for the framework is the process lifetime.
//! - A work item that panics is logged and unwound in place; the context
//!   keeps draining the queue.

use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{unbounded, Sender};

/// A unit of work marshaled onto the UI thread.
type Work = Box<dyn FnOnce() + Send + 'static>;

/// Configures and spawns the UI execution context.
#[derive(Clone, Debug)]
pub struct UiThreadBuilder {
    thread_name: String,
}

impl UiThreadBuilder {
    /// Creates a builder with the default worker thread name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            thread_name: String::from("vitrine-ui"),
        }
    }

    /// Sets the worker thread name (visible in debuggers and panics).
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Spawns the worker thread and returns the owning context.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the worker thread cannot be spawned.
    pub fn spawn(self) -> io::Result<UiThread> {
        let (tx, rx) = unbounded::<Work>();

        // Detached on purpose: the worker exits when the last sender drops.
        let _ = thread::Builder::new()
            .name(self.thread_name)
            .spawn(move || {
                while let Ok(work) = rx.recv() {
                    // A panicking item must not take the context down with
                    // it; later work still runs.
                    if catch_unwind(AssertUnwindSafe(work)).is_err() {
                        tracing::error!("dispatched work panicked");
                    }
                }
            })?;

        Ok(UiThread {
            handle: UiHandle { tx },
        })
    }
}

impl Default for UiThreadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The UI execution context: owns the queue feeding the worker thread.
pub struct UiThread {
    handle: UiHandle,
}

impl UiThread {
    /// Spawns a context with default settings.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the worker thread cannot be spawned.
    pub fn spawn() -> io::Result<Self> {
        UiThreadBuilder::new().spawn()
    }

    /// Returns a cheap cloneable producer handle.
    #[must_use]
    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    /// Enqueues work for execution on the UI thread. See
    /// [`UiHandle::dispatch`].
    pub fn dispatch<W>(&self, work: W)
    where
        W: FnOnce() + Send + 'static,
    {
        self.handle.dispatch(work);
    }
}

/// Producer handle for the UI execution context.
///
/// Clone freely; every clone feeds the same queue.
#[derive(Clone)]
pub struct UiHandle {
    tx: Sender<Work>,
}

impl UiHandle {
    /// Enqueues work for execution on the UI thread.
    ///
    /// Fire-and-forget: returns immediately, never blocks, and the caller
    /// does not observe the work's completion. Work submitted from a closure
    /// already executing on the context queues behind pending work.
    pub fn dispatch<W>(&self, work: W)
    where
        W: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(work)).is_err() {
            // Only reachable once the worker has exited, i.e. during teardown.
            tracing::warn!("ui context stopped, dropping dispatched work");
        }
    }
}
