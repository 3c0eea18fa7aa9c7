//! Handler-based stream sessions.
//!
//! A [`StreamSession`] drives one analysis feed and delivers classified
//! events to consumer-supplied handlers. Session state machine:
//! `Open -> (Completed | Errored | Cancelled)`, terminal states absorbing.
//! The error and completion handlers are mutually exclusive and fire at
//! most once; after cancellation no handler fires at all. The transport
//! resource is released exactly once, on first entry into any terminal
//! state, by dropping the event stream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::client::StreamingAnalysis;
use crate::dispatch::FeedEvent;

/// Consumer callbacks for one session.
///
/// `on_content` and `on_status` may fire any number of times, in arrival
/// order. `on_error` and `on_complete` are terminal: the session guarantees
/// at most one invocation of exactly one of them.
pub struct FeedHandlers {
    pub on_content: Box<dyn FnMut(String) + Send>,
    pub on_status: Box<dyn FnMut(String) + Send>,
    pub on_error: Box<dyn FnMut(String) + Send>,
    pub on_complete: Box<dyn FnMut() + Send>,
}

impl FeedHandlers {
    /// Build the handler set from four closures.
    pub fn new(
        on_content: impl FnMut(String) + Send + 'static,
        on_status: impl FnMut(String) + Send + 'static,
        on_error: impl FnMut(String) + Send + 'static,
        on_complete: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            on_content: Box::new(on_content),
            on_status: Box::new(on_status),
            on_error: Box::new(on_error),
            on_complete: Box::new(on_complete),
        }
    }
}

/// Cooperative cancellation signal shared between a handle and its driver.
///
/// The driver is the only waiter, so `notify_one`'s stored-permit semantics
/// make cancel-before-wait race-free.
#[derive(Clone, Default)]
struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    fn cancel(&self) {
        self.inner.flag.store(true, Ordering::SeqCst);
        self.inner.notify.notify_one();
    }

    fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.inner.notify.notified().await;
    }
}

/// Handle to a running session.
pub struct SessionHandle {
    cancel: CancelToken,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Request cancellation.
    ///
    /// Honored at the driver's next suspend point: no further chunks are
    /// requested and no handler fires afterwards. Valid at any time;
    /// a no-op once the session has already reached a terminal state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the session to reach a terminal state.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// One streaming exchange with the analysis service.
pub struct StreamSession;

impl StreamSession {
    /// Start analyzing one email record, delivering events to `handlers`.
    ///
    /// A failure to open the feed at all is routed through `on_error`,
    /// exactly like a mid-stream service error, so the consumer has a
    /// single failure channel.
    pub fn start(
        client: Arc<dyn StreamingAnalysis>,
        email_id: u64,
        handlers: FeedHandlers,
    ) -> SessionHandle {
        let cancel = CancelToken::default();
        let driver_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            drive(client, email_id, handlers, driver_cancel).await;
        });
        SessionHandle { cancel, task }
    }
}

/// Session driver: one suspend point per chunk, cancellation checked at
/// each one. Returning drops the event stream, which releases the open
/// response body.
async fn drive(
    client: Arc<dyn StreamingAnalysis>,
    email_id: u64,
    mut handlers: FeedHandlers,
    cancel: CancelToken,
) {
    if cancel.is_cancelled() {
        return;
    }

    let opened = tokio::select! {
        _ = cancel.cancelled() => return,
        opened = client.analyze_stream(email_id) => opened,
    };

    let mut events = match opened {
        Ok(events) => events,
        Err(err) => {
            if !cancel.is_cancelled() {
                (handlers.on_error)(err.to_string());
            }
            return;
        }
    };

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return,
            event = events.next() => event,
        };

        match event {
            Some(FeedEvent::Content(text)) => (handlers.on_content)(text),
            Some(FeedEvent::Status(text)) => (handlers.on_status)(text),
            Some(FeedEvent::Failed(message)) => {
                (handlers.on_error)(message);
                return;
            }
            Some(FeedEvent::Completed) => {
                (handlers.on_complete)();
                return;
            }
            // Transport ended without a sentinel: not a completion signal.
            None => return,
        }
    }
}
