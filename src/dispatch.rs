//! Event dispatch: frames in, at most one terminal outcome out.
//!
//! The dispatcher applies the feed's termination and error sentinels,
//! parses event payloads, and classifies text fragments. It owns the
//! per-session terminated flag, so a completion or error is delivered
//! exactly once and every frame after it is swallowed.

use serde::Deserialize;
use tracing::{debug, trace};

use crate::classify::{classify, MessageKind};
use crate::decode::{data_payload, is_done_marker};

/// One classified outcome from the feed, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// An incremental fragment of the analysis result.
    Content(String),
    /// Operational narration about the stream itself.
    Status(String),
    /// Terminal: the service reported an error. No event follows.
    Failed(String),
    /// Terminal: the stream finished normally. No event follows.
    Completed,
}

impl FeedEvent {
    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedEvent::Failed(_) | FeedEvent::Completed)
    }
}

/// Structured payload carried by a non-sentinel event frame.
///
/// The service guarantees at least one of the two fields on well-formed
/// events; anything that fails to parse is transport noise and dropped.
#[derive(Debug, Deserialize)]
struct FeedPayload {
    error: Option<String>,
    text: Option<String>,
}

/// Per-session dispatcher.
///
/// Feed it decoded frames in order; it returns the event each frame
/// produces, if any. Once a terminal event has been returned the
/// dispatcher is spent: every further frame yields `None`.
#[derive(Debug, Default)]
pub struct Dispatcher {
    terminated: bool,
}

impl Dispatcher {
    /// Create a dispatcher in the open state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a terminal event has already been delivered.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Process one frame.
    ///
    /// Returns `None` for non-events (blank padding lines, frames without
    /// the data prefix), for unparseable payloads (dropped by policy — one
    /// noisy frame must not abort a healthy stream), for parsed payloads
    /// carrying neither field, and for every frame after termination.
    pub fn dispatch(&mut self, frame: &str) -> Option<FeedEvent> {
        if self.terminated {
            return None;
        }

        let payload = match data_payload(frame) {
            Some(payload) => payload,
            None => {
                if !frame.is_empty() {
                    trace!(frame, "ignoring frame without data prefix");
                }
                return None;
            }
        };

        if is_done_marker(payload) {
            self.terminated = true;
            return Some(FeedEvent::Completed);
        }

        let parsed: FeedPayload = match serde_json::from_str(payload) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(payload, %err, "dropping unparseable event payload");
                return None;
            }
        };

        if let Some(message) = parsed.error {
            self.terminated = true;
            return Some(FeedEvent::Failed(message));
        }

        let text = parsed.text?;
        Some(match classify(&text) {
            MessageKind::Status => FeedEvent::Status(text),
            MessageKind::Content => FeedEvent::Content(text),
        })
    }
}
