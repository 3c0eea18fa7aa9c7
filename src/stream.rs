//! Feed event streams over a chunked transport.
//!
//! Glues a byte-chunk transport, a [`FrameDecoder`] and a [`Dispatcher`]
//! into a lazy `Stream` of [`FeedEvent`]s. Events come out in byte-arrival
//! order, status and content interleaved, and the stream ends immediately
//! after the single terminal event (if any) — the transport is dropped at
//! that point and never polled again.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::decode::FrameDecoder;
use crate::dispatch::{Dispatcher, FeedEvent};

struct FeedState<S> {
    chunks: Pin<Box<S>>,
    decoder: FrameDecoder,
    dispatcher: Dispatcher,
    pending: VecDeque<FeedEvent>,
    transport_done: bool,
}

/// Turn a stream of transport chunks into a stream of feed events.
///
/// Transport errors become a terminal [`FeedEvent::Failed`] carrying the
/// error's display form. A transport that ends without the termination
/// sentinel simply ends the event stream with no terminal event — absence
/// of chunks is not completion. Any unterminated partial frame left in the
/// decoder at that point is discarded.
pub fn event_stream<S, E>(chunks: S) -> impl Stream<Item = FeedEvent> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: Display + Send,
{
    let state = FeedState {
        chunks: Box::pin(chunks),
        decoder: FrameDecoder::new(),
        dispatcher: Dispatcher::new(),
        pending: VecDeque::new(),
        transport_done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((event, state));
            }

            // Everything decoded so far has been delivered. A terminated
            // dispatcher means the terminal event is already out; stop
            // without touching the transport again.
            if state.dispatcher.is_terminated() || state.transport_done {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    for frame in state.decoder.feed(&chunk) {
                        if let Some(event) = state.dispatcher.dispatch(&frame) {
                            state.pending.push_back(event);
                        }
                    }
                }
                Some(Err(err)) => {
                    state.transport_done = true;
                    state.pending.push_back(FeedEvent::Failed(err.to_string()));
                }
                None => {
                    state.transport_done = true;
                }
            }
        }
    })
}

/// Extension trait turning an HTTP response body into a feed event stream.
///
/// # Example
/// ```ignore
/// use futures::StreamExt;
/// use mailsift::stream::FeedResponseExt;
///
/// let response = client.post(url).send().await?;
/// let mut events = std::pin::pin!(response.feed_events());
/// while let Some(event) = events.next().await {
///     println!("{event:?}");
/// }
/// ```
pub trait FeedResponseExt {
    /// Consume the response body as a chunked analysis feed.
    fn feed_events(self) -> impl Stream<Item = FeedEvent> + Send;
}

impl FeedResponseExt for reqwest::Response {
    fn feed_events(self) -> impl Stream<Item = FeedEvent> + Send {
        event_stream(self.bytes_stream())
    }
}
