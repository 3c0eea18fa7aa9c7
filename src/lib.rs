//! # mailsift - Streaming client for a chunked email-analysis feed
//!
//! A small, pragmatic Rust client for a phishing-email analysis service.
//! The service narrates long-running AI analysis over an incrementally
//! delivered, `data: `-framed feed; this crate decodes that feed across
//! arbitrary chunk boundaries, classifies each event, and delivers it to
//! the consumer with strict ordering and at-most-one-terminal-outcome
//! guarantees.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Frame reassembly across arbitrary chunk boundaries
//! - Status vs. content classification of event text
//! - Exactly-once completion/error delivery, cooperative cancellation
//! - Both a lazy `Stream` surface and a handler/callback surface
//!
//! ## Architecture
//!
//! Data flows through two components, in dependency order:
//!
//! 1. **Frame Decoder** (`decode`): arbitrary byte chunks in, complete
//!    newline-delimited frames out, partial tail buffered between chunks.
//! 2. **Event Dispatcher** (`dispatch`): frames in, classified events out,
//!    with the `[DONE]` sentinel, error payloads, and a per-session
//!    terminated flag enforcing at most one terminal event.
//!
//! `stream` glues the two onto a transport as a `Stream<Item = FeedEvent>`;
//! `session` wraps that in consumer callbacks with cancellation.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use mailsift::client::MailSiftClient;
//! use mailsift::options::{HttpTransport, TransportOptions};
//! use mailsift::session::{FeedHandlers, StreamSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Arc::new(MailSiftClient::new(TransportOptions {
//!         timeout: None,
//!         provider: HttpTransport::new("http://localhost:5000".to_string()),
//!     }));
//!
//!     let handlers = FeedHandlers::new(
//!         |fragment| print!("{fragment}"),
//!         |status| eprintln!("[status] {status}"),
//!         |error| eprintln!("analysis failed: {error}"),
//!         || println!("\n-- analysis complete --"),
//!     );
//!
//!     let session = StreamSession::start(client, 42, handlers);
//!     session.join().await;
//! }
//! ```

pub mod api;
pub mod classify;
pub mod client;
pub mod decode;
pub mod dispatch;
pub mod http;
pub mod options;
pub mod session;
pub mod stream;

// Re-exports for convenience
pub use client::{EventStream, FeedError, MailSiftClient, StreamingAnalysis};
pub use dispatch::FeedEvent;
pub use session::{FeedHandlers, SessionHandle, StreamSession};
