//! Streaming analysis example using the handler surface.
//!
//! Run with:
//! ```bash
//! export MAILSIFT_BASE_URL="http://localhost:5000"
//! cargo run --example stream_analysis -- 42
//! ```

use std::sync::Arc;

use mailsift::client::MailSiftClient;
use mailsift::options::{HttpTransport, TransportOptions};
use mailsift::session::{FeedHandlers, StreamSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("MAILSIFT_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let email_id: u64 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "1".to_string())
        .parse()?;

    let client = Arc::new(MailSiftClient::new(TransportOptions {
        timeout: None,
        provider: HttpTransport::new(base_url),
    }));

    println!("Streaming analysis of email {email_id}...\n");

    let handlers = FeedHandlers::new(
        |fragment| print!("{fragment}"),
        |status| eprintln!("[status] {status}"),
        |error| eprintln!("\nanalysis failed: {error}"),
        || println!("\n\n-- analysis complete --"),
    );

    let session = StreamSession::start(client, email_id, handlers);
    session.join().await;

    Ok(())
}
