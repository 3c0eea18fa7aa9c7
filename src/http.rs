//! HTTP client utilities for talking to the analysis service.
//!
//! Reusable client construction and request decoration shared by the
//! streaming and request/response paths.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};

use crate::options::{HttpTransport, TransportOptions};

/// Build a configured HTTP client from transport options.
///
/// Applies common configuration like timeouts and proxies.
pub fn build_http_client(
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.provider.proxy {
        if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

/// Attach the bearer token and any extra headers from transport options.
pub fn decorate_request(
    mut request: RequestBuilder,
    transport: &HttpTransport,
) -> RequestBuilder {
    if let Some(token) = &transport.token {
        request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
    }

    if let Some(headers) = &transport.extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }

    request
}
