//! Correlation id middleware.
//!
//! Installed with `axum::middleware::from_fn(correlation_id)`. For every
//! request it:
//!
//! 1. takes the id from `X-Correlation-ID` or generates a UUID v4
//! 2. stores it in the request extensions for the `CorrelationId` extractor
//! 3. runs the rest of the stack inside an `http_request` span
//! 4. echoes the id on the response

use crate::extractors::parse_correlation_header;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Correlation id middleware function.
pub async fn correlation_id(mut req: Request, next: Next) -> Response {
    let correlation_id = parse_correlation_header(req.headers()).unwrap_or_else(Uuid::new_v4);
    req.extensions_mut().insert(correlation_id);

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %correlation_id,
        method = %req.method(),
        uri = %req.uri(),
    );

    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
