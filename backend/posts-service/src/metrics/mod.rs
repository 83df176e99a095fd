//! Prometheus collectors for the feed and the error boundary, rendered on
//! `GET /metrics` from the default registry.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod errors;
pub mod feed;

/// Text exposition of every registered collector.
pub fn render() -> Result<(String, String), prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;

    let text = String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("non-utf8 exposition: {}", e)))?;
    Ok((encoder.format_type().to_string(), text))
}

pub async fn serve_metrics() -> HttpResponse {
    match render() {
        Ok((content_type, text)) => HttpResponse::Ok().content_type(content_type).body(text),
        Err(err) => {
            // Scrapers only need the status; encoder detail stays in the logs.
            tracing::error!(error = %err, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}
