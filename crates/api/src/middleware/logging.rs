//! Request/response logging for every route, including unmatched ones.
//!
//! [`RequestLogger`] plugs into `tower_http`'s [`TraceLayer`]: it opens an
//! `INFO` span carrying method, URI, and remote address, logs when the request
//! starts, and logs the status and elapsed time when the response is ready.
//! It only observes; bodies and status codes pass through untouched.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{MakeSpan, OnRequest, OnResponse, TraceLayer};
use tracing::Span;

/// Span factory and start/finish hooks for [`TraceLayer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

/// The layer type produced by [`request_logging_layer`].
pub type RequestLoggingLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestLogger, RequestLogger, RequestLogger>;

/// Build the request logging layer.
pub fn request_logging_layer() -> RequestLoggingLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestLogger)
        .on_request(RequestLogger)
        .on_response(RequestLogger)
}

/// Peer address, present when the server was started with connect info.
fn remote_addr<B>(request: &Request<B>) -> Option<SocketAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

impl<B> MakeSpan<B> for RequestLogger {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let remote = remote_addr(request)
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            remote_addr = %remote,
        )
    }
}

impl<B> OnRequest<B> for RequestLogger {
    fn on_request(&mut self, _request: &Request<B>, _span: &Span) {
        tracing::info!("Started request");
    }
}

impl<B> OnResponse<B> for RequestLogger {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        tracing::info!(
            status = response.status().as_u16(),
            latency_ms = latency.as_secs_f64() * 1000.0,
            "Completed request"
        );
    }
}
