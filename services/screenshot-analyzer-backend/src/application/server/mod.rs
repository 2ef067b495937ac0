mod middleware;
pub mod routes;

use axum::{
    extract::DefaultBodyLimit, middleware::map_response_with_state, routing::Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use self::middleware::response_map::error_detail;
use crate::domain::ports::secondary::{ChatAssistant, TextExtractor};
use crate::domain::{ExtractionEngine, OcrCapability};
use crate::telemetry;

/// Builds the router serving the API.
///
/// Every route, including the 404 fallback, answers cross-origin requests
/// from any origin.
pub fn new(state: AppState, body_limit: usize) -> Router {
    let debug = state.debug;

    Router::new()
        .merge(routes::routes(state))
        .fallback(routes::not_found)
        .layer(map_response_with_state(debug, error_detail))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(telemetry::make_span))
                .layer(CorsLayer::permissive()),
        )
}

pub type DynExtractor = Arc<dyn TextExtractor + Send + Sync>;
pub type DynAssistant = Arc<dyn ChatAssistant + Send + Sync>;

/// What handlers share: built once at startup, and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub extractor: DynExtractor,
    pub assistant: DynAssistant,
    pub capability: OcrCapability,
    pub engine: ExtractionEngine,
    pub debug: bool,
}
