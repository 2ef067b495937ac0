use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use crate::application::server::AppState;
use crate::domain::{ExtractionEngine, OcrCapability};

/// GET handler for health requests by an application platform
///
/// Returns 200 OK as long as the server runs, along with the engine serving
/// extraction requests and the outcome of the OCR capability check, which
/// helps diagnose a deployment without the OCR binary.
#[allow(clippy::unused_async)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    let resp = HealthResp {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.engine,
        ocr: state.capability,
    };
    Json(resp)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResp {
    pub status: String,
    pub version: String,
    pub engine: ExtractionEngine,
    pub ocr: OcrCapability,
}
