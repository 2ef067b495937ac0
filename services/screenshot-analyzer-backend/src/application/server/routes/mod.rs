pub mod chat;
mod error;
pub mod extract_text;
pub mod health;

use super::AppState;
use axum::http::Uri;
use axum::routing::{get, post, Router};

pub use self::error::{Error, ErrorBody};
use self::{chat::chat, extract_text::extract_text, health::health};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/extract-text", post(extract_text))
        .route("/api/chat", post(chat))
        .with_state(state)
}

/// Fallback handler for any path we do not serve.
#[allow(clippy::unused_async)]
pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound {
        context: format!("No route for {}", uri.path()),
    }
}
