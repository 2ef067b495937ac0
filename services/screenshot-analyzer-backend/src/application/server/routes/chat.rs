use axum::extract::{Json, State};
use uuid::Uuid;

use super::Error;
use crate::application::server::AppState;
use crate::domain::sample::sample_answer;
use crate::domain::{ChatRequest, ChatResponse, Question};

/// POST handler answering a question about the text of a screenshot.
#[tracing::instrument(
    name = "Chat"
    skip(state, request),
    fields(
        request_id = %Uuid::new_v4(),
        engine = ?state.engine,
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, Error> {
    let ChatRequest {
        user_message,
        extracted_text,
    } = request;

    let question =
        Question::parse(user_message).map_err(|context| Error::InvalidQuestion { context })?;

    if extracted_text.trim().is_empty() {
        tracing::debug!("Answering without extracted text");
    }

    let response = state
        .assistant
        .answer(&question, &extracted_text)
        .await
        .map_err(|err| Error::Assistant {
            context: "Could not answer the question".to_string(),
            source: err,
            fallback: sample_answer(question.as_ref()).to_string(),
        })?;

    Ok(Json(ChatResponse { response }))
}
