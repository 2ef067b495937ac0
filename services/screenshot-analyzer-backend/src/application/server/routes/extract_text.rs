use axum::extract::{Json, State};
use common::err_context::ErrorContextExt;
use uuid::Uuid;

use super::Error;
use crate::application::server::AppState;
use crate::domain::{ExtractTextRequest, ExtractTextResponse, ImageDataUrl};

/// POST handler extracting the text of a screenshot.
///
/// The response can be:
/// - 200 `{ "text": ... }` with what the engine found,
/// - 400 when the image is not a base64 `data:` URL of an image,
/// - 500 when the engine fails, with the sample text, so the client always
///   has something to show.
#[tracing::instrument(
    name = "Text Extraction"
    skip(state, request),
    fields(
        request_id = %Uuid::new_v4(),
        engine = ?state.engine,
    )
)]
pub async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<ExtractTextRequest>,
) -> Result<Json<ExtractTextResponse>, Error> {
    let image = ImageDataUrl::try_from(request.image_data_url)
        .context("The image is not a valid data URL")?;

    tracing::debug!(?image, "Extracting text");

    let text = state
        .extractor
        .extract_text(&image)
        .await
        .context("Could not extract text from the image")?;

    tracing::info!(length = text.len(), "Text extracted");

    Ok(Json(ExtractTextResponse { text }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        middleware::map_response_with_state,
        routing::{post, Router},
    };
    use hyper::body::HttpBody;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::*;
    use crate::application::server::middleware::response_map::error_detail;
    use crate::domain::ports::secondary::{ExtractionError, MockTextExtractor};
    use crate::domain::sample::SAMPLE_EXTRACTED_TEXT;
    use crate::domain::{ExtractionEngine, OcrCapability};
    use crate::services::sample::SampleService;

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn state(extractor: MockTextExtractor, debug: bool) -> AppState {
        AppState {
            extractor: Arc::new(extractor),
            assistant: Arc::new(SampleService),
            capability: OcrCapability::Available {
                engine: "tesseract".to_string(),
                version: "tesseract 5.3.0".to_string(),
            },
            engine: ExtractionEngine::Tesseract,
            debug,
        }
    }

    fn extraction_route(state: AppState) -> Router {
        let debug = state.debug;
        Router::new()
            .route("/api/extract-text", post(extract_text))
            .layer(map_response_with_state(debug, error_detail))
            .with_state(state)
    }

    /// Wraps the body into a JSON request to the extraction endpoint.
    fn send_extraction_request(body: String) -> Request<Body> {
        Request::builder()
            .uri("/api/extract-text")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .method("POST")
            .body(Body::from(body))
            .unwrap()
    }

    fn request(image_data_url: &str) -> String {
        serde_json::to_string(&ExtractTextRequest {
            image_data_url: image_data_url.to_string(),
        })
        .expect("request")
    }

    async fn json_body(mut response: axum::response::Response) -> Value {
        let mut data = Vec::new();
        while let Some(chunk) = response.data().await {
            data.extend(&chunk.unwrap());
        }
        serde_json::from_slice(&data).expect("json")
    }

    #[tokio::test]
    async fn extraction_should_return_the_engine_text() {
        let mut extractor = MockTextExtractor::new();
        extractor
            .expect_extract_text()
            .withf(|image: &ImageDataUrl| image.media_type() == "image/png")
            .times(1)
            .return_once(|_| Ok("Total Users: 1,245".to_string()));

        let response = extraction_route(state(extractor, false))
            .oneshot(send_extraction_request(request(PIXEL)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["text"], "Total Users: 1,245");
    }

    #[tokio::test]
    async fn extraction_should_reject_an_invalid_data_url() {
        let mut extractor = MockTextExtractor::new();
        extractor.expect_extract_text().never();

        let response = extraction_route(state(extractor, false))
            .oneshot(send_extraction_request(request(
                "https://example.com/screenshot.png",
            )))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["code"], "image/invalid_data_url");
    }

    #[tokio::test]
    async fn extraction_should_reject_a_request_without_image() {
        let mut extractor = MockTextExtractor::new();
        extractor.expect_extract_text().never();

        let response = extraction_route(state(extractor, false))
            .oneshot(send_extraction_request(r#"{"image": "nope"}"#.to_string()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn extraction_failure_should_fall_back_to_the_sample_text() {
        let mut extractor = MockTextExtractor::new();
        extractor.expect_extract_text().return_once(|_| {
            Err(ExtractionError::Engine {
                context: "tesseract exited with 1".to_string(),
            })
        });

        let response = extraction_route(state(extractor, false))
            .oneshot(send_extraction_request(request(PIXEL)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["text"], SAMPLE_EXTRACTED_TEXT);
        assert_eq!(body["code"], "extraction/engine_failure");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn extraction_failure_in_debug_mode_should_carry_the_detail() {
        let mut extractor = MockTextExtractor::new();
        extractor.expect_extract_text().return_once(|_| {
            Err(ExtractionError::Engine {
                context: "tesseract exited with 1".to_string(),
            })
        });

        let response = extraction_route(state(extractor, true))
            .oneshot(send_extraction_request(request(PIXEL)))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["text"], SAMPLE_EXTRACTED_TEXT);
        let detail = body["detail"].as_str().expect("detail");
        assert!(detail.contains("tesseract exited with 1"));
    }
}
