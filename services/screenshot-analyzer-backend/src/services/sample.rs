use async_trait::async_trait;

use crate::domain::ports::secondary::{
    AssistantError, ChatAssistant, ExtractionError, TextExtractor,
};
use crate::domain::sample::{sample_answer, SAMPLE_EXTRACTED_TEXT};
use crate::domain::{ImageDataUrl, Question};

/// Serves canned data, so that clients have something to show when neither the
/// vision API nor a local OCR engine are available.
#[derive(Debug, Clone, Default)]
pub struct SampleService;

#[async_trait]
impl TextExtractor for SampleService {
    async fn extract_text(&self, image: &ImageDataUrl) -> Result<String, ExtractionError> {
        tracing::debug!(?image, "Serving sample extracted text");
        Ok(SAMPLE_EXTRACTED_TEXT.to_string())
    }
}

#[async_trait]
impl ChatAssistant for SampleService {
    async fn answer(&self, question: &Question, _extracted_text: &str) -> Result<String, AssistantError> {
        Ok(sample_answer(question.as_ref()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[tokio::test]
    async fn sample_service_should_ignore_the_image() {
        let image = ImageDataUrl::parse("data:image/gif;base64,R0lGODlhAQABAAAAACw=".to_string())
            .expect("image");
        let text = SampleService.extract_text(&image).await;
        assert_that(&text).is_ok().is_equal_to(SAMPLE_EXTRACTED_TEXT.to_string());
    }

    #[tokio::test]
    async fn sample_service_should_answer_from_keywords() {
        let question = Question::parse("What is the revenue?".to_string()).expect("question");
        let answer = SampleService.answer(&question, "").await.expect("answer");
        assert_that(&answer.contains("$12,450")).is_true();
    }
}
