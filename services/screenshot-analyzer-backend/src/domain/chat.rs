use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const MAX_QUESTION_LENGTH: usize = 2000;

/// A question asked about the text extracted from a screenshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Question(String);

impl Question {
    /// Returns an instance of `Question` if the input is neither blank nor longer
    /// than 2000 graphemes.
    pub fn parse(s: String) -> Result<Question, String> {
        if s.trim().is_empty() {
            return Err("The question is empty.".to_string());
        }
        let length = s.graphemes(true).count();
        if length > MAX_QUESTION_LENGTH {
            return Err(format!(
                "The question is too long ({length} characters, at most {MAX_QUESTION_LENGTH})."
            ));
        }
        Ok(Self(s))
    }
}

impl TryFrom<String> for Question {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Question::parse(value)
    }
}

impl AsRef<str> for Question {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// This is the information sent by the client to chat about a screenshot.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_message: String,
    #[serde(default)]
    pub extracted_text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}
