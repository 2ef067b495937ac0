pub mod chat_assistant;
pub mod text_extractor;

pub use chat_assistant::{ChatAssistant, Error as AssistantError};
pub use text_extractor::{Error as ExtractionError, TextExtractor};

#[cfg(test)]
pub use chat_assistant::MockChatAssistant;

#[cfg(test)]
pub use text_extractor::MockTextExtractor;
