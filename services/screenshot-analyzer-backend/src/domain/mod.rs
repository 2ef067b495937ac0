pub mod capability;
pub mod chat;
pub mod extraction;
pub mod image;
pub mod ports;
pub mod sample;

pub use capability::{ExtractionEngine, OcrCapability};
pub use chat::{ChatRequest, ChatResponse, Question};
pub use extraction::{ExtractTextRequest, ExtractTextResponse};
pub use image::{ImageDataUrl, ImageError};
