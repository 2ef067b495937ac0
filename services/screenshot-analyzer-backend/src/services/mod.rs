pub mod sample;
pub mod tesseract;
pub mod vision;
