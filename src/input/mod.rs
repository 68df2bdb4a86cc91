//! Document input: type detection, text extraction and caching

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::FileType;
pub use manager::InputManager;
pub use text_extractor::extract_text;
