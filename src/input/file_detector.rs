//! File type detection

use crate::error::{MatcherError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "txt" | "text" => Some(FileType::Text),
            _ => None,
        }
    }

    /// Parameters such as `; charset=utf-8` are ignored
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();

        match essence.as_str() {
            PDF_MIME => Ok(FileType::Pdf),
            DOCX_MIME => Ok(FileType::Docx),
            TEXT_MIME => Ok(FileType::Text),
            _ => Err(MatcherError::UnsupportedFileType(mime.to_string())),
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Pdf => PDF_MIME,
            FileType::Docx => DOCX_MIME,
            FileType::Text => TEXT_MIME,
        }
    }
}
