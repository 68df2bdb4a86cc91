//! Text extraction from uploaded document bytes

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use regex::Regex;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            MatcherError::DocumentExtraction(format!("Failed to extract text from PDF: {}", e))
        })
    }
}

/// Office Open XML word documents
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            MatcherError::DocumentExtraction(format!("Invalid DOCX archive: {}", e))
        })?;

        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| MatcherError::DocumentExtraction(format!("DOCX has no document body: {}", e)))?
            .read_to_string(&mut document_xml)?;

        Ok(self.xml_to_text(&document_xml))
    }
}

impl DocxExtractor {
    fn xml_to_text(&self, xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:br/>", "\n")
            .replace("<w:tab/>", "\t");

        let re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let stripped = re.replace_all(&text, "");

        let unescaped = stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = unescaped
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

/// Extract plain text from a document given its declared MIME type
pub fn extract_text(bytes: &[u8], mime_type: &str) -> Result<String> {
    let file_type = FileType::from_mime(mime_type)?;

    let text = match file_type {
        FileType::Pdf => PdfExtractor.extract(bytes)?,
        FileType::Docx => DocxExtractor.extract(bytes)?,
        FileType::Text => PlainTextExtractor.extract(bytes)?,
    };

    log::debug!("Extracted {} characters from {} document", text.len(), mime_type);
    Ok(text)
}
