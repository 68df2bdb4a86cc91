//! Text normalization shared by skill extraction and embedding

use regex::Regex;
use std::sync::OnceLock;

/// Canonicalizes raw document text
pub struct TextNormalizer {
    punctuation_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Anything that is not a letter, a digit or whitespace
        let punctuation_regex = Regex::new(r"[^\p{L}\p{N}\s]")
            .expect("Invalid punctuation regex");

        let whitespace_regex = Regex::new(r"\s+")
            .expect("Invalid whitespace regex");

        Self {
            punctuation_regex,
            whitespace_regex,
        }
    }

    /// Lower-case, replace punctuation with spaces, collapse whitespace and trim
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation_regex.replace_all(&lowered, " ");
        self.whitespace_regex.replace_all(&stripped, " ").trim().to_string()
    }
}

fn shared() -> &'static TextNormalizer {
    static NORMALIZER: OnceLock<TextNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(TextNormalizer::new)
}

/// Normalize text with the process-wide normalizer
pub fn normalize(text: &str) -> String {
    shared().normalize(text)
}
