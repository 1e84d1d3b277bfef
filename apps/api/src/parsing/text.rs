//! Text extraction boundary: "given document bytes, return text or fail".

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Lines at or below this many characters are dropped as noise.
const MIN_LINE_CHARS: usize = 5;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,;:!?@()\-/+#]").unwrap());

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    Empty,

    #[error("document could not be read: {0}")]
    Unreadable(String),
}

/// Converts an uploaded document into newline-segmented plain text.
///
/// Implementations are synchronous and may be CPU heavy; callers run them
/// inside `tokio::task::spawn_blocking`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF extractor backed by `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
        Ok(clean_text(&raw))
    }
}

/// Normalises raw extracted text: collapses whitespace inside each line, strips
/// symbols outside the common punctuation set, and drops near-empty lines.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .filter_map(|line| {
            let collapsed = RE_WHITESPACE.replace_all(line, " ");
            let stripped = RE_DISALLOWED.replace_all(&collapsed, "");
            let trimmed = stripped.trim();
            (trimmed.chars().count() > MIN_LINE_CHARS).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
