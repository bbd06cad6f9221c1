//! PDF text extraction. Treats the document as a text source only: ordering
//! and fidelity are whatever the extractor recovers, and scanned/image-only
//! documents surface as [`ExtractError::NoText`] before any API call is made.

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::ExtractError;

/// Extracted document text plus the page count, for logging and rendering.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub pages: usize,
}

/// Extract the full text of the PDF at `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !is_pdf(&bytes) {
        return Err(ExtractError::NotPdf {
            path: path.to_path_buf(),
        });
    }

    let pages = lopdf::Document::load_mem(&bytes)
        .map_err(|e| ExtractError::Load(e.to_string()))?
        .get_pages()
        .len();

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ExtractError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractError::NoText {
            path: path.to_path_buf(),
        });
    }

    debug!(pages, chars = text.len(), "extracted document text");
    Ok(ExtractedDocument { text, pages })
}

/// Check the PDF magic bytes before handing the file to the parsers.
fn is_pdf(data: &[u8]) -> bool {
    data.len() >= 4 && &data[..4] == b"%PDF"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_byte_sniffing() {
        assert!(is_pdf(b"%PDF-1.4"));
        assert!(!is_pdf(b"Not a PDF"));
        assert!(!is_pdf(b"%PD"));
    }
}
