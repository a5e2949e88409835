//! PDF text extraction for résumé import.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("The PDF contains no extractable text")]
    Empty,

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts the text of every page, one line per page. Runs on the blocking
/// pool since extraction is CPU-bound.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, PdfError> {
    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await?
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let text = join_pages(&raw);
    if text.trim().is_empty() {
        return Err(PdfError::Empty);
    }
    debug!("Extracted {} chars of PDF text", text.len());
    Ok(text)
}

/// Collapses whitespace within each page (pages are separated by form feeds)
/// and joins the pages with newlines.
pub fn join_pages(raw: &str) -> String {
    raw.split('\x0c')
        .map(|page| page.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|page| !page.is_empty())
        .map(|page| page + "\n")
        .collect()
}

/// Accepts uploads declared as PDF by content type or file name.
pub fn is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    content_type == Some("application/pdf")
        || file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_normalizes_whitespace_per_page() {
        let raw = "Jordan   Avery\n\nStaff Engineer\x0c\n  Experience\tNorthwind \n";
        assert_eq!(
            join_pages(raw),
            "Jordan Avery Staff Engineer\nExperience Northwind\n"
        );
    }

    #[test]
    fn test_join_pages_drops_blank_pages() {
        assert_eq!(join_pages("a\x0c \n \x0cb"), "a\nb\n");
        assert_eq!(join_pages(" \n "), "");
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Some("application/pdf"), None));
        assert!(is_pdf(None, Some("CV.PDF")));
        assert!(is_pdf(Some("application/octet-stream"), Some("resume.pdf")));
        assert!(!is_pdf(Some("text/plain"), Some("resume.txt")));
        assert!(!is_pdf(None, None));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_an_extraction_error() {
        let result = extract_text(b"not a pdf at all".to_vec()).await;
        assert!(result.is_err());
    }
}
