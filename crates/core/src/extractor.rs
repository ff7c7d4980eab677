use crate::chunking::normalize_whitespace;
use crate::error::LoadError;
use lopdf::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Decodes the text layer of a PDF into per-page plain text.
///
/// Implementations return every page in page order, including pages whose
/// text is empty, so the page count of the document is preserved.
pub trait PdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, LoadError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>, LoadError> {
        let document =
            Document::load_mem(bytes).map_err(|error| LoadError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| LoadError::PdfParse(error.to_string()))?;

            pages.push(PageText {
                number: page_no,
                text: reflow(&text),
            });
        }

        if pages.is_empty() {
            return Err(LoadError::PdfParse("pdf has no pages".to_string()));
        }

        Ok(pages)
    }
}

/// Joins the text items of a page into a single line.
fn reflow(text: &str) -> String {
    normalize_whitespace(text)
}
