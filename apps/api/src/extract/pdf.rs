use anyhow::Result;

/// Extracts text from an in-memory PDF, pages concatenated in document order.
pub fn extract(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| anyhow::anyhow!("PDF text extraction failed: {e}"))
}
