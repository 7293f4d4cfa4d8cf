//! Text Extractor: turns an uploaded file into plain text.
//!
//! PDFs go through the text layer only: no OCR, no layout or table reconstruction.
//! A scanned PDF with no text layer yields an empty string, which the pipeline rejects.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;

use crate::models::document::UploadedDocument;

/// PDF text-layer capability: `bytes -> text`.
pub trait PdfReader: Send + Sync {
    fn read_text(&self, bytes: &[u8]) -> Result<String>;
}

/// `PdfReader` backed by the `pdf-extract` crate.
pub struct PdfExtractReader;

impl PdfReader for PdfExtractReader {
    fn read_text(&self, bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).context("Failed to extract text from PDF")
    }
}

/// Extracts text from the document, dispatching on its declared MIME type.
/// PDF parsing is CPU-bound and runs on the blocking pool.
pub async fn extract_text(document: &UploadedDocument, reader: Arc<dyn PdfReader>) -> Result<String> {
    if !document.is_pdf() {
        return Ok(decode_text(&document.raw_content));
    }

    let bytes: Bytes = document.raw_content.clone();
    tokio::task::spawn_blocking(move || reader.read_text(&bytes))
        .await
        .map_err(|e| anyhow!("PDF text extraction aborted: {e}"))?
}

/// Non-PDF uploads are read as UTF-8; invalid sequences become U+FFFD.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
