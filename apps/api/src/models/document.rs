use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A single uploaded file. Lives for one request and is never persisted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    /// Declared content type of the multipart part; empty when the client sent none.
    pub mime_type: String,
    pub size_bytes: u64,
    pub raw_content: Bytes,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, raw_content: Bytes) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: raw_content.len() as u64,
            raw_content,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE
    }

    pub fn file_info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size_bytes,
        }
    }
}

/// File metadata echoed back in a successful envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_taken_from_content() {
        let doc = UploadedDocument::new("cv.pdf", PDF_MIME_TYPE, Bytes::from_static(b"%PDF-1.4"));
        assert_eq!(doc.size_bytes, 8);
        assert!(doc.is_pdf());
    }

    #[test]
    fn test_file_info_serializes_mime_as_type() {
        let doc = UploadedDocument::new("notes.txt", "text/plain", Bytes::from_static(b"hi"));
        let value = serde_json::to_value(doc.file_info()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "notes.txt", "type": "text/plain", "size": 2})
        );
        assert!(!doc.is_pdf());
    }
}
