use bytes::Bytes;

use crate::validate::ValidationError;

/// Largest accepted resource PDF.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;
/// Largest accepted author photo.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A file received from a multipart form, fully buffered in memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Accepted upload kinds and their limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Image => "image",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            FileKind::Pdf => MAX_PDF_BYTES,
            FileKind::Image => MAX_IMAGE_BYTES,
        }
    }

    fn accepts(self, content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match self {
            FileKind::Pdf => essence == "application/pdf",
            FileKind::Image => essence.starts_with("image/"),
        }
    }

    /// Check content type and size. Runs before any blob is written.
    pub fn check(self, file: &FileUpload) -> Result<(), ValidationError> {
        if !self.accepts(&file.content_type) {
            return Err(ValidationError::WrongFileType(self.label()));
        }
        if file.size() > self.max_bytes() {
            return Err(ValidationError::FileTooLarge {
                limit_mb: self.max_bytes() / (1024 * 1024),
            });
        }
        Ok(())
    }
}
