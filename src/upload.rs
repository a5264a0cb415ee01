// src/upload.rs
use anyhow::Result;
use std::path::Path;

use crate::app_log;
use crate::utils::{self, format_file_size, guess_content_type, has_allowed_extension};

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// The resume currently held by the upload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = utils::read_bytes_safe(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let mime = guess_content_type(&name);

        Ok(Self::new(name, mime, bytes))
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

#[derive(Debug, Clone)]
pub struct UploadValidationError {
    pub file_name: String,
    pub error_type: UploadErrorType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorType {
    WrongFormat,
    TooLarge,
}

impl UploadErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongFormat => "UPLOAD_WRONG_FORMAT",
            Self::TooLarge => "UPLOAD_TOO_LARGE",
        }
    }
}

pub struct UploadValidator;

impl UploadValidator {
    /// Type check first, then size; the first failure wins.
    pub fn validate(file: &UploadedFile) -> Result<(), UploadValidationError> {
        let mime_ok = ALLOWED_MIME_TYPES.contains(&file.mime.as_str());
        let ext_ok = has_allowed_extension(&file.name, ALLOWED_EXTENSIONS);

        if !mime_ok && !ext_ok {
            app_log!(warn, "Rejected upload {} ({})", file.name, file.mime);
            return Err(UploadValidationError {
                file_name: file.name.clone(),
                error_type: UploadErrorType::WrongFormat,
                message: "Please upload a PDF, DOCX, or TXT file".to_string(),
            });
        }

        if file.size > MAX_FILE_SIZE {
            app_log!(warn, "Rejected upload {}: {} bytes", file.name, file.size);
            return Err(UploadValidationError {
                file_name: file.name.clone(),
                error_type: UploadErrorType::TooLarge,
                message: "File size must be less than 5MB".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> UploadedFile {
        UploadedFile::new(name, mime, vec![0u8; size])
    }

    #[test]
    fn test_oversized_pdf_rejected() {
        let err = UploadValidator::validate(&file("r.pdf", "application/pdf", 6_000_000))
            .unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::TooLarge);
        assert_eq!(err.message, "File size must be less than 5MB");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = UploadValidator::validate(&file("r.exe", "application/octet-stream", 1000))
            .unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::WrongFormat);
        assert_eq!(err.error_type.code(), "UPLOAD_WRONG_FORMAT");
    }

    #[test]
    fn test_extension_or_mime_is_enough() {
        assert!(UploadValidator::validate(&file("r.PDF", "text/plain", 1000)).is_ok());
        assert!(UploadValidator::validate(&file("resume", "application/pdf", 1000)).is_ok());
        assert!(UploadValidator::validate(&file("r.Docx", "", 1000)).is_ok());
    }

    #[test]
    fn test_size_boundary_inclusive() {
        let at_limit = file("r.txt", "text/plain", MAX_FILE_SIZE as usize);
        assert!(UploadValidator::validate(&at_limit).is_ok());

        let over = file("r.txt", "text/plain", MAX_FILE_SIZE as usize + 1);
        assert!(UploadValidator::validate(&over).is_err());
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = UploadValidator::validate(&file("r.exe", "", 6_000_000)).unwrap_err();
        assert_eq!(err.error_type, UploadErrorType::WrongFormat);
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        tokio::fs::write(&path, b"Jane Doe\nEngineer").await.unwrap();

        let uploaded = UploadedFile::from_path(&path).await.unwrap();
        assert_eq!(uploaded.name, "resume.txt");
        assert_eq!(uploaded.mime, "text/plain");
        assert_eq!(uploaded.size, 17);
        assert_eq!(uploaded.display_size(), "17 B");
    }
}
