// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check a filename's extension (case-insensitive) against allowed types
pub fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    get_file_extension(filename)
        .map(|ext| allowed.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Human-readable byte size: whole bytes under 1 KiB, one decimal in KB/MB above.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Guess a MIME type from the filename the way a browser file picker would
pub fn guess_content_type(file_name: &str) -> &'static str {
    match get_file_extension(file_name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

// File system utilities
pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

pub async fn write_bytes_safe(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir_exists(parent).await?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

pub async fn read_bytes_safe(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
