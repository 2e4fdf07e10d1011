use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Folder '{}' does not exist", .0.display())]
    FolderNotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Tesseract is not available: {0}")]
    TesseractUnavailable(String),
}
