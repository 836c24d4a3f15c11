//! Error types for course deck generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing lecture notes or writing artifacts.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A required input file does not exist.
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The markdown document contains no usable slides.
    #[error("Markdown error: {0}")]
    MarkdownError(String),

    /// A requested slide number is outside the document.
    #[error("Slide {requested} is out of range (1..{available})")]
    SlideOutOfRange { requested: usize, available: usize },

    /// The section plan or another configuration input is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Drawing a figure failed.
    #[error("Render error: {0}")]
    RenderError(String),

    /// Decoding or encoding an image failed.
    #[error("Image error: {0}")]
    ImageError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Writing a CSV dataset failed.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Rendering an HTML page failed.
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigError(e.to_string())
    }
}
