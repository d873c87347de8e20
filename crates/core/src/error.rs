//! Error types for building slide decks from image folders.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, building or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file or directory.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No presentation package exists at the given path.
    #[error("Package not found at '{}'", .0.display())]
    PackageNotFound(PathBuf),

    /// The package exists but its structure is invalid.
    #[error("Invalid or corrupted package: {0}")]
    CorruptedPackage(String),

    /// A part referenced by a relationship is missing from the package.
    #[error("Part not found in package: {0}")]
    PartNotFound(String),

    /// The requested slide layout does not exist.
    #[error("Slide layout {index} not found (presentation has {available})")]
    LayoutNotFound { index: usize, available: usize },

    /// The image could not be read as a supported raster format.
    #[error("Unsupported or unreadable image '{path}': {reason}")]
    UnsupportedImage { path: String, reason: String },

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid run options.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// True when the error means "there is no deck here yet".
    pub fn is_package_not_found(&self) -> bool {
        matches!(self, Error::PackageNotFound(_))
    }
}
