//! Error types for building slide decks from outlines.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or writing a deck.
///
/// Parsing an outline never fails; every variant here comes from the
/// template package or the output side.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input or template, or to write the output.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// The template package is missing a required part or relationship.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The requested slide layout does not exist in the template.
    #[error("Slide layout {index} not found (template has {available} layouts)")]
    MissingLayout { index: usize, available: usize },

    /// The slide layout lacks a placeholder the deck needs.
    #[error("Slide layout has no {0} placeholder")]
    MissingPlaceholder(String),

    /// A slide handle that was not created by this builder.
    #[error("Unknown slide handle: {0}")]
    UnknownSlide(usize),
}
