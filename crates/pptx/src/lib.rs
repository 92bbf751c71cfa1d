//! PPTX (Office Open XML) backend for building outline decks.
//!
//! A template .pptx is a ZIP archive of XML parts. New slides are rendered
//! from one of its layouts and registered in the presentation part, its
//! relationships and the content type list.

pub mod generate;
pub mod layout;
pub mod package;
pub mod slide;
pub mod writer;

mod xml;

#[cfg(test)]
mod fixture;

pub use generate::{generate, read_outline, Summary};
pub use layout::{Placeholder, SlideLayout};
pub use package::Package;
pub use writer::PptxDeck;
