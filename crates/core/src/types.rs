//! Domain types for representing the slides built from an outline.

use crate::deck::{DeckBuilder, SlideHandle};
use crate::error::{Error, Result};
use serde::Serialize;

/// An in-memory deck: slides in presentation order.
///
/// Implements [`DeckBuilder`], so it can stand in for a real document
/// when previewing the slide plan or in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deck {
    /// Slides in presentation order.
    pub slides: Vec<SlideContent>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total body paragraphs over all slides.
    pub fn paragraph_count(&self) -> usize {
        self.slides.iter().map(|s| s.paragraphs.len()).sum()
    }

    /// Get a slide by handle.
    pub fn slide(&self, handle: SlideHandle) -> Result<&SlideContent> {
        self.slides
            .get(handle.index())
            .ok_or(Error::UnknownSlide(handle.index()))
    }
}

impl DeckBuilder for Deck {
    fn new_slide(&mut self, title: &str) -> Result<SlideHandle> {
        self.slides.push(SlideContent::new(title));
        Ok(SlideHandle::new(self.slides.len() - 1))
    }

    fn append_body_paragraph(&mut self, slide: SlideHandle, text: &str, level: usize) -> Result<()> {
        let content = self
            .slides
            .get_mut(slide.index())
            .ok_or(Error::UnknownSlide(slide.index()))?;
        content.paragraphs.push(BodyParagraph::new(text, level));
        Ok(())
    }
}

/// A title-and-body slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideContent {
    /// Text for the title placeholder.
    pub title: String,

    /// Paragraphs for the body placeholder, in order.
    pub paragraphs: Vec<BodyParagraph>,
}

impl SlideContent {
    /// Create a slide with no body paragraphs.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Paragraph levels in order.
    pub fn levels(&self) -> Vec<usize> {
        self.paragraphs.iter().map(|p| p.level).collect()
    }
}

/// One bullet paragraph in a slide body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyParagraph {
    /// The paragraph text.
    pub text: String,

    /// Bullet indent level (0 = top level).
    pub level: usize,
}

impl BodyParagraph {
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}
