//! Turning an outline forest into slides.
//!
//! Rendering backends implement [`DeckBuilder`]; [`assemble`] drives any
//! of them with the same walk over the forest.

use crate::error::Result;
use crate::outline::Forest;

/// Handle to a slide created by a [`DeckBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideHandle(usize);

impl SlideHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position of the slide among those this builder created.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The operations the assembler needs from a slide document.
pub trait DeckBuilder {
    /// Add a title-and-body slide at the end of the deck.
    fn new_slide(&mut self, title: &str) -> Result<SlideHandle>;

    /// Add one paragraph at the given bullet level to a slide's body.
    fn append_body_paragraph(&mut self, slide: SlideHandle, text: &str, level: usize) -> Result<()>;
}

/// Emit one slide per root node into `builder`.
///
/// The root's label becomes the title. Every descendant becomes a body
/// paragraph in depth-first order, at its depth below the root.
/// Returns the number of slides created.
pub fn assemble<B: DeckBuilder + ?Sized>(forest: &Forest, builder: &mut B) -> Result<usize> {
    for root in forest {
        let slide = builder.new_slide(&root.label)?;
        for (level, node) in root.descendants() {
            builder.append_body_paragraph(slide, &node.label, level)?;
        }
        log::debug!(
            "Slide {} \"{}\": {} paragraphs",
            slide.index() + 1,
            root.label,
            root.descendant_count()
        );
    }
    Ok(forest.len())
}
