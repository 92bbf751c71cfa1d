//! One-shot conversion from an outline file to a deck file.

use crate::writer::PptxDeck;
use deck_core::{assemble, parse, DeckOptions, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// What a [`generate`] run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Path of the written deck.
    pub output: PathBuf,
    /// Number of slides added.
    pub slides: usize,
    /// Number of body paragraphs over all added slides.
    pub paragraphs: usize,
}

/// Read an outline file as UTF-8 text, dropping a byte order mark.
pub fn read_outline(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;

    match text.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(text),
    }
}

/// Build a deck from the outline at `input` using the `template` deck,
/// and write it to `output`.
pub fn generate(
    input: &Path,
    template: &Path,
    output: &Path,
    options: &DeckOptions,
) -> Result<Summary> {
    let text = read_outline(input)?;
    let forest = parse(&text);

    let mut deck = PptxDeck::open(template, options.clone())?;
    let slides = assemble(&forest, &mut deck)?;
    deck.save(output)?;

    Ok(Summary {
        output: output.to_path_buf(),
        slides,
        paragraphs: deck.deck().paragraph_count(),
    })
}
