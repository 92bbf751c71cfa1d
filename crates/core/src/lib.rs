//! Core domain types, outline parsing and deck assembly for building
//! slide decks from indented text.

pub mod deck;
pub mod error;
pub mod options;
pub mod outline;
pub mod output;
pub mod types;

pub use deck::{assemble, DeckBuilder, SlideHandle};
pub use error::{Error, Result};
pub use options::DeckOptions;
pub use outline::{parse, Forest, Node, OutlineLine};
pub use output::OutputName;
pub use types::{BodyParagraph, Deck, SlideContent};
