//! Output file naming.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Default text after the date in dated file names ("slides").
pub const DEFAULT_DATED_SUFFIX: &str = "スライド";

/// File extension of generated decks.
pub const DECK_EXTENSION: &str = "pptx";

/// How the generated deck is named inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputName {
    /// Use this file name as-is.
    Fixed(String),
    /// `YYYY-MM-DD_<suffix>.pptx` for the given day.
    Dated { suffix: String },
}

impl Default for OutputName {
    fn default() -> Self {
        Self::Dated {
            suffix: DEFAULT_DATED_SUFFIX.to_string(),
        }
    }
}

impl OutputName {
    /// The file name for a deck written on `date`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        match self {
            Self::Fixed(name) => name.clone(),
            Self::Dated { suffix } => {
                format!("{}_{}.{}", date.format("%Y-%m-%d"), suffix, DECK_EXTENSION)
            }
        }
    }

    /// Full output path inside `dir`.
    pub fn path_in(&self, dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(self.file_name(date))
    }
}
