//! Settings for how outline slides are laid out in the template.

/// Default slide layout index within the first slide master.
pub const DEFAULT_LAYOUT_INDEX: usize = 2;

/// Default `idx` of the body placeholder on that layout.
pub const DEFAULT_BODY_PLACEHOLDER_IDX: u32 = 1;

/// Default language tag for body text.
pub const DEFAULT_LANGUAGE: &str = "ja-JP";

/// Options for building a deck from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckOptions {
    /// Index into the first master's slide layout list.
    pub layout_index: usize,

    /// `idx` of the placeholder that receives the body paragraphs.
    pub body_placeholder_idx: u32,

    /// Language tag applied to every body run.
    pub language: String,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            layout_index: DEFAULT_LAYOUT_INDEX,
            body_placeholder_idx: DEFAULT_BODY_PLACEHOLDER_IDX,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl DeckOptions {
    /// Create options with the default layout, body placeholder and language.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_index(mut self, index: usize) -> Self {
        self.layout_index = index;
        self
    }

    pub fn with_body_placeholder_idx(mut self, idx: u32) -> Self {
        self.body_placeholder_idx = idx;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DeckOptions::new();
        assert_eq!(options.layout_index, 2);
        assert_eq!(options.body_placeholder_idx, 1);
        assert_eq!(options.language, "ja-JP");
    }

    #[test]
    fn test_builders() {
        let options = DeckOptions::new()
            .with_layout_index(1)
            .with_body_placeholder_idx(10)
            .with_language("en-US");
        assert_eq!(
            options,
            DeckOptions {
                layout_index: 1,
                body_placeholder_idx: 10,
                language: "en-US".to_string(),
            }
        );
    }
}
