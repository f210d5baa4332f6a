//! Word pairs the game is played over.

use serde::{Deserialize, Serialize};

/// An immutable majority/minority word pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theme {
    /// Word shared by every civilian.
    pub majority: String,

    /// Word handed to the outlier.
    pub minority: String,
}

impl Theme {
    pub fn new(majority: impl Into<String>, minority: impl Into<String>) -> Self {
        Self {
            majority: majority.into(),
            minority: minority.into(),
        }
    }

    /// Word for a given role.
    #[must_use]
    pub fn word(&self, is_outlier: bool) -> &str {
        if is_outlier {
            &self.minority
        } else {
            &self.majority
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.majority, self.minority)
    }
}

/// Fixed list of themes drawn from once per game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    pub fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        const PAIRS: [(&str, &str); 10] = [
            ("computer", "laptop"),
            ("watermelon", "pumpkin"),
            ("football", "basketball"),
            ("movie", "TV series"),
            ("apple", "pear"),
            ("coffee", "milk tea"),
            ("WeChat", "QQ"),
            ("subway", "bus"),
            ("electric fan", "air conditioner"),
            ("sun", "moon"),
        ];

        Self::new(PAIRS.iter().map(|(a, b)| Theme::new(*a, *b)).collect())
    }
}
