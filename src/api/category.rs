use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A content partition of the API. Selects both the endpoint and the card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Characters,
    Spells,
    Houses,
    Books,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected one of: characters, spells, houses, books)")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 4] = [
        Category::Characters,
        Category::Spells,
        Category::Houses,
        Category::Books,
    ];

    /// Path segment used by the content API.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Characters => "characters",
            Category::Spells => "spells",
            Category::Houses => "houses",
            Category::Books => "books",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Characters => "Characters",
            Category::Spells => "Spells",
            Category::Houses => "Houses",
            Category::Books => "Books",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Category::Characters => "🧙",
            Category::Spells => "✨",
            Category::Houses => "🏰",
            Category::Books => "📚",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::Characters => 0,
            Category::Spells => 1,
            Category::Houses => 2,
            Category::Books => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
