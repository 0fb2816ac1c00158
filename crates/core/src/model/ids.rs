use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Question
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Unique identifier for a Theme
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThemeId(u32);

impl ThemeId {
    /// Creates a new `ThemeId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Debug for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThemeId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(QuestionId::new)
            .map_err(|_| ParseIdError {
                kind: "QuestionId".to_string(),
            })
    }
}

impl FromStr for ThemeId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(ThemeId::new)
            .map_err(|_| ParseIdError {
                kind: "ThemeId".to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
