use serde::{Deserialize, Serialize};

use crate::{DottedPath, SemanticType};

/// Appearance a color token set was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}

/// A flattened, reference-free token ready for platform export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedToken {
    /// Dotted path within the token set it was read from.
    pub name: DottedPath,
    /// Fully resolved literal value. An unresolvable reference is kept
    /// verbatim (still `{…}`-shaped).
    pub value: String,
    #[serde(rename = "type")]
    pub token_type: SemanticType,
    /// Category of the token set the token came from (e.g. "color").
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ThemeMode>,
}

impl ResolvedToken {
    /// Whether the value is still a `{…}` reference after resolution.
    pub fn is_unresolved(&self) -> bool {
        crate::is_reference(&self.value)
    }

    pub fn summary(&self) -> TokenSummary {
        TokenSummary::from(self)
    }
}

/// The JSON shape handed to UI consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub name: DottedPath,
    pub value: String,
    #[serde(rename = "type")]
    pub token_type: SemanticType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&ResolvedToken> for TokenSummary {
    fn from(token: &ResolvedToken) -> Self {
        Self {
            name: token.name.clone(),
            value: token.value.clone(),
            token_type: token.token_type,
            category: token.category.clone(),
            description: token.description.clone(),
        }
    }
}
