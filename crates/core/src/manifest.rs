use serde::{Deserialize, Serialize};
use tokenforge_protocol::ThemeMode;

/// Whether a document provides base values or the published semantic tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Raw palette/scale values; indexed for references, never published.
    Core,
    /// Semantic tokens; indexed and flattened into the token list.
    Sys,
}

/// One entry in the set of documents a load reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSpec {
    /// Token set name, e.g. `Sys/Color/Light`.
    pub name: String,
    pub layer: Layer,
    /// Category stamped on every token of a Sys document. Defaults to the
    /// last segment of `name`, lowercased.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ThemeMode>,
    #[serde(default = "required_by_default")]
    pub required: bool,
}

fn required_by_default() -> bool {
    true
}

impl DocumentSpec {
    pub fn core(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            layer: Layer::Core,
            category: None,
            mode: None,
            required: true,
        }
    }

    pub fn sys(name: &str, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            layer: Layer::Sys,
            category: Some(category.to_owned()),
            mode: None,
            required: true,
        }
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn category(&self) -> String {
        self.category.clone().unwrap_or_else(|| {
            self.name
                .rsplit('/')
                .next()
                .unwrap_or(&self.name)
                .to_lowercase()
        })
    }
}

/// The Core and Sys sets of a standard Token Studio export.
pub fn default_manifest() -> Vec<DocumentSpec> {
    vec![
        DocumentSpec::core("Core/Color"),
        DocumentSpec::core("Core/Typography"),
        DocumentSpec::core("Core/Spacing"),
        DocumentSpec::sys("Sys/Color/Light", "color").with_mode(ThemeMode::Light),
        DocumentSpec::sys("Sys/Color/Dark", "color")
            .with_mode(ThemeMode::Dark)
            .optional(),
        DocumentSpec::sys("Sys/Typography", "typography"),
        DocumentSpec::sys("Sys/Spacing", "spacing"),
        DocumentSpec::sys("Sys/Border Radius", "borderRadius"),
    ]
}
