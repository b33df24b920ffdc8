//! Platform exporters: turn a resolved token list into source files for iOS,
//! Android, the web, or plain JSON.
//!
//! Exporters are pure string builders. Tokens a platform cannot represent are
//! skipped with a [`Diagnostic::UnexportableToken`]; when two tokens spell
//! the same identifier in one group, the first wins and the second is
//! reported as a [`Diagnostic::DuplicateIdentifier`].

mod android;
mod naming;
mod swift;
mod web;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokenforge_protocol::{
    Color, Dimension, ResolvedToken, SemanticType, ThemeMode, TokenSummary, parse_font_weight,
};

use crate::diagnostics::{Diagnostic, Diagnostics};

pub use naming::{camel_case, kebab_case, snake_case};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize tokens: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown platform {0:?} (expected ios, android, web or json)")]
    UnknownPlatform(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
    Json,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Self::Ios, Self::Android, Self::Web, Self::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExportError::UnknownPlatform(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Package declaration of the generated Kotlin file.
    pub kotlin_package: String,
    /// Name of the outermost Swift enum and Kotlin object.
    pub type_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            kotlin_package: "com.example.designtokens".into(),
            type_name: "DesignTokens".into(),
        }
    }
}

/// One generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Generate every file for `platform`.
pub fn export(
    tokens: &[ResolvedToken],
    platform: Platform,
    options: &ExportOptions,
    diags: &mut Diagnostics,
) -> Result<Vec<Artifact>, ExportError> {
    let artifacts = match platform {
        Platform::Ios => vec![swift::render(tokens, options, diags)],
        Platform::Android => android::render(tokens, options, diags),
        Platform::Web => web::render(tokens, diags)?,
        Platform::Json => vec![Artifact::new("tokens.json", summaries_json(tokens)?)],
    };
    tracing::debug!(%platform, files = artifacts.len(), "rendered platform files");
    Ok(artifacts)
}

/// Write artifacts under `dir`, creating directories as needed.
pub async fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<(), ExportError> {
    for artifact in artifacts {
        let path = dir.join(&artifact.path);
        let io = |source| ExportError::Io {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io)?;
        }
        tokio::fs::write(&path, &artifact.contents)
            .await
            .map_err(io)?;
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

/// The UI-facing list as pretty JSON.
pub(crate) fn summaries_json(tokens: &[ResolvedToken]) -> Result<String, ExportError> {
    let summaries: Vec<TokenSummary> = tokens.iter().map(TokenSummary::from).collect();
    let mut json = serde_json::to_string_pretty(&summaries)?;
    json.push('\n');
    Ok(json)
}

/// A token value interpreted for code generation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Color(Color),
    /// Logical pixels.
    Length(f64),
    /// Unitless line-height multiplier, from a percentage.
    Multiplier(f64),
    Weight(u16),
    Family(String),
    Opacity(f64),
}

fn interpret(token: &ResolvedToken) -> Result<Value, String> {
    if token.is_unresolved() {
        return Err(format!("value {} is an unresolved reference", token.value));
    }
    let raw = token.value.trim();
    let length = |raw: &str| {
        Dimension::parse(raw)
            .map(|d| Value::Length(d.0))
            .ok_or_else(|| format!("`{raw}` is not a non-negative length"))
    };
    match token.token_type {
        SemanticType::Color => Color::parse(raw)
            .map(Value::Color)
            .ok_or_else(|| format!("`{raw}` is not a hex or rgb() color")),
        SemanticType::Dimension
        | SemanticType::Spacing
        | SemanticType::BorderRadius
        | SemanticType::BorderWidth
        | SemanticType::FontSize => length(raw),
        SemanticType::LineHeight => match raw.strip_suffix('%') {
            Some(percent) => percent
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .map(|p| Value::Multiplier(p / 100.0))
                .ok_or_else(|| format!("`{raw}` is not a percentage")),
            None => length(raw),
        },
        SemanticType::FontWeight => parse_font_weight(raw)
            .map(Value::Weight)
            .ok_or_else(|| format!("`{raw}` is not a font weight")),
        SemanticType::FontFamily => {
            let family = raw.trim_matches(|c| c == '"' || c == '\'').trim();
            if family.is_empty() {
                Err("empty font family".into())
            } else {
                Ok(Value::Family(family.to_owned()))
            }
        }
        SemanticType::Opacity => parse_opacity(raw)
            .map(Value::Opacity)
            .ok_or_else(|| format!("`{raw}` is not an opacity")),
        SemanticType::BoxShadow | SemanticType::Other => Err(format!(
            "{} tokens have no platform representation",
            token.token_type
        )),
    }
}

/// `0.4` or `40%`, within 0–1.
fn parse_opacity(raw: &str) -> Option<f64> {
    let value = match raw.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok()? / 100.0,
        None => raw.parse::<f64>().ok()?,
    };
    (0.0..=1.0).contains(&value).then_some(value)
}

/// Output grouping shared by the code generators. Declaration order is
/// emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Group {
    Colors,
    ColorsDark,
    Spacing,
    Radius,
    BorderWidth,
    Typography,
    Opacity,
}

impl Group {
    fn of(token: &ResolvedToken) -> Self {
        match token.token_type {
            SemanticType::Color if token.mode == Some(ThemeMode::Dark) => Self::ColorsDark,
            SemanticType::Color => Self::Colors,
            SemanticType::BorderRadius => Self::Radius,
            SemanticType::BorderWidth => Self::BorderWidth,
            SemanticType::FontFamily
            | SemanticType::FontSize
            | SemanticType::FontWeight
            | SemanticType::LineHeight => Self::Typography,
            SemanticType::Opacity => Self::Opacity,
            _ => Self::Spacing,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Self::Colors => "Colors",
            Self::ColorsDark => "ColorsDark",
            Self::Spacing => "Spacing",
            Self::Radius => "Radius",
            Self::BorderWidth => "BorderWidth",
            Self::Typography => "Typography",
            Self::Opacity => "Opacity",
        }
    }
}

pub(crate) struct Entry<'a> {
    pub ident: String,
    pub value: Value,
    pub token: &'a ResolvedToken,
}

pub(crate) type Grouped<'a> = BTreeMap<Group, Vec<Entry<'a>>>;

/// Interpret and group every exportable token, spelling identifiers with
/// `spell`. Each token is reported at most once per platform.
pub(crate) fn collect<'a>(
    tokens: &'a [ResolvedToken],
    platform: Platform,
    spell: fn(&str) -> String,
    diags: &mut Diagnostics,
) -> Grouped<'a> {
    let mut grouped = Grouped::new();
    let mut seen = HashSet::new();
    for token in tokens {
        let value = match interpret(token) {
            Ok(value) => value,
            Err(reason) => {
                diags.push(Diagnostic::UnexportableToken {
                    token: token.name.clone(),
                    platform: platform.to_string(),
                    reason,
                });
                continue;
            }
        };
        let group = Group::of(token);
        let ident = spell(&token.name);
        if !seen.insert((group, ident.clone())) {
            diags.push(Diagnostic::DuplicateIdentifier {
                token: token.name.clone(),
                identifier: ident,
                platform: platform.to_string(),
            });
            continue;
        }
        grouped.entry(group).or_default().push(Entry {
            ident,
            value,
            token,
        });
    }
    grouped
}

/// Escape text for XML and HTML content and attribute values.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Escape text for a double-quoted Swift or Kotlin string literal.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Single-line form of a description, for `///` and `/** */` comments.
pub(crate) fn doc_line(description: &str) -> String {
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "* /")
}
