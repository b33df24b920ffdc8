use serde::{Deserialize, Serialize};
use tokenforge_protocol::SemanticType;

/// Classification choices that differ between token exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    /// What the Token Studio `dimension` tag maps to.
    pub dimension_as: SemanticType,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            dimension_as: SemanticType::Spacing,
        }
    }
}

/// Maps a token's source type tag, or failing that its dotted name, to a
/// [`SemanticType`]. Total: every input yields exactly one type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    policy: ClassifierPolicy,
}

impl Classifier {
    pub fn new(policy: ClassifierPolicy) -> Self {
        Self { policy }
    }

    pub fn classify(&self, source_type: &str, name: &str) -> SemanticType {
        self.by_source_type(source_type)
            .unwrap_or_else(|| by_name(name))
    }

    fn by_source_type(&self, source_type: &str) -> Option<SemanticType> {
        let ty = match source_type {
            "color" => SemanticType::Color,
            "dimension" => self.policy.dimension_as,
            "fontFamilies" => SemanticType::FontFamily,
            "fontWeights" => SemanticType::FontWeight,
            "fontSize" | "fontSizes" => SemanticType::FontSize,
            "lineHeights" => SemanticType::LineHeight,
            "spacing" => SemanticType::Spacing,
            "borderRadius" => SemanticType::BorderRadius,
            "borderWidth" => SemanticType::BorderWidth,
            "opacity" => SemanticType::Opacity,
            "boxShadow" => SemanticType::BoxShadow,
            "text" | "number" => SemanticType::FontSize,
            _ => return None,
        };
        Some(ty)
    }
}

/// Name heuristics, first match wins.
const NAME_RULES: &[(&[&str], SemanticType)] = &[
    (&["color", "solid", "bg"], SemanticType::Color),
    (&["font-size", "h1", "h2", "font"], SemanticType::FontSize),
    (&["weight"], SemanticType::FontWeight),
    (&["spacing", "space"], SemanticType::Spacing),
    (&["radius"], SemanticType::BorderRadius),
];

fn by_name(name: &str) -> SemanticType {
    let name = name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| name.contains(n)))
        .map_or(SemanticType::Other, |(_, ty)| *ty)
}
