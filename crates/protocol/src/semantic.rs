use serde::{Deserialize, Serialize};

/// The closed set of semantic categories every resolved token falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    FontSize,
    LineHeight,
    Spacing,
    BorderRadius,
    BorderWidth,
    Opacity,
    BoxShadow,
    Other,
}

impl SemanticType {
    pub const ALL: [SemanticType; 12] = [
        Self::Color,
        Self::Dimension,
        Self::FontFamily,
        Self::FontWeight,
        Self::FontSize,
        Self::LineHeight,
        Self::Spacing,
        Self::BorderRadius,
        Self::BorderWidth,
        Self::Opacity,
        Self::BoxShadow,
        Self::Other,
    ];

    /// Wire spelling, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::FontFamily => "fontFamily",
            Self::FontWeight => "fontWeight",
            Self::FontSize => "fontSize",
            Self::LineHeight => "lineHeight",
            Self::Spacing => "spacing",
            Self::BorderRadius => "borderRadius",
            Self::BorderWidth => "borderWidth",
            Self::Opacity => "opacity",
            Self::BoxShadow => "boxShadow",
            Self::Other => "other",
        }
    }

    /// Whether values of this type are a length that platforms express in
    /// `dp`/`pt`/`px`.
    pub fn is_length(&self) -> bool {
        matches!(
            self,
            Self::Dimension | Self::Spacing | Self::BorderRadius | Self::BorderWidth
        )
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
