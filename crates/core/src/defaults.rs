use tokenforge_protocol::{ResolvedToken, SemanticType, ThemeMode};

/// Built-in sample tokens served when the real token sets cannot be loaded.
pub fn default_tokens() -> Vec<ResolvedToken> {
    use SemanticType::*;

    let token = |name: &str, value: &str, ty: SemanticType, category: &str| ResolvedToken {
        name: name.into(),
        value: value.into(),
        token_type: ty,
        category: category.into(),
        description: None,
        mode: (ty == Color).then_some(ThemeMode::Light),
    };

    vec![
        token("primary", "#2F6FEB", Color, "color"),
        token("surface", "#FFFFFF", Color, "color"),
        token("on-surface", "#1A1A1A", Color, "color"),
        token("outline", "#D0D5DD", Color, "color"),
        token("body.font-family", "Inter", FontFamily, "typography"),
        token("body.font-size", "16", FontSize, "typography"),
        token("body.font-weight", "400", FontWeight, "typography"),
        token("body.line-height", "24", LineHeight, "typography"),
        token("spacing.sm", "8", Spacing, "spacing"),
        token("spacing.md", "16", Spacing, "spacing"),
        token("spacing.lg", "24", Spacing, "spacing"),
        token("radius.md", "8", BorderRadius, "borderRadius"),
    ]
}
