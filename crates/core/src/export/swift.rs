//! `DesignTokens.swift`: one namespace enum per group, UIKit types.

use tokenforge_protocol::{ResolvedToken, format_number};

use super::naming::swift_identifier;
use super::{Artifact, ExportOptions, Platform, Value, collect, doc_line, escape_string};
use crate::diagnostics::Diagnostics;

pub(super) fn render(
    tokens: &[ResolvedToken],
    options: &ExportOptions,
    diags: &mut Diagnostics,
) -> Artifact {
    let grouped = collect(tokens, Platform::Ios, swift_identifier, diags);

    let mut out = String::with_capacity(tokens.len() * 96);
    out.push_str("// Generated by tokenforge. Do not edit.\n\nimport UIKit\n\n");
    out.push_str(&format!("public enum {} {{\n", options.type_name));
    for (i, (group, entries)) in grouped.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("    public enum {} {{\n", group.type_name()));
        for entry in entries {
            if let Some(description) = &entry.token.description {
                out.push_str(&format!("        /// {}\n", doc_line(description)));
            }
            out.push_str(&format!(
                "        public static let {}{}\n",
                entry.ident,
                declaration(&entry.value),
            ));
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");

    Artifact::new(format!("{}.swift", options.type_name), out)
}

/// Type annotation and initializer, e.g. `: CGFloat = 16`.
fn declaration(value: &Value) -> String {
    match value {
        Value::Color(c) => {
            let [r, g, b, a] = c.unit_components().map(format_number);
            format!(" = UIColor(red: {r}, green: {g}, blue: {b}, alpha: {a})")
        }
        Value::Length(n) | Value::Multiplier(n) | Value::Opacity(n) => {
            format!(": CGFloat = {}", format_number(*n))
        }
        Value::Weight(w) => format!(": UIFont.Weight = .{}", weight_name(*w)),
        Value::Family(family) => format!(" = \"{}\"", escape_string(family)),
    }
}

/// Nearest `UIFont.Weight` constant.
fn weight_name(weight: u16) -> &'static str {
    match weight {
        0..=149 => "ultraLight",
        150..=249 => "thin",
        250..=349 => "light",
        350..=449 => "regular",
        450..=549 => "medium",
        550..=649 => "semibold",
        650..=749 => "bold",
        750..=849 => "heavy",
        _ => "black",
    }
}

#[cfg(test)]
mod tests {
    use tokenforge_protocol::{SemanticType, ThemeMode};

    use super::*;
    use crate::diagnostics::Level;
    use crate::export::tests::token;

    #[test]
    fn renders_nested_enums() {
        let mut surface = token("surface", "#EEEEEE", SemanticType::Color);
        surface.mode = Some(ThemeMode::Light);
        surface.description = Some("Default page\nbackground".into());
        let tokens = vec![
            surface,
            token("spacing.md", "16", SemanticType::Spacing),
            token("body.font-family", "Inter", SemanticType::FontFamily),
            token("body.font-weight", "700", SemanticType::FontWeight),
        ];
        let mut diags = Diagnostics::new();
        let file = render(&tokens, &ExportOptions::default(), &mut diags);

        assert_eq!(file.path.to_str(), Some("DesignTokens.swift"));
        let swift = &file.contents;
        assert!(swift.contains("public enum DesignTokens {"));
        assert!(swift.contains("    public enum Colors {"));
        assert!(swift.contains("        /// Default page background\n"));
        assert!(swift.contains(
            "public static let surface = UIColor(red: 0.933, green: 0.933, blue: 0.933, alpha: 1)"
        ));
        assert!(swift.contains("public static let spacingMd: CGFloat = 16"));
        assert!(swift.contains("public static let bodyFontFamily = \"Inter\""));
        assert!(swift.contains("public static let bodyFontWeight: UIFont.Weight = .bold"));
        assert!(swift.find("enum Colors").unwrap() < swift.find("enum Spacing").unwrap());
        assert!(diags.is_empty());
    }

    #[test]
    fn unresolved_tokens_are_skipped_once() {
        let tokens = vec![token("surface", "{color.missing}", SemanticType::Color)];
        let mut diags = Diagnostics::new();
        let file = render(&tokens, &ExportOptions::default(), &mut diags);
        assert!(!file.contents.contains("surface"));
        assert_eq!(diags.count(Level::Warning), 1);
    }

    #[test]
    fn weights_snap_to_uikit_constants() {
        assert_eq!(weight_name(400), "regular");
        assert_eq!(weight_name(600), "semibold");
        assert_eq!(weight_name(900), "black");
        assert_eq!(weight_name(100), "ultraLight");
    }
}
