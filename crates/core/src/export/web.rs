//! `tokens.css` custom properties, an `index.html` catalogue, and the JSON
//! summary list.

use std::collections::HashSet;

use tokenforge_protocol::{Color, ResolvedToken, SemanticType, format_number};

use super::naming::kebab_case;
use super::{
    Artifact, ExportError, Group, Platform, Value, collect, escape_xml, summaries_json,
};
use crate::diagnostics::{Diagnostic, Diagnostics};

pub(super) fn render(
    tokens: &[ResolvedToken],
    diags: &mut Diagnostics,
) -> Result<Vec<Artifact>, ExportError> {
    Ok(vec![
        Artifact::new("tokens.css", css(tokens, diags)),
        Artifact::new("index.html", catalogue(tokens)),
        Artifact::new("tokens.json", summaries_json(tokens)?),
    ])
}

fn css_value(value: &Value) -> String {
    match value {
        Value::Color(c) if c.is_opaque() => c.hex6(),
        Value::Color(c) => format!(
            "rgba({}, {}, {}, {})",
            c.r,
            c.g,
            c.b,
            format_number(f64::from(c.a) / 255.0)
        ),
        Value::Length(px) => format!("{}px", format_number(*px)),
        Value::Multiplier(n) | Value::Opacity(n) => format_number(*n),
        Value::Weight(w) => w.to_string(),
        Value::Family(family) => format!("\"{}\"", family.replace('"', "\\\"")),
    }
}

fn css(tokens: &[ResolvedToken], diags: &mut Diagnostics) -> String {
    let grouped = collect(tokens, Platform::Web, kebab_case, diags);
    let mut root = String::new();
    let mut dark = String::new();
    // Custom property names are shared across groups within one block.
    let mut root_seen = HashSet::new();
    let mut dark_seen = HashSet::new();
    for (group, entries) in &grouped {
        let (block, seen, indent) = if *group == Group::ColorsDark {
            (&mut dark, &mut dark_seen, "    ")
        } else {
            (&mut root, &mut root_seen, "  ")
        };
        for entry in entries {
            if !seen.insert(entry.ident.as_str()) {
                diags.push(Diagnostic::DuplicateIdentifier {
                    token: entry.token.name.clone(),
                    identifier: entry.ident.clone(),
                    platform: Platform::Web.to_string(),
                });
                continue;
            }
            block.push_str(&format!(
                "{indent}--{}: {};\n",
                entry.ident,
                css_value(&entry.value)
            ));
        }
    }

    let mut out = String::from("/* Generated by tokenforge. Do not edit. */\n");
    out.push_str(":root {\n");
    out.push_str(&root);
    out.push_str("}\n");
    if !dark.is_empty() {
        out.push_str("\n@media (prefers-color-scheme: dark) {\n  :root {\n");
        out.push_str(&dark);
        out.push_str("  }\n}\n");
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,-apple-system,sans-serif;margin:2rem;color:#1a1a2e}\
table{border-collapse:collapse;width:100%;margin-bottom:2rem}\
th,td{text-align:left;padding:4px 8px;border-bottom:1px solid #e0e0e0;font-size:13px}\
code{font-family:ui-monospace,monospace}\
.swatch{display:inline-block;width:24px;height:24px;border-radius:4px;border:1px solid #d0d5dd}\
.unresolved{color:#b42318}";

/// Static catalogue page: one table per category, in first-seen order, with a
/// swatch next to every parseable color.
fn catalogue(tokens: &[ResolvedToken]) -> String {
    let mut categories: Vec<(&str, Vec<&ResolvedToken>)> = Vec::new();
    for token in tokens {
        match categories.iter_mut().find(|(c, _)| *c == token.category) {
            Some((_, list)) => list.push(token),
            None => categories.push((token.category.as_str(), vec![token])),
        }
    }

    let mut html = String::with_capacity(tokens.len() * 160 + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Design tokens</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>Design tokens</h1>\n<p>{} tokens</p>\n", tokens.len()));

    for (category, list) in categories {
        html.push_str(&format!(
            "<h2 id=\"{}\">{}</h2>\n<table>\n",
            escape_xml(&kebab_case(category)),
            escape_xml(category)
        ));
        html.push_str(concat!(
            "<tr><th></th><th>Name</th><th>Value</th>",
            "<th>Type</th><th>Mode</th><th>Description</th></tr>\n",
        ));
        for token in list {
            let swatch = match token.token_type {
                SemanticType::Color => Color::parse(&token.value)
                    .map(|c| {
                        format!(
                            "<span class=\"swatch\" style=\"background:{}\"></span>",
                            escape_xml(&css_value(&Value::Color(c)))
                        )
                    })
                    .unwrap_or_default(),
                _ => String::new(),
            };
            let value_class = if token.is_unresolved() {
                " class=\"unresolved\""
            } else {
                ""
            };
            html.push_str(&format!(
                concat!(
                    "<tr><td>{swatch}</td><td><code>{}</code></td>",
                    "<td{value_class}><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                ),
                escape_xml(&token.name),
                escape_xml(&token.value),
                token.token_type,
                token.mode.as_ref().map(ToString::to_string).unwrap_or_default(),
                escape_xml(token.description.as_deref().unwrap_or("")),
                swatch = swatch,
                value_class = value_class,
            ));
        }
        html.push_str("</table>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use tokenforge_protocol::ThemeMode;

    use super::*;
    use crate::diagnostics::Level;
    use crate::export::tests::token;

    fn with_mode(mut t: ResolvedToken, mode: ThemeMode) -> ResolvedToken {
        t.mode = Some(mode);
        t.category = "color".into();
        t
    }

    #[test]
    fn css_custom_properties_with_dark_override() {
        let tokens = vec![
            with_mode(token("surface", "#EEEEEE", SemanticType::Color), ThemeMode::Light),
            with_mode(token("surface", "#121212", SemanticType::Color), ThemeMode::Dark),
            token("scrim", "rgba(0,0,0,0.5)", SemanticType::Color),
            token("spacing.md", "1rem", SemanticType::Spacing),
            token("body.font-family", "Inter", SemanticType::FontFamily),
        ];
        let mut diags = Diagnostics::new();
        let css = css(&tokens, &mut diags);
        assert!(css.contains(":root {\n  --surface: #EEEEEE;\n"));
        assert!(css.contains("  --scrim: rgba(0, 0, 0, 0.502);\n"));
        assert!(css.contains("  --spacing-md: 16px;\n"));
        assert!(css.contains("  --body-font-family: \"Inter\";\n"));
        assert!(css.contains(
            "@media (prefers-color-scheme: dark) {\n  :root {\n    --surface: #121212;\n  }\n}\n"
        ));
        assert!(diags.is_empty());
    }

    #[test]
    fn same_property_from_two_groups_is_emitted_once() {
        let tokens = vec![
            token("md", "16", SemanticType::Spacing),
            token("md", "8", SemanticType::BorderRadius),
        ];
        let mut diags = Diagnostics::new();
        let css = css(&tokens, &mut diags);
        assert_eq!(css.matches("--md:").count(), 1);
        assert!(css.contains("  --md: 16px;\n"));
        assert_eq!(diags.count(Level::Warning), 1);
        assert!(matches!(
            diags.iter().next(),
            Some(Diagnostic::DuplicateIdentifier { identifier, platform, .. })
                if identifier == "md" && platform == "web"
        ));
    }

    #[test]
    fn light_and_dark_blocks_keep_their_own_names() {
        let tokens = vec![
            with_mode(token("surface", "#EEEEEE", SemanticType::Color), ThemeMode::Light),
            with_mode(token("surface", "#121212", SemanticType::Color), ThemeMode::Dark),
        ];
        let mut diags = Diagnostics::new();
        let css = css(&tokens, &mut diags);
        assert_eq!(css.matches("--surface:").count(), 2);
        assert!(diags.is_empty());
    }

    #[test]
    fn no_dark_block_without_dark_tokens() {
        let tokens = vec![token("spacing.md", "16", SemanticType::Spacing)];
        let css = css(&tokens, &mut Diagnostics::new());
        assert!(!css.contains("@media"));
    }

    #[test]
    fn catalogue_groups_by_category_and_escapes() {
        let mut spacing = token("spacing.md", "16", SemanticType::Spacing);
        spacing.category = "spacing".into();
        spacing.description = Some("<b>medium</b> gap".into());
        let tokens = vec![
            with_mode(token("surface", "#EEEEEE", SemanticType::Color), ThemeMode::Light),
            spacing,
            with_mode(token("missing", "{color.nope}", SemanticType::Color), ThemeMode::Light),
        ];
        let html = catalogue(&tokens);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>3 tokens</p>"));
        let color = html.find("<h2 id=\"color\">").unwrap();
        assert!(color < html.find("<h2 id=\"spacing\">").unwrap());
        assert_eq!(html.matches("<h2").count(), 2);
        assert!(html.contains("style=\"background:#EEEEEE\""));
        assert!(html.contains("&lt;b&gt;medium&lt;/b&gt; gap"));
        assert!(html.contains("class=\"unresolved\"><code>{color.nope}</code>"));
        assert_eq!(html.matches("class=\"swatch\"").count(), 1);
    }

    #[test]
    fn web_bundle_has_three_files() {
        let tokens = vec![token("spacing.md", "16", SemanticType::Spacing)];
        let files = render(&tokens, &mut Diagnostics::new()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.to_str().unwrap()).collect();
        assert_eq!(paths, ["tokens.css", "index.html", "tokens.json"]);
    }
}
