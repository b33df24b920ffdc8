//! Identifier spelling for each target language.

const SWIFT_KEYWORDS: &[&str] = &[
    "as", "associatedtype", "break", "case", "catch", "class", "continue", "default", "defer",
    "deinit", "do", "else", "enum", "extension", "false", "fileprivate", "for", "func", "guard",
    "if", "import", "in", "init", "inout", "internal", "is", "let", "nil", "open", "operator",
    "private", "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var", "where",
    "while",
];

const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Words of a token name, split at separators and lower-to-upper case
/// changes: `body.fontSize` → `body`, `font`, `Size`.
fn words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut after_lower = false;
    for (i, c) in name.char_indices() {
        if !c.is_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&name[s..i]);
            }
            after_lower = false;
            continue;
        }
        match start {
            Some(s) if c.is_uppercase() && after_lower => {
                words.push(&name[s..i]);
                start = Some(i);
            }
            None => start = Some(i),
            Some(_) => {}
        }
        after_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// `color.gray.100` → `colorGray100`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in words(name).into_iter().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() {
        out.push_str("token");
    }
    if starts_with_digit(&out) {
        out.insert(0, '_');
    }
    out
}

/// `color.gray.100` → `color_gray_100`. Resource names must start with a
/// letter, so a leading digit gets a `token_` prefix.
pub fn snake_case(name: &str) -> String {
    let out = words(name)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    if out.is_empty() || starts_with_digit(&out) {
        format!("token_{out}").trim_end_matches('_').to_owned()
    } else {
        out
    }
}

/// `color.gray.100` → `color-gray-100`.
pub fn kebab_case(name: &str) -> String {
    let out = words(name)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if out.is_empty() { "token".into() } else { out }
}

pub fn swift_identifier(name: &str) -> String {
    escape_keyword(camel_case(name), SWIFT_KEYWORDS)
}

pub fn kotlin_identifier(name: &str) -> String {
    escape_keyword(camel_case(name), KOTLIN_KEYWORDS)
}

fn escape_keyword(ident: String, keywords: &[&str]) -> String {
    if keywords.contains(&ident.as_str()) {
        format!("`{ident}`")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel() {
        assert_eq!(camel_case("color.gray.100"), "colorGray100");
        assert_eq!(camel_case("body.font-size"), "bodyFontSize");
        assert_eq!(camel_case("Border Radius.md"), "borderRadiusMd");
        assert_eq!(camel_case("100"), "_100");
        assert_eq!(camel_case("..."), "token");
        assert_eq!(camel_case("on-surfaceVariant"), "onSurfaceVariant");
    }

    #[test]
    fn snake_and_kebab() {
        assert_eq!(snake_case("Color.Gray.100"), "color_gray_100");
        assert_eq!(snake_case("2xl"), "token_2xl");
        assert_eq!(snake_case("--"), "token");
        assert_eq!(kebab_case("spacing.md"), "spacing-md");
        assert_eq!(kebab_case("body.font_size"), "body-font-size");
        assert_eq!(kebab_case("borderRadius"), "border-radius");
        assert_eq!(snake_case("fontSizes.lg"), "font_sizes_lg");
    }

    #[test]
    fn keywords_are_escaped() {
        assert_eq!(swift_identifier("default"), "`default`");
        assert_eq!(kotlin_identifier("object"), "`object`");
        assert_eq!(kotlin_identifier("default"), "default");
    }
}
