//! Android resources (`values/colors.xml`, `values-night/colors.xml`,
//! `values/dimens.xml`) and a Compose `DesignTokens.kt`.

use std::collections::HashSet;

use tokenforge_protocol::{ResolvedToken, format_number};

use super::naming::{kotlin_identifier, snake_case};
use super::{
    Artifact, Entry, ExportOptions, Group, Grouped, Platform, Value, collect, doc_line,
    escape_string, escape_xml,
};
use crate::diagnostics::{Diagnostic, Diagnostics};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<!-- Generated by tokenforge. Do not edit. -->\n";

pub(super) fn render(
    tokens: &[ResolvedToken],
    options: &ExportOptions,
    diags: &mut Diagnostics,
) -> Vec<Artifact> {
    let grouped = collect(tokens, Platform::Android, kotlin_identifier, diags);

    let mut artifacts = Vec::with_capacity(4);
    let empty = Vec::new();
    let light = grouped.get(&Group::Colors).unwrap_or(&empty);
    let dark = grouped.get(&Group::ColorsDark).unwrap_or(&empty);
    if let Some(xml) = colors_xml(light, diags) {
        artifacts.push(Artifact::new("values/colors.xml", xml));
    }
    if let Some(xml) = colors_xml(dark, diags) {
        artifacts.push(Artifact::new("values-night/colors.xml", xml));
    }
    if let Some(xml) = dimens_xml(&grouped, diags) {
        artifacts.push(Artifact::new("values/dimens.xml", xml));
    }
    artifacts.push(Artifact::new(
        format!("{}.kt", options.type_name),
        kotlin_file(&grouped, options),
    ));
    artifacts
}

/// Resource names for `entries`, first-wins within one resource file.
fn resource_names<'e, 'a: 'e>(
    entries: impl IntoIterator<Item = &'e Entry<'a>>,
    seen: &mut HashSet<String>,
    diags: &mut Diagnostics,
) -> Vec<(String, &'e Entry<'a>)> {
    let mut named = Vec::new();
    for entry in entries {
        let name = snake_case(&entry.token.name);
        if seen.insert(name.clone()) {
            named.push((name, entry));
        } else {
            diags.push(Diagnostic::DuplicateIdentifier {
                token: entry.token.name.clone(),
                identifier: name,
                platform: Platform::Android.to_string(),
            });
        }
    }
    named
}

fn resources_file(lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let mut xml = String::from(XML_HEADER);
    xml.push_str("<resources>\n");
    xml.extend(lines);
    xml.push_str("</resources>\n");
    Some(xml)
}

/// `#RRGGBB`, or `#AARRGGBB` when translucent.
fn android_color(value: &Value) -> Option<String> {
    match value {
        Value::Color(c) if c.is_opaque() => Some(c.hex6()),
        Value::Color(c) => Some(format!("#{}", c.argb())),
        _ => None,
    }
}

fn colors_xml(entries: &[Entry<'_>], diags: &mut Diagnostics) -> Option<String> {
    let lines = resource_names(entries, &mut HashSet::new(), diags)
        .into_iter()
        .filter_map(|(name, entry)| {
            let color = android_color(&entry.value)?;
            Some(format!(
                "    <color name=\"{}\">{color}</color>\n",
                escape_xml(&name)
            ))
        })
        .collect();
    resources_file(lines)
}

/// Lengths from every group share one resource namespace; font sizes are
/// `sp`, everything else `dp`.
fn dimens_xml(grouped: &Grouped<'_>, diags: &mut Diagnostics) -> Option<String> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    for (group, entries) in grouped {
        let lengths = entries
            .iter()
            .filter(|e| matches!(e.value, Value::Length(_)));
        let unit = if *group == Group::Typography { "sp" } else { "dp" };
        for (name, entry) in resource_names(lengths, &mut seen, diags) {
            if let Value::Length(px) = entry.value {
                lines.push(format!(
                    "    <dimen name=\"{}\">{}{unit}</dimen>\n",
                    escape_xml(&name),
                    format_number(px)
                ));
            }
        }
    }
    resources_file(lines)
}

fn kotlin_file(grouped: &Grouped<'_>, options: &ExportOptions) -> String {
    let mut kt = String::from("// Generated by tokenforge. Do not edit.\n");
    kt.push_str(&format!("package {}\n\n", options.kotlin_package));
    kt.push_str(
        "import androidx.compose.ui.graphics.Color\n\
         import androidx.compose.ui.text.font.FontWeight\n\
         import androidx.compose.ui.unit.dp\n\
         import androidx.compose.ui.unit.em\n\
         import androidx.compose.ui.unit.sp\n\n",
    );
    kt.push_str(&format!("object {} {{\n", options.type_name));
    for (i, (group, entries)) in grouped.iter().enumerate() {
        if i > 0 {
            kt.push('\n');
        }
        kt.push_str(&format!("    object {} {{\n", group.type_name()));
        for entry in entries {
            if let Some(description) = &entry.token.description {
                kt.push_str(&format!("        /** {} */\n", doc_line(description)));
            }
            kt.push_str(&format!(
                "        {}\n",
                kotlin_property(*group, &entry.ident, &entry.value)
            ));
        }
        kt.push_str("    }\n");
    }
    kt.push_str("}\n");
    kt
}

fn kotlin_property(group: Group, ident: &str, value: &Value) -> String {
    match value {
        Value::Color(c) => format!("val {ident} = Color(0x{})", c.argb()),
        Value::Length(n) if group == Group::Typography => {
            format!("val {ident} = {}.sp", format_number(*n))
        }
        Value::Length(n) => format!("val {ident} = {}.dp", format_number(*n)),
        Value::Multiplier(n) => format!("val {ident} = {}.em", format_number(*n)),
        Value::Weight(w) => format!("val {ident} = FontWeight({w})"),
        Value::Family(family) => format!("const val {ident} = \"{}\"", escape_string(family)),
        Value::Opacity(n) => format!("const val {ident} = {}f", format_number(*n)),
    }
}
