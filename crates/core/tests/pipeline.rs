//! End-to-end: load the Token Studio fixture export, resolve it, and render
//! every platform.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokenforge_core::export::{export, write_artifacts};
use tokenforge_core::{
    BundleSource, Diagnostic, Diagnostics, DirSource, ExportOptions, Level, Loader, PipelineConfig,
    Platform, SourceConfig, TokenStore,
};
use tokenforge_protocol::{ResolvedToken, SemanticType, ThemeMode};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn find<'a>(tokens: &'a [ResolvedToken], name: &str, mode: Option<ThemeMode>) -> &'a ResolvedToken {
    tokens
        .iter()
        .find(|t| t.name == name && t.mode == mode)
        .unwrap_or_else(|| panic!("token {name} ({mode:?}) not found"))
}

async fn load_fixture_tree() -> (Vec<ResolvedToken>, Diagnostics) {
    let loader = Loader::new(Arc::new(DirSource::new(fixtures().join("tokens"))));
    let mut diags = Diagnostics::new();
    let tokens = loader.load(&mut diags).await.unwrap();
    (tokens, diags)
}

#[tokio::test]
async fn multi_file_export_resolves_through_core_sets() {
    let (tokens, diags) = load_fixture_tree().await;

    // Every Sys leaf becomes exactly one token.
    assert_eq!(tokens.len(), 18);

    let surface = find(&tokens, "surface", Some(ThemeMode::Light));
    assert_eq!(surface.value, "#EEEEEE");
    assert_eq!(surface.token_type, SemanticType::Color);
    assert_eq!(surface.category, "color");
    assert_eq!(surface.description.as_deref(), Some("Default page background"));

    assert_eq!(find(&tokens, "surface", Some(ThemeMode::Dark)).value, "#121212");
    assert_eq!(find(&tokens, "on-surface", Some(ThemeMode::Dark)).value, "#FFFFFF");

    let family = find(&tokens, "body.font-family", None);
    assert_eq!(family.value, "Inter");
    assert_eq!(family.token_type, SemanticType::FontFamily);
    assert_eq!(family.category, "typography");
    assert_eq!(find(&tokens, "body.line-height", None).value, "150%");
    assert_eq!(find(&tokens, "title.font-size", None).value, "1.25rem");

    // Suffix fallback: `core.spacing.scale.6` is found as `scale.6`.
    assert_eq!(find(&tokens, "spacing.lg", None).value, "24");
    // Chain through another Sys set.
    let radius = find(&tokens, "radius.md", None);
    assert_eq!(radius.value, "8");
    assert_eq!(radius.token_type, SemanticType::BorderRadius);
    assert_eq!(radius.category, "borderRadius");

    // The one broken reference stays verbatim and is reported once.
    let outline = find(&tokens, "outline", Some(ThemeMode::Light));
    assert_eq!(outline.value, "{color.gray.404}");
    assert!(outline.is_unresolved());
    assert_eq!(diags.unresolved_paths(), ["color.gray.404"]);
    assert_eq!(diags.count(Level::Warning), 1);
    assert!(!diags.has_errors());
}

#[tokio::test]
async fn single_file_bundle_with_optional_set_missing() {
    let source = BundleSource::open(fixtures().join("bundle.json"));
    let store = TokenStore::new(Loader::new(Arc::new(source)));
    let snapshot = store.load().await;

    assert!(!snapshot.is_default());
    let names: Vec<&str> = snapshot.tokens().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["surface", "spacing.md"]);
    assert_eq!(snapshot.tokens()[0].value, "#EEEEEE");
    assert_eq!(snapshot.tokens()[1].value, "16");
    assert_eq!(snapshot.diagnostics().len(), 1);
    assert!(matches!(
        snapshot.diagnostics().iter().next(),
        Some(Diagnostic::OptionalDocumentSkipped { document }) if document == "Sys/Color/Dark"
    ));
}

#[tokio::test]
async fn empty_directory_serves_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(Loader::new(Arc::new(DirSource::new(dir.path()))));
    let snapshot = store.load().await;

    assert!(snapshot.is_default());
    assert!(!snapshot.tokens().is_empty());
    assert_eq!(snapshot.diagnostics().count(Level::Error), 7);
    assert_eq!(snapshot.diagnostics().count(Level::Info), 1);
}

#[tokio::test]
async fn missing_bundle_file_serves_defaults() {
    let config = PipelineConfig {
        source: SourceConfig::Bundle {
            path: "/nonexistent/tokens/bundle.json".into(),
        },
        ..PipelineConfig::default()
    };
    let store = TokenStore::new(config.loader().await.unwrap());
    let snapshot = store.load().await;

    assert!(snapshot.is_default());
    assert!(!snapshot.tokens().is_empty());
    // An unreadable bundle fails every set, optional ones included.
    assert_eq!(snapshot.diagnostics().count(Level::Error), 8);
    assert_eq!(snapshot.diagnostics().count(Level::Info), 0);
}

#[tokio::test]
async fn malformed_bundle_file_serves_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    std::fs::write(&path, "{ not json").unwrap();
    let config = PipelineConfig {
        source: SourceConfig::Bundle { path },
        ..PipelineConfig::default()
    };
    let snapshot = TokenStore::new(config.loader().await.unwrap()).load().await;

    assert!(snapshot.is_default());
    assert!(snapshot.diagnostics().has_errors());
}

#[tokio::test]
async fn every_platform_renders_the_fixture_tree() {
    let (tokens, _) = load_fixture_tree().await;
    let options = ExportOptions::default();
    let out = tempfile::tempdir().unwrap();

    let mut diags = Diagnostics::new();
    for platform in Platform::ALL {
        let artifacts = export(&tokens, platform, &options, &mut diags).unwrap();
        write_artifacts(&out.path().join(platform.as_str()), &artifacts)
            .await
            .unwrap();
    }
    // `outline` is skipped by the three code generators, once each.
    let skipped: Vec<_> = diags
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnexportableToken { token, platform, .. } => {
                Some((token.as_str().to_owned(), platform.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        skipped,
        [
            ("outline".to_owned(), "ios".to_owned()),
            ("outline".to_owned(), "android".to_owned()),
            ("outline".to_owned(), "web".to_owned()),
        ]
    );

    let read = |path: &str| std::fs::read_to_string(out.path().join(path)).unwrap();

    let swift = read("ios/DesignTokens.swift");
    assert!(swift.contains(
        "public static let surface = UIColor(red: 0.933, green: 0.933, blue: 0.933, alpha: 1)"
    ));
    assert!(swift.contains("public static let titleFontSize: CGFloat = 20"));
    assert!(!swift.contains("outline"));

    let colors = read("android/values/colors.xml");
    assert!(colors.contains("<color name=\"on_surface\">#1A1A1A</color>"));
    let night = read("android/values-night/colors.xml");
    assert!(night.contains("<color name=\"primary\">#8AB4F8</color>"));
    let dimens = read("android/values/dimens.xml");
    assert!(dimens.contains("<dimen name=\"spacing_lg\">24dp</dimen>"));
    assert!(dimens.contains("<dimen name=\"title_font_size\">20sp</dimen>"));
    let kotlin = read("android/DesignTokens.kt");
    assert!(kotlin.contains("val bodyLineHeight = 1.5.em"));
    assert!(kotlin.contains("const val bodyFontFamily = \"Inter\""));

    let css = read("web/tokens.css");
    assert!(css.contains("--radius-md: 8px;"));
    assert!(css.contains("--body-font-weight: 400;"));
    let html = read("web/index.html");
    assert!(html.contains("<h2 id=\"border-radius\">borderRadius</h2>"));

    let json: serde_json::Value = serde_json::from_str(&read("json/tokens.json")).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(18));
    assert_eq!(json[0]["name"], "surface");
    assert_eq!(json[0]["value"], "#EEEEEE");
    assert!(json[0].get("mode").is_none());
}
