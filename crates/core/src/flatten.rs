use tokenforge_protocol::{ResolvedToken, ThemeMode};

use crate::classify::Classifier;
use crate::diagnostics::Diagnostics;
use crate::document::TokenDocument;
use crate::reference::ReferenceMap;
use crate::resolve::Resolver;

/// Turns a token-set document into a flat list of resolved, typed tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener {
    pub resolver: Resolver,
    pub classifier: Classifier,
}

impl Flattener {
    pub fn new(resolver: Resolver, classifier: Classifier) -> Self {
        Self {
            resolver,
            classifier,
        }
    }

    /// One [`ResolvedToken`] per leaf of `doc`, in document order.
    ///
    /// `refs` must already index every document that `doc` may reference.
    pub fn flatten(
        &self,
        doc: &TokenDocument,
        category: &str,
        refs: &ReferenceMap,
        mode: Option<ThemeMode>,
        diags: &mut Diagnostics,
    ) -> Vec<ResolvedToken> {
        let mut tokens = Vec::with_capacity(doc.leaf_count());
        doc.walk(None, &mut |path, leaf| {
            let value = self
                .resolver
                .resolve_for(&leaf.value, refs, Some(path), diags);
            tokens.push(ResolvedToken {
                name: path.clone(),
                value,
                token_type: self.classifier.classify(&leaf.source_type, path),
                category: category.to_owned(),
                description: leaf.description.clone(),
                mode,
            });
        });
        tokens
    }
}

#[cfg(test)]
mod tests {
    use tokenforge_protocol::SemanticType;

    use super::*;

    fn doc(json: &str) -> TokenDocument {
        TokenDocument::from_slice(json.as_bytes()).expect("test document parses")
    }

    #[test]
    fn surface_resolves_through_core() {
        let core = doc(r##"{"color":{"gray":{"100":{"value":"#EEEEEE","type":"color"}}}}"##);
        let light = doc(r#"{"surface":{"value":"{color.gray.100}","type":"color"}}"#);
        let refs = ReferenceMap::from_documents([&core, &light]);

        let mut diags = Diagnostics::new();
        let tokens = Flattener::default().flatten(
            &light,
            "color",
            &refs,
            Some(ThemeMode::Light),
            &mut diags,
        );

        assert_eq!(
            tokens,
            [ResolvedToken {
                name: "surface".into(),
                value: "#EEEEEE".into(),
                token_type: SemanticType::Color,
                category: "color".into(),
                description: None,
                mode: Some(ThemeMode::Light),
            }]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn one_token_per_leaf_at_any_depth() {
        let nested = doc(
            r#"{
                "a": {"value": "1", "type": "spacing"},
                "b": {
                    "c": {"value": "2", "type": "spacing"},
                    "d": {
                        "e": {"value": "3", "type": "spacing"},
                        "f": {}
                    }
                },
                "g": {"h": {"i": {"j": {"value": "4", "type": "spacing"}}}}
            }"#,
        );
        let mut diags = Diagnostics::new();
        let tokens = Flattener::default().flatten(
            &nested,
            "spacing",
            &ReferenceMap::new(),
            None,
            &mut diags,
        );
        assert_eq!(tokens.len(), nested.leaf_count());
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a", "b.c", "b.d.e", "g.h.i.j"]);
    }

    #[test]
    fn unresolved_reference_is_kept_and_attributed() {
        let sys = doc(r#"{
            "text": {
                "primary": {"value": "{color.gone}", "type": "color", "description": "Body text"}
            }
        }"#);
        let mut diags = Diagnostics::new();
        let tokens =
            Flattener::default().flatten(&sys, "color", &ReferenceMap::new(), None, &mut diags);
        assert_eq!(tokens[0].value, "{color.gone}");
        assert_eq!(tokens[0].description.as_deref(), Some("Body text"));
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().any(|d| d.to_string().contains("text.primary")));
    }

    #[test]
    fn classifies_by_name_when_type_is_unknown() {
        let sys = doc(r#"{"card":{"radius":{"value":"8","type":"sizing"}}}"#);
        let mut diags = Diagnostics::new();
        let tokens = Flattener::default().flatten(
            &sys,
            "borderRadius",
            &ReferenceMap::new(),
            None,
            &mut diags,
        );
        assert_eq!(tokens[0].token_type, SemanticType::BorderRadius);
    }
}
