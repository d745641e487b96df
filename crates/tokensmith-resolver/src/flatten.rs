//! Tree flattening.
//!
//! Walks a token document depth-first and produces a flat, ordered map from
//! joined path to resolved value.

use tokensmith_core::{
    is_metadata_key, Diagnostics, FlatToken, FlatTokens, Group, TokenDocument, TokenNode,
    TokenType,
};

use crate::references::{referenced_type, resolve, Visited};

/// Options for flattening.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Joins ancestor names into a flat key.
    pub separator: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            separator: "-".to_string(),
        }
    }
}

impl FlattenOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Flattened tokens plus any resolution diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub tokens: FlatTokens,
    pub diagnostics: Diagnostics,
}

/// Flatten a document with `-` as separator.
pub fn flatten(document: &TokenDocument) -> Flattened {
    flatten_with(document, &FlattenOptions::default())
}

/// Flatten a document with custom options.
pub fn flatten_with(document: &TokenDocument, options: &FlattenOptions) -> Flattened {
    let mut flattener = Flattener {
        document,
        options,
        output: Flattened::default(),
    };
    flattener.walk(&document.root, None, None);
    flattener.output
}

struct Flattener<'a> {
    document: &'a TokenDocument,
    options: &'a FlattenOptions,
    output: Flattened,
}

impl<'a> Flattener<'a> {
    fn walk(&mut self, group: &'a Group, prefix: Option<&str>, inherited: Option<&'a TokenType>) {
        let inherited = group.ty.as_ref().or(inherited);

        for (name, node) in &group.children {
            if is_metadata_key(name) {
                continue;
            }

            let key = match prefix {
                Some(prefix) => format!("{}{}{}", prefix, self.options.separator, name),
                None => name.clone(),
            };

            match node {
                TokenNode::Group(child) => self.walk(child, Some(key.as_str()), inherited),
                TokenNode::Token(token) => {
                    // References are resolved against the root so that
                    // cross-branch paths work.
                    let value = resolve(
                        &token.value,
                        self.document,
                        &Visited::new(),
                        &mut self.output.diagnostics,
                    );
                    let ty = token.ty.as_ref().or(inherited).or_else(|| {
                        referenced_type(&token.value, self.document, &Visited::new())
                    });
                    let flat = FlatToken {
                        value,
                        ty: ty.cloned(),
                    };
                    if self.output.tokens.insert(key.clone(), flat).is_some() {
                        tracing::debug!("flat key {} overwritten by a later token", key);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensmith_core::{Literal, Token};
    use tokensmith_parser::parse_document;

    #[test]
    fn test_flatten_with_reference() {
        let doc = parse_document(
            r##"{ "colors": { "blue": { "$value": "#0000FF" }, "link": { "$value": "{colors.blue}" } } }"##,
        )
        .unwrap();
        let flat = flatten(&doc);

        let keys: Vec<_> = flat.tokens.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["colors-blue", "colors-link"]);
        assert_eq!(flat.tokens.value("colors-blue"), Some(&Literal::from("#0000FF")));
        assert_eq!(flat.tokens.value("colors-link"), Some(&Literal::from("#0000FF")));
        assert!(flat.diagnostics.is_empty());
    }

    #[test]
    fn test_flatten_cycle_degrades() {
        let doc = parse_document(r#"{ "a": { "$value": "{b}" }, "b": { "$value": "{a}" } }"#).unwrap();
        let flat = flatten(&doc);

        assert_eq!(flat.tokens.value("a"), Some(&Literal::from("{b}")));
        assert_eq!(flat.tokens.value("b"), Some(&Literal::from("{a}")));
        assert_eq!(flat.diagnostics.cycles(), 2);
    }

    #[test]
    fn test_cross_branch_reference_uses_root() {
        let doc = parse_document(
            r#"{
                "primitive": { "space": { "4": { "$value": "16px" } } },
                "alias": { "gap": { "md": { "$value": "{primitive.space.4}" } } }
            }"#,
        )
        .unwrap();
        let flat = flatten(&doc);
        assert_eq!(flat.tokens.value("alias-gap-md"), Some(&Literal::from("16px")));
    }

    #[test]
    fn test_metadata_never_flattened() {
        let root = Group::new()
            .with_child("$meta", Token::literal("skip"))
            .with_child(
                "group",
                Group::new()
                    .with_child("$hidden", Group::new().with_child("x", Token::literal("1")))
                    .with_child("shown", Token::literal("2")),
            );
        let flat = flatten(&TokenDocument::new(root));

        let keys: Vec<_> = flat.tokens.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["group-shown"]);
    }

    #[test]
    fn test_group_type_inherited_unless_declared() {
        let doc = parse_document(
            r#"{
                "space": {
                    "$type": "dimension",
                    "sm": { "$value": "8" },
                    "ratio": { "$value": 1.5, "$type": "number" }
                }
            }"#,
        )
        .unwrap();
        let flat = flatten(&doc);
        assert_eq!(flat.tokens.get("space-sm").unwrap().ty, Some(TokenType::Dimension));
        assert_eq!(flat.tokens.get("space-ratio").unwrap().ty, Some(TokenType::Number));
    }

    #[test]
    fn test_untyped_alias_takes_target_type() {
        let doc = parse_document(
            r#"{
                "space": { "$type": "dimension", "md": { "$value": "16" } },
                "gap": { "$value": "{space.md}" },
                "ratio": { "$value": "{space.md}", "$type": "number" },
                "loose": { "$value": "{nowhere}" }
            }"#,
        )
        .unwrap();
        let flat = flatten(&doc);
        assert_eq!(flat.tokens.get("gap").unwrap().ty, Some(TokenType::Dimension));
        assert_eq!(flat.tokens.get("ratio").unwrap().ty, Some(TokenType::Number));
        assert_eq!(flat.tokens.get("loose").unwrap().ty, None);
    }

    #[test]
    fn test_key_collision_last_write_wins() {
        let root = Group::new()
            .with_child("a", Group::new().with_child("b", Token::literal("first")))
            .with_child("a-b", Token::literal("second"));
        let flat = flatten(&TokenDocument::new(root));

        assert_eq!(flat.tokens.len(), 1);
        assert_eq!(flat.tokens.value("a-b"), Some(&Literal::from("second")));
    }

    #[test]
    fn test_custom_separator() {
        let root = Group::new().with_child("a", Group::new().with_child("b", Token::literal("x")));
        let flat = flatten_with(&TokenDocument::new(root), &FlattenOptions::default().with_separator("."));
        assert!(flat.tokens.contains("a.b"));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let doc = parse_document(
            r#"{ "z": { "$value": "{a.b}" }, "a": { "b": { "$value": 2 }, "c": { "$value": "{missing}" } } }"#,
        )
        .unwrap();
        assert_eq!(flatten(&doc), flatten(&doc));
    }
}
