//! CSS custom property generation.

use serde::{Deserialize, Serialize};
use tokensmith_core::{format_number, ExportError, Literal, TokenDocument, TokenType};
use tokensmith_parser::{is_dimension, is_hex_color, is_unitless_integer};
use tokensmith_resolver::flatten;

use crate::{validate_collection_name, ArtifactGenerator, ArtifactKind, GeneratedBlock};

/// Options for CSS output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssOptions {
    /// Variable prefix: `--<prefix>-<collection>-<key>`.
    pub prefix: String,
    /// Unit appended to bare integers on dimension tokens.
    pub default_unit: String,
    pub file_name: String,
    /// Design system name shown in the file header.
    pub system_name: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: "token".to_string(),
            default_unit: "px".to_string(),
            file_name: "design-tokens.css".to_string(),
            system_name: "Design System".to_string(),
        }
    }
}

/// CSS custom property generator.
#[derive(Debug, Clone, Default)]
pub struct CssGenerator {
    options: CssOptions,
}

impl CssGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CssOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CssOptions {
        &self.options
    }

    fn variable_name(&self, collection: &str, key: &str) -> String {
        let name = if self.options.prefix.is_empty() {
            format!("--{}-{}", collection, key)
        } else {
            format!("--{}-{}-{}", self.options.prefix, collection, key)
        };
        name.to_lowercase()
    }

    fn header(&self) -> String {
        format!(
            "/* Design Tokens - {} */\n/* Generated from Figma variable structure */\n/* DO NOT EDIT - This file is auto-generated */\n\n",
            self.options.system_name
        )
    }
}

impl ArtifactGenerator for CssGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Css
    }

    fn file_name(&self) -> &str {
        &self.options.file_name
    }

    fn generate_collection(
        &self,
        name: &str,
        document: &TokenDocument,
    ) -> Result<GeneratedBlock, ExportError> {
        validate_collection_name(name)?;

        let flat = flatten(document);
        let mut lines = Vec::with_capacity(flat.tokens.len() + 4);

        lines.push(format!("/* {} Collection */", name));
        lines.push(":root {".to_string());
        for (key, token) in &flat.tokens {
            let value = render_css_value(&token.value, token.ty.as_ref(), &self.options.default_unit);
            lines.push(format!("  {}: {};", self.variable_name(name, key), value));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        Ok(GeneratedBlock {
            collection: name.to_string(),
            content: lines.join("\n"),
            diagnostics: flat.diagnostics,
        })
    }

    fn render_file(&self, blocks: &[GeneratedBlock]) -> String {
        let body: Vec<&str> = blocks.iter().map(|b| b.content.as_str()).collect();
        format!("{}{}", self.header(), body.join("\n"))
    }
}

/// Render a resolved value as a CSS value.
///
/// Numbers print in decimal, lists are comma-joined, and dimensions or hex
/// colors pass through. A bare integer on a dimension token gets
/// `default_unit` appended.
pub fn render_css_value(value: &Literal, ty: Option<&TokenType>, default_unit: &str) -> String {
    match value {
        Literal::Number(n) => format_number(*n),
        Literal::List(items) => items
            .iter()
            .map(|item| render_css_value(item, None, default_unit))
            .collect::<Vec<_>>()
            .join(", "),
        Literal::String(s) => {
            if is_dimension(s) || is_hex_color(s) {
                s.clone()
            } else if ty == Some(&TokenType::Dimension) && is_unitless_integer(s) {
                format!("{}{}", s, default_unit)
            } else {
                s.clone()
            }
        }
        Literal::Bool(b) => b.to_string(),
        Literal::Json(json) => json.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokensmith_parser::parse_document;

    #[test]
    fn test_render_numbers_and_lists() {
        assert_eq!(render_css_value(&Literal::Number(400.0), None, "px"), "400");
        assert_eq!(render_css_value(&Literal::Number(1.25), None, "px"), "1.25");
        let list = Literal::List(vec!["Inter".into(), "sans-serif".into()]);
        assert_eq!(render_css_value(&list, None, "px"), "Inter, sans-serif");
    }

    #[test]
    fn test_render_dimension_default_unit() {
        let dim = TokenType::Dimension;
        assert_eq!(render_css_value(&"16".into(), Some(&dim), "px"), "16px");
        assert_eq!(render_css_value(&"16px".into(), Some(&dim), "px"), "16px");
        assert_eq!(render_css_value(&"1rem".into(), Some(&dim), "px"), "1rem");
        assert_eq!(render_css_value(&"16".into(), None, "px"), "16");
        assert_eq!(render_css_value(&"16".into(), Some(&TokenType::Number), "px"), "16");
        assert_eq!(render_css_value(&"4".into(), Some(&dim), "rem"), "4rem");
    }

    #[test]
    fn test_render_passthrough() {
        assert_eq!(render_css_value(&"#0000FF".into(), None, "px"), "#0000FF");
        assert_eq!(render_css_value(&"rgba(0, 0, 0, 0.5)".into(), None, "px"), "rgba(0, 0, 0, 0.5)");
        assert_eq!(render_css_value(&"{missing}".into(), None, "px"), "{missing}");
    }

    #[test]
    fn test_generate_collection_block() {
        let doc = parse_document(
            r##"{
                "Colors": {
                    "blue": { "$value": "#0000FF" },
                    "link": { "$value": "{Colors.blue}" }
                },
                "space": { "md": { "$value": "16", "$type": "dimension" } }
            }"##,
        )
        .unwrap();

        let block = CssGenerator::new().generate_collection("primitive", &doc).unwrap();
        assert_eq!(
            block.content,
            "/* primitive Collection */\n\
             :root {\n  \
             --token-primitive-colors-blue: #0000FF;\n  \
             --token-primitive-colors-link: #0000FF;\n  \
             --token-primitive-space-md: 16px;\n\
             }\n"
        );
        assert!(block.diagnostics.is_empty());
    }

    #[test]
    fn test_untyped_alias_of_dimension_gets_unit() {
        let doc = parse_document(
            r#"{
                "space": { "md": { "$value": "16", "$type": "dimension" } },
                "gap": { "$value": "{space.md}" }
            }"#,
        )
        .unwrap();
        let block = CssGenerator::new().generate_collection("alias", &doc).unwrap();
        assert!(block.content.contains("  --token-alias-space-md: 16px;\n"));
        assert!(block.content.contains("  --token-alias-gap: 16px;\n"));
    }

    #[test]
    fn test_generate_collection_reports_diagnostics() {
        let doc = parse_document(r#"{ "a": { "$value": "{b}" }, "b": { "$value": "{a}" } }"#).unwrap();
        let block = CssGenerator::new().generate_collection("alias", &doc).unwrap();

        assert!(block.content.contains("  --token-alias-a: {b};"));
        assert_eq!(block.diagnostics.cycles(), 2);
    }

    #[test]
    fn test_invalid_collection_name() {
        let result = CssGenerator::new().generate_collection("bad name", &TokenDocument::default());
        assert!(matches!(result, Err(ExportError::InvalidCollectionName { .. })));
    }

    #[test]
    fn test_render_file() {
        let generator = CssGenerator::with_options(CssOptions {
            system_name: "Acme".to_string(),
            ..CssOptions::default()
        });
        let blocks = vec![
            GeneratedBlock {
                collection: "a".into(),
                content: "A\n".into(),
                ..Default::default()
            },
            GeneratedBlock {
                collection: "b".into(),
                content: "B\n".into(),
                ..Default::default()
            },
        ];

        let file = generator.render_file(&blocks);
        assert!(file.starts_with("/* Design Tokens - Acme */\n"));
        assert!(file.ends_with("*/\n\nA\n\nB\n"));
    }

    #[test]
    fn test_empty_prefix() {
        let generator = CssGenerator::with_options(CssOptions {
            prefix: String::new(),
            ..CssOptions::default()
        });
        assert_eq!(generator.variable_name("alias", "Gap-MD"), "--alias-gap-md");
    }
}
