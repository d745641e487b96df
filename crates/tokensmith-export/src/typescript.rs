//! TypeScript interface generation.
//!
//! Each collection becomes `export interface <Name>Tokens`. Every nested group
//! becomes its own interface named after its parent plus the PascalCase key,
//! declared before the interface that references it. Names that collide
//! within a collection get a numeric suffix.

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokensmith_core::{is_metadata_key, ExportError, Group, TokenDocument, TokenNode, TokenType};
use tokensmith_resolver::{referenced_type, Visited};

use crate::{validate_collection_name, ArtifactGenerator, ArtifactKind, GeneratedBlock};

const INDENT: &str = "  ";

/// Options for TypeScript output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeScriptOptions {
    pub file_name: String,
    /// Design system name shown in the file header.
    pub system_name: String,
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self {
            file_name: "design-tokens.d.ts".to_string(),
            system_name: "Design System".to_string(),
        }
    }
}

/// TypeScript declaration generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptGenerator {
    options: TypeScriptOptions,
}

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TypeScriptOptions) -> Self {
        Self { options }
    }

    fn header(&self) -> String {
        format!(
            "/**\n * Design Token Type Definitions\n * {}\n *\n * Auto-generated from design token JSON files.\n * DO NOT EDIT - This file is auto-generated.\n */\n",
            self.options.system_name
        )
    }
}

/// Collects the interfaces of one collection.
struct InterfaceWriter<'a> {
    document: &'a TokenDocument,
    taken: HashSet<String>,
    interfaces: Vec<String>,
}

impl<'a> InterfaceWriter<'a> {
    fn new(document: &'a TokenDocument) -> Self {
        Self {
            document,
            taken: HashSet::new(),
            interfaces: Vec::new(),
        }
    }

    /// Reserve `base`, or `base2`, `base3`, ... if already declared.
    fn claim(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut suffix = 2;
        while !self.taken.insert(name.clone()) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        name
    }

    /// Emit `name` and all nested interfaces, innermost first.
    fn write(&mut self, group: &'a Group, name: &str, inherited: Option<&'a TokenType>) {
        let inherited = group.ty.as_ref().or(inherited);
        let mut lines = vec![format!("export interface {} {{", name)];

        for (key, node) in &group.children {
            if is_metadata_key(key) {
                continue;
            }

            match node {
                TokenNode::Group(child) => {
                    let nested = self.claim(format!("{}{}", name, pascal_segment(key)));
                    self.write(child, &nested, inherited);
                    lines.push(format!("{}{}: {};", INDENT, property_name(key), nested));
                }
                TokenNode::Token(token) => {
                    let ty = token.ty.as_ref().or(inherited).or_else(|| {
                        referenced_type(&token.value, self.document, &Visited::new())
                    });
                    let comment = token
                        .description
                        .as_deref()
                        .map(single_line)
                        .filter(|d| !d.is_empty())
                        .map(|d| format!(" // {}", d))
                        .unwrap_or_default();
                    lines.push(format!(
                        "{}{}: {};{}",
                        INDENT,
                        property_name(key),
                        ts_type(ty),
                        comment
                    ));
                }
            }
        }

        lines.push("}".to_string());
        self.interfaces.push(lines.join("\n"));
    }
}

impl ArtifactGenerator for TypeScriptGenerator {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::TypeScript
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

        let mut writer = InterfaceWriter::new(document);
        let root = writer.claim(interface_name(name));
        writer.write(&document.root, &root, None);

        Ok(GeneratedBlock {
            collection: name.to_string(),
            content: writer.interfaces.join("\n\n"),
            diagnostics: Default::default(),
        })
    }

    fn render_file(&self, blocks: &[GeneratedBlock]) -> String {
        let mut parts = vec![self.header()];
        for block in blocks {
            parts.push(block.content.clone());
            parts.push(String::new());
        }
        parts.join("\n")
    }
}

/// Top-level interface name for a collection: `alias` -> `AliasTokens`.
pub fn interface_name(collection: &str) -> String {
    format!("{}Tokens", pascal_segment(collection))
}

/// TypeScript type for a declared token type.
pub fn ts_type(ty: Option<&TokenType>) -> &'static str {
    match ty {
        Some(TokenType::Color) | Some(TokenType::Dimension) => "string",
        Some(TokenType::FontFamily) => "string | string[]",
        Some(TokenType::FontWeight) => "string | number",
        Some(TokenType::Number) => "number",
        Some(TokenType::Other(_)) | None => "string | number",
    }
}

/// PascalCase with anything that cannot appear in an identifier removed.
fn pascal_segment(key: &str) -> String {
    key.to_case(Case::Pascal)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Line breaks would end a `//` comment early.
fn single_line(text: &str) -> String {
    text.split(|c| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Property key, quoted unless it is a plain identifier.
fn property_name(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };

    if is_identifier {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
