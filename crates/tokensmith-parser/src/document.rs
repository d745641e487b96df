//! Conversion from JSON to the token tree.
//!
//! Node shape is decided here, once: an object carrying `$value` is a token,
//! any other object is a group, and a bare scalar or array sitting directly
//! in a group is an untyped token.

use serde_json::{Map, Value};
use tokensmith_core::{
    is_metadata_key, Group, Literal, ParseError, Token, TokenDocument, TokenNode, TokenType,
    TokenValue,
};

use crate::lexer::parse_reference;

const VALUE_KEY: &str = "$value";
const TYPE_KEYS: [&str; 2] = ["$type", "type"];
const DESCRIPTION_KEYS: [&str; 2] = ["$description", "description"];

/// Parse a token document from JSON source text.
pub fn parse(source: &str) -> Result<TokenDocument, ParseError> {
    let value: Value = serde_json::from_str(source)?;
    from_value(&value)
}

fn from_value(value: &Value) -> Result<TokenDocument, ParseError> {
    match value {
        Value::Object(map) => Ok(TokenDocument::new(parse_group(map))),
        other => Err(ParseError::RootNotObject {
            found: json_kind(other).to_string(),
        }),
    }
}

fn parse_group(map: &Map<String, Value>) -> Group {
    let mut group = Group::new();

    for (key, value) in map {
        if is_metadata_key(key) {
            if key.as_str() == "$type" {
                group.ty = value.as_str().map(TokenType::parse);
            }
            continue;
        }

        let node = match value {
            Value::Object(child) if child.contains_key(VALUE_KEY) => {
                TokenNode::Token(parse_token(child))
            }
            Value::Object(child) => TokenNode::Group(parse_group(child)),
            bare => TokenNode::Token(Token::new(parse_value(bare))),
        };
        group.children.insert(key.clone(), node);
    }

    group
}

fn parse_token(map: &Map<String, Value>) -> Token {
    let value = map
        .get(VALUE_KEY)
        .map(parse_value)
        .unwrap_or(TokenValue::Literal(Literal::Json(Value::Null)));

    Token {
        value,
        ty: first_str(map, &TYPE_KEYS).map(TokenType::parse),
        description: first_str(map, &DESCRIPTION_KEYS).map(str::to_string),
    }
}

/// First key present with a string value, in priority order.
fn first_str<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_str))
}

fn parse_value(value: &Value) -> TokenValue {
    if let Value::String(s) = value {
        if let Some(path) = parse_reference(s) {
            return TokenValue::Reference(path);
        }
    }
    TokenValue::Literal(parse_literal(value))
}

fn parse_literal(value: &Value) -> Literal {
    match value {
        Value::String(s) => Literal::String(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .map(Literal::Number)
            .unwrap_or_else(|| Literal::Json(value.clone())),
        Value::Bool(b) => Literal::Bool(*b),
        Value::Array(items) => Literal::List(items.iter().map(parse_literal).collect()),
        Value::Null | Value::Object(_) => Literal::Json(value.clone()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token<'a>(doc: &'a TokenDocument, path: &[&str]) -> &'a Token {
        let mut group = &doc.root;
        let (last, parents) = path.split_last().unwrap();
        for name in parents {
            match group.child(name) {
                Some(TokenNode::Group(g)) => group = g,
                other => panic!("Expected group at {}, got {:?}", name, other),
            }
        }
        match group.child(last) {
            Some(TokenNode::Token(t)) => t,
            other => panic!("Expected token at {}, got {:?}", last, other),
        }
    }

    #[test]
    fn test_parse_groups_and_tokens() {
        let doc = parse(
            r##"{
                "colors": {
                    "$type": "color",
                    "blue": { "$value": "#0000FF", "$description": "Brand blue" },
                    "link": { "$value": "{colors.blue}" }
                }
            }"##,
        )
        .unwrap();

        let blue = token(&doc, &["colors", "blue"]);
        assert_eq!(blue.value, TokenValue::Literal(Literal::from("#0000FF")));
        assert_eq!(blue.description.as_deref(), Some("Brand blue"));

        let link = token(&doc, &["colors", "link"]);
        match &link.value {
            TokenValue::Reference(path) => assert_eq!(path.dotted(), "colors.blue"),
            other => panic!("Expected reference, got {:?}", other),
        }

        match doc.root.child("colors") {
            Some(TokenNode::Group(g)) => assert_eq!(g.ty, Some(TokenType::Color)),
            other => panic!("Expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_keys_are_not_children() {
        let doc = parse(r#"{ "$schema": "x", "a": { "$extensions": {}, "b": { "$value": 1 } } }"#)
            .unwrap();
        assert!(doc.root.child("$schema").is_none());
        match doc.root.child("a") {
            Some(TokenNode::Group(g)) => {
                assert_eq!(g.children.len(), 1);
                assert!(g.child("$extensions").is_none());
            }
            other => panic!("Expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_order_preserved() {
        let doc = parse(r#"{ "z": 1, "a": 2, "m": 3 }"#).unwrap();
        let keys: Vec<_> = doc.root.children.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_type_fallback_keys() {
        let doc = parse(
            r#"{
                "a": { "$value": "16", "type": "dimension", "description": "plain" },
                "b": { "$value": "16", "$type": "number", "type": "dimension" }
            }"#,
        )
        .unwrap();
        assert_eq!(token(&doc, &["a"]).ty, Some(TokenType::Dimension));
        assert_eq!(token(&doc, &["a"]).description.as_deref(), Some("plain"));
        assert_eq!(token(&doc, &["b"]).ty, Some(TokenType::Number));
    }

    #[test]
    fn test_value_shapes() {
        let doc = parse(
            r#"{
                "n": { "$value": 400 },
                "list": { "$value": ["Inter", "sans-serif"] },
                "bare": "{n}",
                "nested": { "$value": { "x": 1 } },
                "almost": { "$value": "{n} solid" }
            }"#,
        )
        .unwrap();

        assert_eq!(token(&doc, &["n"]).value, TokenValue::Literal(Literal::Number(400.0)));
        assert_eq!(
            token(&doc, &["list"]).value,
            TokenValue::Literal(Literal::List(vec!["Inter".into(), "sans-serif".into()]))
        );
        assert!(matches!(token(&doc, &["bare"]).value, TokenValue::Reference(_)));
        assert!(matches!(
            token(&doc, &["nested"]).value,
            TokenValue::Literal(Literal::Json(_))
        ));
        assert_eq!(
            token(&doc, &["almost"]).value,
            TokenValue::Literal(Literal::from("{n} solid"))
        );
    }

    #[test]
    fn test_root_must_be_object() {
        let err = parse("[1, 2]").unwrap_err();
        assert!(matches!(err, ParseError::RootNotObject { ref found } if found == "array"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse(r#"{ "a": { "$value": "x", } "#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
