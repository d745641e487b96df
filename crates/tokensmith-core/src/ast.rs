//! Token tree types.
//!
//! A [`TokenDocument`] is decided at parse time: every node is either a
//! [`Group`] of named children or a [`Token`] leaf, and every token value is
//! either a [`TokenValue::Reference`] or a concrete [`Literal`]. Nothing
//! downstream re-inspects raw JSON.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;

/// Prefix marking metadata keys (`$value`, `$type`, `$description`, ...).
pub const METADATA_SIGIL: char = '$';

/// Returns true for keys reserved for metadata. These never become children,
/// flat keys, or reference path segments.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_SIGIL)
}

/// One parsed collection file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenDocument {
    pub root: Group,
}

impl TokenDocument {
    pub fn new(root: Group) -> Self {
        Self { root }
    }

    /// Number of token leaves in the whole tree.
    pub fn token_count(&self) -> usize {
        self.root.token_count()
    }
}

/// A namespace of named child nodes, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub children: IndexMap<String, TokenNode>,
    /// Group-level `$type`, used as the default for descendant tokens.
    pub ty: Option<TokenType>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style child insertion.
    pub fn with_child(mut self, name: impl Into<String>, node: impl Into<TokenNode>) -> Self {
        self.children.insert(name.into(), node.into());
        self
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TokenNode> {
        self.children.get(name)
    }

    pub fn token_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TokenNode::Group(group) => group.token_count(),
                TokenNode::Token(_) => 1,
            })
            .sum()
    }
}

/// A node in the token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(Group),
    Token(Token),
}

impl From<Group> for TokenNode {
    fn from(group: Group) -> Self {
        TokenNode::Group(group)
    }
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        TokenNode::Token(token)
    }
}

/// A leaf design value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    pub ty: Option<TokenType>,
    pub description: Option<String>,
}

impl Token {
    pub fn new(value: TokenValue) -> Self {
        Self {
            value,
            ty: None,
            description: None,
        }
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::new(TokenValue::Literal(value.into()))
    }

    /// A token whose value points at another token by dotted path.
    pub fn reference(path: &str) -> Self {
        Self::new(TokenValue::Reference(TokenPath::from_dotted(path)))
    }

}

/// A token value (can reference other tokens).
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// `{path.to.token}`
    Reference(TokenPath),
    Literal(Literal),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Reference(path) => write!(f, "{{{}}}", path),
            TokenValue::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

/// A concrete value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Literal>),
    /// Null or composite object values, carried verbatim.
    Json(serde_json::Value),
}

/// Decimal rendering without a trailing `.0` on integral values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Literal::Json(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<Vec<Literal>> for Literal {
    fn from(items: Vec<Literal>) -> Self {
        Literal::List(items)
    }
}

/// A token path like `colors.blue.500`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenPath(pub SmallVec<[String; 4]>);

impl TokenPath {
    /// Split a dotted path into segments. Empty segments are kept so that
    /// malformed paths fail lookup instead of silently matching.
    pub fn from_dotted(path: &str) -> Self {
        TokenPath(path.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Normalized dotted form used for cycle detection.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Declared token type (`$type` or `type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    Number,
    Other(String),
}

impl TokenType {
    pub fn parse(name: &str) -> Self {
        match name {
            "color" => TokenType::Color,
            "dimension" => TokenType::Dimension,
            "fontFamily" => TokenType::FontFamily,
            "fontWeight" => TokenType::FontWeight,
            "number" => TokenType::Number,
            other => TokenType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::Number => "number",
            TokenType::Other(name) => name,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
