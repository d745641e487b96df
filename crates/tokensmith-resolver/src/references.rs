//! Token reference resolution.
//!
//! Follows `{path.to.token}` references through the document until a
//! concrete value is reached. Cycles and dangling paths are recorded as
//! diagnostics and degrade to the original reference text.

use tokensmith_core::{
    is_metadata_key, Diagnostics, Literal, ResolveError, Token, TokenDocument, TokenNode,
    TokenPath, TokenType, TokenValue,
};

/// Reference paths entered on the current resolution chain.
///
/// Each step borrows its parent, so extending the chain never affects
/// sibling resolutions that share a prefix.
#[derive(Debug, Clone, Copy, Default)]
pub enum Visited<'a> {
    #[default]
    Empty,
    Entered {
        path: &'a str,
        parent: &'a Visited<'a>,
    },
}

impl<'a> Visited<'a> {
    pub const fn new() -> Self {
        Visited::Empty
    }

    pub fn contains(&self, path: &str) -> bool {
        let mut current = self;
        while let Visited::Entered { path: entered, parent } = current {
            if *entered == path {
                return true;
            }
            current = *parent;
        }
        false
    }

    /// A new chain with `path` appended.
    pub fn enter<'b>(&'b self, path: &'b str) -> Visited<'b> {
        Visited::Entered { path, parent: self }
    }

    /// Entered paths, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut current = self;
        while let Visited::Entered { path, parent } = current {
            paths.push(path.to_string());
            current = *parent;
        }
        paths.reverse();
        paths
    }

    pub fn len(&self) -> usize {
        let mut len = 0;
        let mut current = self;
        while let Visited::Entered { parent, .. } = current {
            len += 1;
            current = *parent;
        }
        len
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Visited::Empty)
    }
}

/// A resolved value together with the diagnostics raised while resolving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Literal,
    pub diagnostics: Diagnostics,
}

/// Resolve a value from scratch (empty visited chain).
pub fn resolve_value(value: &TokenValue, document: &TokenDocument) -> Resolution {
    let mut diagnostics = Diagnostics::new();
    let value = resolve(value, document, &Visited::new(), &mut diagnostics);
    Resolution { value, diagnostics }
}

/// Resolve `value` against `document`.
///
/// Literals come back unchanged. References are followed transitively; on a
/// cycle or a missing path the original `{...}` text is returned and the
/// problem is pushed to `diagnostics`.
pub fn resolve(
    value: &TokenValue,
    document: &TokenDocument,
    visited: &Visited<'_>,
    diagnostics: &mut Diagnostics,
) -> Literal {
    let path = match value {
        TokenValue::Literal(literal) => return literal.clone(),
        TokenValue::Reference(path) => path,
    };

    let key = path.dotted();
    if visited.contains(&key) {
        let mut cycle = visited.chain();
        cycle.push(key);
        diagnostics.push(ResolveError::CycleDetected { cycle });
        return Literal::String(value.to_string());
    }

    let visited = visited.enter(&key);
    match lookup(document, path) {
        Some(token) => resolve(&token.value, document, &visited, diagnostics),
        None => {
            diagnostics.push(ResolveError::ReferenceNotFound {
                reference: value.to_string(),
            });
            Literal::String(value.to_string())
        }
    }
}

/// Type of the token a reference chain lands on.
///
/// Follows references until a token with a type (its own, or one inherited
/// from an enclosing group) is reached. Literals, dangling paths and cycles
/// yield `None`.
pub fn referenced_type<'d>(
    value: &TokenValue,
    document: &'d TokenDocument,
    visited: &Visited<'_>,
) -> Option<&'d TokenType> {
    let path = match value {
        TokenValue::Literal(_) => return None,
        TokenValue::Reference(path) => path,
    };

    let key = path.dotted();
    if visited.contains(&key) {
        return None;
    }

    let visited = visited.enter(&key);
    let (token, ty) = locate(document, path)?;
    ty.or_else(|| referenced_type(&token.value, document, &visited))
}

/// Find the token a path names, walking groups from the document root.
///
/// Returns `None` if a segment is missing or is a metadata key, if a token
/// is reached before the last segment, or if the path ends on a group.
pub fn lookup<'d>(document: &'d TokenDocument, path: &TokenPath) -> Option<&'d Token> {
    locate(document, path).map(|(token, _)| token)
}

/// Like [`lookup`], also returning the token's effective declared type.
fn locate<'d>(
    document: &'d TokenDocument,
    path: &TokenPath,
) -> Option<(&'d Token, Option<&'d TokenType>)> {
    let mut group = &document.root;
    let mut inherited = group.ty.as_ref();
    let mut segments = path.segments().peekable();

    while let Some(segment) = segments.next() {
        if is_metadata_key(segment) {
            return None;
        }
        match group.child(segment)? {
            TokenNode::Group(child) => {
                group = child;
                inherited = child.ty.as_ref().or(inherited);
            }
            TokenNode::Token(token) => {
                if segments.peek().is_some() {
                    return None;
                }
                return Some((token, token.ty.as_ref().or(inherited)));
            }
        }
    }

    None
}
