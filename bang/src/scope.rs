//! # scope
//!
//! Lexical scopes for the evaluator, built on [`indexmap::IndexMap`] so that
//! members keep their definition order.
//!
//! Lookups and membership tests walk outward through the parent chain;
//! assignment always writes into the innermost scope and never touches a
//! parent.
//!
//! ## Example
//! ```rust
//! # use bang::{Node, Scope};
//! let mut global = Scope::new();
//! global.set("x", Node::number(1));
//!
//! let mut local = Scope::with_parent(global);
//! local.set("y", Node::number(2));
//! assert!(local.contains("x"));
//! assert_eq!(local.get("y").unwrap(), &Node::number(2));
//!
//! // shadowing leaves the parent untouched
//! local.set("x", Node::number(3));
//! let global = local.into_parent().unwrap();
//! assert_eq!(global.get("x").unwrap(), &Node::number(1));
//! ```

use crate::ast::Node;
use indexmap::IndexMap;
use smartstring::alias::String;
use thiserror::Error;

/// Errors that can occur when looking up names in a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The name is not bound in the scope or any of its parents.
    #[error("{name} does not exist in this scope")]
    Undefined { name: String },
}

/// A mapping from names to expressions with an optional enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<Box<Scope>>,
    members: IndexMap<String, Node>,
}

impl Scope {
    /// Creates an empty scope with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested inside `parent`.
    pub fn with_parent(parent: Scope) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            members: IndexMap::new(),
        }
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.parent.as_deref()
    }

    /// Leaves this scope, returning the enclosing one.
    pub fn into_parent(self) -> Option<Scope> {
        self.parent.map(|parent| *parent)
    }

    /// Number of names bound directly in this scope.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `name` is bound here or in any enclosing scope.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Looks `name` up, innermost scope first.
    pub fn get(&self, name: &str) -> Result<&Node, ScopeError> {
        self.find(name).ok_or_else(|| ScopeError::Undefined {
            name: String::from(name),
        })
    }

    /// Binds `name` in this scope, returning the value it replaces here.
    pub fn set(&mut self, name: &str, value: Node) -> Option<Node> {
        self.members.insert(String::from(name), value)
    }

    /// Names bound directly in this scope, in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(|name| name.as_str())
    }

    fn find(&self, name: &str) -> Option<&Node> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.members.get(name) {
                return Some(value);
            }
            scope = current.parent();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_the_parent_chain() {
        let mut global = Scope::new();
        global.set("a", Node::number(1));
        let mut middle = Scope::with_parent(global);
        middle.set("b", Node::number(2));
        let inner = Scope::with_parent(middle);

        assert!(inner.is_empty());
        assert_eq!(inner.get("a").unwrap(), &Node::number(1));
        assert_eq!(inner.get("b").unwrap(), &Node::number(2));
        assert!(inner.contains("a"));
        assert!(!inner.contains("c"));
    }

    #[test]
    fn missing_name_is_undefined() {
        let scope = Scope::with_parent(Scope::new());
        let err = scope.get("nope").unwrap_err();
        assert_eq!(
            err,
            ScopeError::Undefined {
                name: "nope".into()
            }
        );
        assert_eq!(err.to_string(), "nope does not exist in this scope");
    }

    #[test]
    fn set_writes_only_the_current_scope() {
        let mut global = Scope::new();
        global.set("x", Node::number(1));
        let mut local = Scope::with_parent(global);

        assert_eq!(local.set("x", Node::number(2)), None);
        assert_eq!(local.get("x").unwrap(), &Node::number(2));
        assert_eq!(local.parent().unwrap().get("x").unwrap(), &Node::number(1));
        assert_eq!(local.set("x", Node::number(3)), Some(Node::number(2)));
        assert_eq!(local.len(), 1);
    }

    #[test]
    fn names_keep_definition_order() {
        let mut scope = Scope::new();
        for name in ["z", "a", "m"] {
            scope.set(name, Node::ident(name));
        }
        assert_eq!(scope.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }
}
