//! Condition IR
//!
//! The compiler never builds guard text directly. Every type node becomes a
//! `Condition` tree: a leaf holding a JavaScript boolean expression, or an
//! ordered AND / OR of child conditions. The tree is then simplified with the
//! usual boolean laws and rendered.
//!
//! # Simplification
//!
//! `simplify()` works bottom-up and applies, per AND/OR node:
//! - idempotence: structurally equal children collapse to the first one
//! - identity: `true` is dropped from AND, `false` from OR
//! - annulment: AND with a `false` child is `false`, OR with a `true` child is `true`
//!
//! An empty AND becomes `true`, an empty OR becomes `false`, and a node left
//! with a single child becomes that child. Children are never reordered, so an
//! existence check that precedes a property read stays in front of it.
//!
//! # Comments
//!
//! Leaves carry diagnostic comments (unsupported syntax, `never`, ...). They
//! are gathered from the *unsimplified* tree by `collect_comments()`, so a
//! comment on a `true` leaf that the identity law removes is still reported.

use std::fmt;

use indexmap::IndexSet;

const TRUE: &str = "true";
const FALSE: &str = "false";

/// A boolean expression over a value path.
#[derive(Debug, Clone)]
pub enum Condition {
    /// A JavaScript boolean expression, emitted verbatim.
    Leaf {
        expression: String,
        comments: Vec<String>,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

/// Structural equality; comments do not take part.
impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Condition::Leaf { expression: a, .. }, Condition::Leaf { expression: b, .. }) => {
                a == b
            }
            (Condition::And(a), Condition::And(b)) | (Condition::Or(a), Condition::Or(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Condition {}

#[derive(Clone, Copy)]
enum GroupKind {
    And,
    Or,
}

impl GroupKind {
    const fn identity(self) -> &'static str {
        match self {
            GroupKind::And => TRUE,
            GroupKind::Or => FALSE,
        }
    }

    const fn annihilator(self) -> &'static str {
        match self {
            GroupKind::And => FALSE,
            GroupKind::Or => TRUE,
        }
    }

    const fn operator(self) -> &'static str {
        match self {
            GroupKind::And => " && ",
            GroupKind::Or => " || ",
        }
    }

    fn build(self, children: Vec<Condition>) -> Condition {
        match self {
            GroupKind::And => Condition::And(children),
            GroupKind::Or => Condition::Or(children),
        }
    }
}

impl Condition {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Raw expression escape hatch.
    pub fn leaf(expression: impl Into<String>) -> Self {
        Condition::Leaf {
            expression: expression.into(),
            comments: Vec::new(),
        }
    }

    /// Raw expression carrying a diagnostic comment.
    pub fn with_comment(expression: impl Into<String>, comment: impl Into<String>) -> Self {
        Condition::Leaf {
            expression: expression.into(),
            comments: vec![comment.into()],
        }
    }

    /// A leaf whose expression embeds `inner` (an `every(...)` callback body,
    /// a ternary branch); inherits the inner comments.
    pub fn wrapping(expression: impl Into<String>, inner: &Condition) -> Self {
        Condition::Leaf {
            expression: expression.into(),
            comments: inner.collect_comments(),
        }
    }

    /// `path === expected`
    pub fn equals(path: impl fmt::Display, expected: impl fmt::Display) -> Self {
        Self::leaf(format!("{path} === {expected}"))
    }

    /// `typeof path === "kind"`
    pub fn type_of(path: impl fmt::Display, kind: &str) -> Self {
        Self::leaf(format!("typeof {path} === \"{kind}\""))
    }

    /// `path instanceof Class`
    pub fn instance_of(path: impl fmt::Display, class_name: &str) -> Self {
        Self::leaf(format!("{path} instanceof {class_name}"))
    }

    pub fn always_true() -> Self {
        Self::leaf(TRUE)
    }

    pub fn always_false() -> Self {
        Self::leaf(FALSE)
    }

    pub fn and(children: Vec<Condition>) -> Self {
        Condition::And(children)
    }

    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Or(children)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    fn is_leaf_text(&self, text: &str) -> bool {
        matches!(self, Condition::Leaf { expression, .. } if expression == text)
    }

    /// True when the condition simplifies to the constant `true`.
    pub fn is_trivially_true(&self) -> bool {
        self.simplify().is_leaf_text(TRUE)
    }

    /// True when the condition simplifies to the constant `false`.
    pub fn is_trivially_false(&self) -> bool {
        self.simplify().is_leaf_text(FALSE)
    }

    /// Every comment in the tree, in first-appearance order, without duplicates.
    pub fn collect_comments(&self) -> Vec<String> {
        let mut comments = IndexSet::new();
        self.collect_comments_into(&mut comments);
        comments.into_iter().collect()
    }

    fn collect_comments_into(&self, out: &mut IndexSet<String>) {
        match self {
            Condition::Leaf { comments, .. } => {
                for comment in comments {
                    if !out.contains(comment) {
                        out.insert(comment.clone());
                    }
                }
            }
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_comments_into(out);
                }
            }
        }
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Apply idempotence, identity and annulment bottom-up.
    pub fn simplify(&self) -> Condition {
        match self {
            Condition::Leaf { .. } => self.clone(),
            Condition::And(children) => Self::simplify_group(GroupKind::And, children),
            Condition::Or(children) => Self::simplify_group(GroupKind::Or, children),
        }
    }

    fn simplify_group(kind: GroupKind, children: &[Condition]) -> Condition {
        let mut kept: Vec<Condition> = Vec::with_capacity(children.len());
        for child in children.iter().map(Condition::simplify) {
            if child.is_leaf_text(kind.annihilator()) {
                return child;
            }
            if child.is_leaf_text(kind.identity()) || kept.contains(&child) {
                continue;
            }
            kept.push(child);
        }
        if kept.len() > 1 {
            return kind.build(kept);
        }
        kept.pop().unwrap_or_else(|| Condition::leaf(kind.identity()))
    }

    /// Merge nested AND nodes into a single level, keeping order.
    /// OR children are left untouched.
    pub fn flatten_and(&self) -> Condition {
        match self {
            Condition::And(children) => {
                let mut flat = Vec::with_capacity(children.len());
                Self::flatten_into(children, &mut flat);
                Condition::And(flat)
            }
            _ => self.clone(),
        }
    }

    fn flatten_into(children: &[Condition], out: &mut Vec<Condition>) {
        for child in children {
            match child {
                Condition::And(nested) => Self::flatten_into(nested, out),
                _ => out.push(child.clone()),
            }
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, children) = match self {
            Condition::Leaf { expression, .. } => return f.write_str(expression),
            Condition::And(children) => (GroupKind::And, children),
            Condition::Or(children) => (GroupKind::Or, children),
        };
        if children.is_empty() {
            return f.write_str(kind.identity());
        }
        f.write_str("(")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(kind.operator())?;
            }
            child.render(f)?;
        }
        f.write_str(")")
    }
}

/// Renders the simplified tree: `(a && b)`, `(a || b)`, leaves verbatim.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.simplify().render(f)
    }
}

#[cfg(test)]
#[path = "../tests/condition_tests.rs"]
mod tests;
