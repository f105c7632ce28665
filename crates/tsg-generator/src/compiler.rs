//! Type-node compiler.
//!
//! `compile_type_node` turns one `TypeNode` into one `Condition` evaluated
//! against a `ValuePath`. Object shapes are handled in `members`, named
//! references (built-in collections, classes, other guards) in `references`.
//!
//! Unsupported syntax never fails compilation: it becomes a permissive `true`
//! leaf carrying a comment that ends up in the guard's warning block.

use tracing::trace;
use tsg_common::limits::MAX_GUARD_COMPILE_DEPTH;
use tsg_parser::{KeywordKind, TupleTypeNode, TypeNode, TypeOperatorKind};

use crate::condition::Condition;
use crate::context::{GeneratorContext, ValuePath, non_null_object};
use crate::{members, references};

/// Compile `node` into a condition over `path`.
pub fn compile_type_node(node: &TypeNode, path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    if ctx.depth >= MAX_GUARD_COMPILE_DEPTH {
        return Condition::with_comment("true", "Type is nested too deeply to be checked");
    }
    ctx.depth += 1;
    let condition = compile_node(node, path, ctx);
    ctx.depth -= 1;
    condition
}

fn compile_node(node: &TypeNode, path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    trace!(kind = node.kind_name(), path = %path, "compile_type_node");
    match node {
        TypeNode::Keyword(keyword) => compile_keyword(keyword.keyword, path),
        TypeNode::Literal(literal) => Condition::equals(path, &literal.text),
        // Over-approximation: the pattern itself is not checked.
        TypeNode::TemplateLiteral(_) => Condition::type_of(path, "string"),
        TypeNode::Union(union) => Condition::or(
            union
                .types
                .iter()
                .map(|member| compile_type_node(member, path, ctx))
                .collect(),
        ),
        TypeNode::Intersection(intersection) => Condition::and(
            intersection
                .types
                .iter()
                .map(|member| compile_type_node(member, path, ctx))
                .collect(),
        )
        .flatten_and(),
        TypeNode::Array(array) => compile_array(&array.element_type, path, ctx),
        TypeNode::Tuple(tuple) => compile_tuple(tuple, path, ctx),
        TypeNode::Parenthesized(wrapped) => compile_type_node(&wrapped.type_node, path, ctx),
        TypeNode::TypeOperator(op) if op.operator == TypeOperatorKind::Readonly => {
            compile_type_node(&op.type_node, path, ctx)
        }
        TypeNode::TypeLiteral(literal) => {
            members::compile_object_type(&[], &literal.members, path, ctx)
        }
        TypeNode::TypeReference(reference) => {
            references::compile_type_reference(reference, path, ctx)
        }
        TypeNode::TypeQuery(query) => references::compile_type_query(query, path),
        TypeNode::Function(_) => Condition::type_of(path, "function"),
        TypeNode::TypeOperator(_)
        | TypeNode::IndexedAccess(_)
        | TypeNode::Conditional(_)
        | TypeNode::Mapped(_)
        | TypeNode::Infer(_)
        | TypeNode::This(_)
        | TypeNode::ImportType(_) => unsupported(node),
    }
}

fn compile_keyword(keyword: KeywordKind, path: &ValuePath) -> Condition {
    match keyword {
        KeywordKind::Any | KeywordKind::Unknown => Condition::always_true(),
        KeywordKind::Never => Condition::with_comment("false", "Never type"),
        KeywordKind::String
        | KeywordKind::Number
        | KeywordKind::Boolean
        | KeywordKind::BigInt
        | KeywordKind::Symbol
        | KeywordKind::Undefined => Condition::type_of(path, keyword.as_str()),
        KeywordKind::Void => Condition::type_of(path, "undefined"),
        KeywordKind::Null => Condition::equals(path, "null"),
        KeywordKind::Object => non_null_object(path),
    }
}

fn unsupported(node: &TypeNode) -> Condition {
    Condition::with_comment("true", format!("{} is not supported", node.kind_name()))
}

/// `receiver.every((params) => body)`; collapses to `body` itself when the
/// body cannot fail, so its comments are kept.
pub(crate) fn every(receiver: impl std::fmt::Display, params: &str, body: Condition) -> Condition {
    if body.is_trivially_true() {
        return body;
    }
    Condition::wrapping(format!("{receiver}.every(({params}) => {body})"), &body)
}

/// `Array.isArray(path) && path.every((el) => <element>)`
pub(crate) fn compile_array(
    element: &TypeNode,
    path: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let element_condition = compile_type_node(element, &ValuePath::binding("el"), ctx);
    Condition::and(vec![is_array(path), every(path, "el", element_condition)])
}

fn is_array(path: &ValuePath) -> Condition {
    Condition::leaf(format!("Array.isArray({path})"))
}

fn compile_tuple(tuple: &TupleTypeNode, path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    let rest_index = tuple.elements.iter().position(|element| element.rest);
    let fixed = &tuple.elements[..rest_index.unwrap_or(tuple.elements.len())];
    let required = fixed.iter().filter(|element| !element.optional).count();

    let mut children = vec![is_array(path)];
    if rest_index.is_some() || required < fixed.len() {
        children.push(Condition::leaf(format!("{path}.length >= {required}")));
        if rest_index.is_none() {
            children.push(Condition::leaf(format!("{path}.length <= {}", fixed.len())));
        }
    } else {
        children.push(Condition::leaf(format!("{path}.length === {}", fixed.len())));
    }

    for (index, element) in fixed.iter().enumerate() {
        let slot = compile_type_node(&element.type_node, &path.element(index), ctx);
        if element.optional && !slot.is_trivially_true() {
            children.push(Condition::wrapping(
                format!("({path}.length > {index} ? {slot} : true)"),
                &slot,
            ));
        } else {
            children.push(slot);
        }
    }

    if let Some(index) = rest_index {
        let rest = &tuple.elements[index];
        let rest_path = path.call("slice", &index.to_string());
        children.push(match &rest.type_node {
            TypeNode::Array(array) => {
                let element_condition =
                    compile_type_node(&array.element_type, &ValuePath::binding("el"), ctx);
                every(&rest_path, "el", element_condition)
            }
            other => compile_type_node(other, &rest_path, ctx),
        });
        if index + 1 < tuple.elements.len() {
            children.push(Condition::with_comment(
                "true",
                "Tuple elements after a rest element are not checked",
            ));
        }
    }

    Condition::and(children).flatten_and()
}

#[cfg(test)]
#[path = "../tests/compiler_tests.rs"]
mod tests;
