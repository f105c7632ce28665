//! Named type references and `typeof` queries.
//!
//! Resolution order for an unqualified name:
//! 1. a type parameter of the declaration being compiled (erased, always true)
//! 2. built-ins: `Record`, `Map`, `Set`, `Array`, `ReadonlyArray`, `Error`
//! 3. a locally declared class (`instanceof`)
//! 4. a guard generated in this file, or an imported `is<Name>` function
//! 5. anything else is checked as an object
//!
//! A qualified name `E.Member` whose head is a local enum compiles to an
//! equality check against the enum member.

use tracing::debug;
use tsg_parser::{KeywordKind, TypeNode, TypeQueryNode, TypeReferenceNode};

use crate::compiler::{compile_array, compile_type_node, every};
use crate::condition::Condition;
use crate::context::{GeneratorContext, ValuePath, quote_string};

pub(crate) fn compile_type_reference(
    reference: &TypeReferenceNode,
    path: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let name = reference.type_name.text();
    let arguments = &reference.type_arguments;

    if reference.type_name.is_qualified() {
        if reference.type_name.segments.len() == 2
            && ctx.registry.enums.contains(reference.type_name.first())
        {
            return Condition::equals(path, &name);
        }
        return unresolved(&name, path, ctx);
    }

    if ctx.is_type_parameter(&name) {
        return Condition::always_true();
    }

    match name.as_str() {
        "Record" => return compile_record(arguments, path, ctx),
        "Map" => return compile_map(arguments, path, ctx),
        "Set" => return compile_set(arguments, path, ctx),
        "Array" | "ReadonlyArray" => {
            return match arguments.as_slice() {
                [element] => compile_array(element, path, ctx),
                _ => invalid_arity(&name, 1, arguments.len()),
            };
        }
        "Error" => return Condition::instance_of(path, "Error"),
        _ => {}
    }

    if ctx.registry.classes.contains(&name) {
        return Condition::instance_of(path, &name);
    }
    if let Some(function_name) = ctx.registry.guard_for(&name) {
        return Condition::leaf(format!("{function_name}({path})"));
    }
    unresolved(&name, path, ctx)
}

/// `typeof X` on a value: a function whose `name` is the rightmost segment.
pub(crate) fn compile_type_query(query: &TypeQueryNode, path: &ValuePath) -> Condition {
    Condition::and(vec![
        Condition::type_of(path, "function"),
        Condition::equals(path.member("name"), quote_string(query.expr_name.last())),
    ])
}

fn unresolved(name: &str, path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    debug!(name, "unresolved type reference checked as an object");
    ctx.object_gate(path)
}

fn invalid_arity(name: &str, expected: usize, found: usize) -> Condition {
    let plural = if expected == 1 { "" } else { "s" };
    Condition::with_comment(
        "true",
        format!("{name} expects {expected} type argument{plural}, found {found}"),
    )
}

/// Object gate, then every entry: `key` against K, `value` against V.
fn compile_record(
    arguments: &[TypeNode],
    path: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let [key_type, value_type] = arguments else {
        return invalid_arity("Record", 2, arguments.len());
    };
    let key = compile_record_key(key_type, ctx);
    let value = compile_type_node(value_type, &ValuePath::binding("value"), ctx);
    let body = Condition::and(vec![key, value]).flatten_and();
    Condition::and(vec![
        ctx.object_gate(path),
        every(format!("Object.entries({path})"), "[key, value]", body),
    ])
    .flatten_and()
}

/// Entry keys are always strings at runtime; a `number` key accepts numeric strings.
fn compile_record_key(key_type: &TypeNode, ctx: &mut GeneratorContext) -> Condition {
    let key = ValuePath::binding("key");
    match key_type {
        TypeNode::Keyword(keyword) if keyword.keyword == KeywordKind::String => {
            Condition::type_of(&key, "string")
        }
        TypeNode::Keyword(keyword) if keyword.keyword == KeywordKind::Number => {
            Condition::leaf(format!("!Number.isNaN(Number({key}))"))
        }
        other => compile_type_node(other, &key, ctx),
    }
}

fn compile_map(arguments: &[TypeNode], path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    let [key_type, value_type] = arguments else {
        return invalid_arity("Map", 2, arguments.len());
    };
    let key = compile_type_node(key_type, &ValuePath::binding("key"), ctx);
    let value = compile_type_node(value_type, &ValuePath::binding("value"), ctx);
    let body = Condition::and(vec![key, value]).flatten_and();
    Condition::and(vec![
        Condition::instance_of(path, "Map"),
        every(format!("Array.from({path}.entries())"), "[key, value]", body),
    ])
}

fn compile_set(arguments: &[TypeNode], path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    let [value_type] = arguments else {
        return invalid_arity("Set", 1, arguments.len());
    };
    let value = compile_type_node(value_type, &ValuePath::binding("value"), ctx);
    Condition::and(vec![
        Condition::instance_of(path, "Set"),
        every(format!("Array.from({path}.values())"), "value", value),
    ])
}

#[cfg(test)]
#[path = "../tests/references_tests.rs"]
mod tests;
