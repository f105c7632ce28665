//! Object shapes: type literals and interface bodies.
//!
//! An object compiles to a flat AND: the "is object" gate, then every
//! heritage reference, then one condition per member. For each property the
//! existence check comes before the read of the property value.

use tsg_parser::{MethodSignature, PropertyName, PropertySignature, TypeMember, TypeReferenceNode};

use crate::compiler::compile_type_node;
use crate::condition::Condition;
use crate::context::{GeneratorContext, PropertyKey, ValuePath, quote_string};
use crate::references::compile_type_reference;

pub(crate) const INDEX_SIGNATURE_COMMENT: &str =
    "Index signatures ([key: string]: T, [key: number]: T, [key: symbol]: T) are not yet supported";

/// AND of the object gate, `heritage` references, and `members`, flattened.
pub(crate) fn compile_object_type(
    heritage: &[TypeReferenceNode],
    members: &[TypeMember],
    path: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let mut children = Vec::with_capacity(1 + heritage.len() + members.len());
    children.push(ctx.object_gate(path));
    for reference in heritage {
        children.push(compile_type_reference(reference, path, ctx));
    }
    for member in members {
        children.push(compile_member(member, path, ctx));
    }
    Condition::and(children).flatten_and()
}

fn compile_member(member: &TypeMember, path: &ValuePath, ctx: &mut GeneratorContext) -> Condition {
    match member {
        TypeMember::Property(property) => compile_property(property, path, ctx),
        TypeMember::Method(method) => compile_method(method, path, ctx),
        TypeMember::Index(_) => Condition::with_comment("true", INDEX_SIGNATURE_COMMENT),
        TypeMember::CallSignature(_) => {
            Condition::with_comment("true", "Call signatures are not checked")
        }
        TypeMember::ConstructSignature(_) => {
            Condition::with_comment("true", "Construct signatures are not checked")
        }
    }
}

/// How a member is reached from its object.
enum MemberAccess {
    /// Named member: existence check on `key`, then read through `path`.
    Named { key: PropertyKey, path: ValuePath },
    /// `[expr]` member: read only, no existence check.
    Computed { path: ValuePath },
}

fn member_access(name: &PropertyName, object: &ValuePath) -> Result<MemberAccess, Condition> {
    match name {
        PropertyName::Identifier(id) => Ok(MemberAccess::Named {
            key: PropertyKey::string(&id.text),
            path: object.member(&id.text),
        }),
        PropertyName::StringLiteral { value, .. } => Ok(MemberAccess::Named {
            key: PropertyKey::string(value),
            path: object.computed(&quote_string(value)),
        }),
        PropertyName::NumericLiteral { text, .. } => Ok(MemberAccess::Named {
            key: PropertyKey::Numeric(text.clone()),
            path: object.computed(text),
        }),
        PropertyName::Computed { expression, .. } => Ok(MemberAccess::Computed {
            path: object.computed(expression),
        }),
        PropertyName::PrivateIdentifier(id) => Err(Condition::with_comment(
            "true",
            format!("Private name '{}' is not allowed on a type member", id.text),
        )),
    }
}

fn display_name(name: &PropertyName) -> &str {
    match name {
        PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => &id.text,
        PropertyName::StringLiteral { text, .. } | PropertyName::NumericLiteral { text, .. } => {
            text
        }
        PropertyName::Computed { expression, .. } => expression,
    }
}

fn compile_property(
    property: &PropertySignature,
    object: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let Some(type_node) = &property.type_annotation else {
        return Condition::with_comment(
            "true",
            format!("Property '{}' has no type annotation", display_name(&property.name)),
        );
    };
    let access = match member_access(&property.name, object) {
        Ok(access) => access,
        Err(comment) => return comment,
    };
    match access {
        MemberAccess::Named { key, path } => {
            let exists = ctx.existence_check(object, &key);
            let value = compile_type_node(type_node, &path, ctx);
            guarded(exists, value, property.question_token)
        }
        MemberAccess::Computed { path } => {
            let value = compile_type_node(type_node, &path, ctx);
            if property.question_token {
                optional(format!("{path} !== undefined"), value)
            } else {
                value
            }
        }
    }
}

fn compile_method(
    method: &MethodSignature,
    object: &ValuePath,
    ctx: &mut GeneratorContext,
) -> Condition {
    let access = match member_access(&method.name, object) {
        Ok(access) => access,
        Err(comment) => return comment,
    };
    match access {
        MemberAccess::Named { key, path } => {
            let exists = ctx.existence_check(object, &key);
            guarded(exists, Condition::type_of(&path, "function"), method.question_token)
        }
        MemberAccess::Computed { path } => {
            let value = Condition::type_of(&path, "function");
            if method.question_token {
                optional(format!("{path} !== undefined"), value)
            } else {
                value
            }
        }
    }
}

/// Required: `exists && value`. Optional: `(exists ? value : true)`.
fn guarded(exists: String, value: Condition, is_optional: bool) -> Condition {
    if is_optional {
        optional(exists, value)
    } else {
        Condition::and(vec![Condition::leaf(exists), value])
    }
}

fn optional(test: String, value: Condition) -> Condition {
    if value.is_trivially_true() {
        return value;
    }
    Condition::wrapping(format!("({test} ? {value} : true)"), &value)
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
