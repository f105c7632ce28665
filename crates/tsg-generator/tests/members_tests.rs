use super::*;
use crate::context::{Flags, HasOwnCheck, PlainObjectCheck};
use tsg_parser::{Statement, TypeNode, parse_source_file};

const STRICT: Flags = Flags {
    plain_object_check: PlainObjectCheck::Insert,
    has_own_check: HasOwnCheck::HasOwn,
};

fn members(body: &str) -> Vec<TypeMember> {
    let file = parse_source_file("test.ts", format!("type T = {body};")).expect("parses");
    match file.statements.into_iter().next() {
        Some(Statement::TypeAlias(alias)) => match alias.type_node {
            TypeNode::TypeLiteral(literal) => literal.members,
            other => panic!("expected a type literal, got {other:?}"),
        },
        other => panic!("expected a type alias, got {other:?}"),
    }
}

fn compile_with(body: &str, flags: Flags) -> (Condition, GeneratorContext) {
    let mut ctx = GeneratorContext::new(flags);
    let condition = compile_object_type(&[], &members(body), &ValuePath::root(), &mut ctx);
    (condition, ctx)
}

fn render(body: &str) -> String {
    compile_with(body, Flags::default()).0.to_string()
}

#[test]
fn required_then_optional_properties() {
    assert_eq!(
        render("{ str: string; num?: number }"),
        r#"(value !== null && typeof value === "object" && "str" in value && typeof value.str === "string" && ("num" in value ? typeof value.num === "number" : true))"#
    );
}

#[test]
fn nested_objects_flatten_into_one_chain() {
    assert_eq!(
        render("{ obj: { value: boolean } }"),
        r#"(value !== null && typeof value === "object" && "obj" in value && value.obj !== null && typeof value.obj === "object" && "value" in value.obj && typeof value.obj.value === "boolean")"#
    );
}

#[test]
fn strict_flags_use_helpers_and_record_needs() {
    let (condition, ctx) = compile_with("{ str: string; num?: number }", STRICT);
    assert_eq!(
        condition.to_string(),
        r#"(isPlainObject(value) && hasOwn(value, "str") && typeof value.str === "string" && (hasOwn(value, "num") ? typeof value.num === "number" : true))"#
    );
    assert!(ctx.registry.needs_plain_object);
    assert!(ctx.registry.needs_has_own);
}

#[test]
fn literal_names_use_bracket_access_and_keep_existence_check() {
    let (condition, _) = compile_with(
        r#"{ ["dash-value"]: "dash-value"; [0]: "number-value"; ["some-computed"]: () => void }"#,
        STRICT,
    );
    assert_eq!(
        condition.to_string(),
        r#"(isPlainObject(value) && hasOwn(value, "dash-value") && value["dash-value"] === "dash-value" && hasOwn(value, 0) && value[0] === "number-value" && hasOwn(value, "some-computed") && typeof value["some-computed"] === "function")"#
    );
}

#[test]
fn quoted_member_names() {
    assert_eq!(
        render(r#"{ "content-type": string; 1: boolean }"#),
        r#"(value !== null && typeof value === "object" && "content-type" in value && typeof value["content-type"] === "string" && 1 in value && typeof value[1] === "boolean")"#
    );
}

#[test]
fn computed_expression_names_skip_existence_check() {
    assert_eq!(
        render("{ [Symbol.iterator]: () => void; [key]?: string }"),
        r#"(value !== null && typeof value === "object" && typeof value[Symbol.iterator] === "function" && (value[key] !== undefined ? typeof value[key] === "string" : true))"#
    );
}

#[test]
fn methods_check_existence_then_typeof_function() {
    assert_eq!(
        render("{ run(): void; stop?(force: boolean): void }"),
        r#"(value !== null && typeof value === "object" && "run" in value && typeof value.run === "function" && ("stop" in value ? typeof value.stop === "function" : true))"#
    );
}

#[test]
fn index_signatures_are_flagged_not_compiled() {
    let (condition, _) = compile_with(
        "{ [key: string]: any; [key: number]: string; normalProp: string }",
        Flags::default(),
    );
    assert_eq!(
        condition.to_string(),
        r#"(value !== null && typeof value === "object" && "normalProp" in value && typeof value.normalProp === "string")"#
    );
    assert_eq!(condition.collect_comments(), vec![INDEX_SIGNATURE_COMMENT.to_string()]);
}

#[test]
fn call_and_construct_signatures_only_comment() {
    let (condition, _) = compile_with("{ (x: number): string; new (): object }", Flags::default());
    assert_eq!(condition.to_string(), r#"(value !== null && typeof value === "object")"#);
    assert_eq!(
        condition.collect_comments(),
        vec![
            "Call signatures are not checked".to_string(),
            "Construct signatures are not checked".to_string(),
        ]
    );
}

#[test]
fn permissive_members_still_require_presence() {
    assert_eq!(
        render("{ a: any; b?: unknown }"),
        r#"(value !== null && typeof value === "object" && "a" in value)"#
    );
}

#[test]
fn member_without_annotation_is_flagged() {
    let (condition, _) = compile_with("{ loose; name: string }", Flags::default());
    assert_eq!(
        condition.to_string(),
        r#"(value !== null && typeof value === "object" && "name" in value && typeof value.name === "string")"#
    );
    assert_eq!(
        condition.collect_comments(),
        vec!["Property 'loose' has no type annotation".to_string()]
    );
}

#[test]
fn never_member_makes_the_object_impossible() {
    let (condition, _) = compile_with("{ impossible: never }", Flags::default());
    assert_eq!(condition.to_string(), "false");
    assert_eq!(condition.collect_comments(), vec!["Never type".to_string()]);
}
