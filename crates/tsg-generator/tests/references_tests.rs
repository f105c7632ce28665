use super::*;
use crate::context::{Flags, HasOwnCheck, PlainObjectCheck};
use tsg_parser::{Statement, parse_source_file};

fn type_node(source: &str) -> TypeNode {
    let file = parse_source_file("test.ts", format!("type T = {source};")).expect("parses");
    match file.statements.into_iter().next() {
        Some(Statement::TypeAlias(alias)) => alias.type_node,
        other => panic!("expected a type alias, got {other:?}"),
    }
}

fn compile_in(source: &str, ctx: &mut GeneratorContext) -> Condition {
    compile_type_node(&type_node(source), &ValuePath::root(), ctx)
}

fn render(source: &str) -> String {
    compile_in(source, &mut GeneratorContext::new(Flags::default())).to_string()
}

#[test]
fn record_checks_every_entry() {
    assert_eq!(
        render("Record<string, number>"),
        r#"(value !== null && typeof value === "object" && Object.entries(value).every(([key, value]) => (typeof key === "string" && typeof value === "number")))"#
    );
}

#[test]
fn record_with_number_keys_accepts_numeric_strings() {
    assert_eq!(
        render("Record<number, string>"),
        r#"(value !== null && typeof value === "object" && Object.entries(value).every(([key, value]) => (!Number.isNaN(Number(key)) && typeof value === "string")))"#
    );
}

#[test]
fn record_with_literal_keys_compiles_the_key_type() {
    assert_eq!(
        render(r#"Record<"a" | "b", any>"#),
        r#"(value !== null && typeof value === "object" && Object.entries(value).every(([key, value]) => (key === "a" || key === "b")))"#
    );
}

#[test]
fn record_gate_follows_plain_object_flag() {
    let mut ctx = GeneratorContext::new(Flags {
        plain_object_check: PlainObjectCheck::Insert,
        has_own_check: HasOwnCheck::HasOwn,
    });
    let condition = compile_in("Record<string, { id: number }>", &mut ctx);
    assert_eq!(
        condition.to_string(),
        r#"(isPlainObject(value) && Object.entries(value).every(([key, value]) => (typeof key === "string" && isPlainObject(value) && hasOwn(value, "id") && typeof value.id === "number")))"#
    );
    assert!(ctx.registry.needs_plain_object);
    assert!(ctx.registry.needs_has_own);
}

#[test]
fn map_and_set() {
    assert_eq!(
        render("Map<string, number>"),
        r#"(value instanceof Map && Array.from(value.entries()).every(([key, value]) => (typeof key === "string" && typeof value === "number")))"#
    );
    assert_eq!(
        render("Set<number>"),
        r#"(value instanceof Set && Array.from(value.values()).every((value) => typeof value === "number"))"#
    );
    assert_eq!(render("Set<unknown>"), "value instanceof Set");
}

#[test]
fn generic_array_forms_match_array_syntax() {
    let expected = r#"(Array.isArray(value) && value.every((el) => typeof el === "string"))"#;
    assert_eq!(render("Array<string>"), expected);
    assert_eq!(render("ReadonlyArray<string>"), expected);
}

#[test]
fn wrong_arity_is_permissive_with_comment() {
    let cases = [
        ("Record<string>", "Record expects 2 type arguments, found 1"),
        ("Map<string, number, boolean>", "Map expects 2 type arguments, found 3"),
        ("Set", "Set expects 1 type argument, found 0"),
        ("Array<string, number>", "Array expects 1 type argument, found 2"),
    ];
    for (source, comment) in cases {
        let condition = compile_in(source, &mut GeneratorContext::new(Flags::default()));
        assert_eq!(condition.to_string(), "true", "{source}");
        assert_eq!(condition.collect_comments(), vec![comment.to_string()], "{source}");
    }
}

#[test]
fn error_and_local_classes_use_instanceof() {
    assert_eq!(render("Error"), "value instanceof Error");

    let mut ctx = GeneratorContext::new(Flags::default());
    ctx.registry.classes.insert("MyClass".to_string());
    assert_eq!(compile_in("MyClass", &mut ctx).to_string(), "value instanceof MyClass");
}

#[test]
fn type_query_checks_function_name() {
    assert_eq!(
        render("typeof MyClass"),
        r#"(typeof value === "function" && value.name === "MyClass")"#
    );
    assert_eq!(
        render("typeof ns.Inner"),
        r#"(typeof value === "function" && value.name === "Inner")"#
    );
}

#[test]
fn known_guards_are_called() {
    let mut ctx = GeneratorContext::new(Flags::default());
    ctx.registry.generated_guards.insert("Id".to_string());
    ctx.registry.imports.insert("isOtherClass".to_string());
    assert_eq!(compile_in("Id", &mut ctx).to_string(), "isId(value)");
    assert_eq!(compile_in("OtherClass", &mut ctx).to_string(), "isOtherClass(value)");
}

#[test]
fn type_parameters_are_erased() {
    let mut ctx = GeneratorContext::new(Flags::default());
    ctx.type_parameters.insert("T".to_string());
    assert_eq!(compile_in("T", &mut ctx).to_string(), "true");
    assert_eq!(compile_in("T[]", &mut ctx).to_string(), "Array.isArray(value)");
}

#[test]
fn enum_member_references_compare_by_value() {
    let mut ctx = GeneratorContext::new(Flags::default());
    ctx.registry.enums.insert("Color".to_string());
    assert_eq!(
        compile_in("Color.Red | Color.Green", &mut ctx).to_string(),
        "(value === Color.Red || value === Color.Green)"
    );
}

#[test]
fn unresolved_names_fall_back_to_object_gate_silently() {
    let condition = compile_in("Date", &mut GeneratorContext::new(Flags::default()));
    assert_eq!(condition.to_string(), r#"(value !== null && typeof value === "object")"#);
    assert!(condition.collect_comments().is_empty());

    let qualified = compile_in("ns.Thing", &mut GeneratorContext::new(Flags::default()));
    assert_eq!(qualified.to_string(), r#"(value !== null && typeof value === "object")"#);
    assert!(qualified.collect_comments().is_empty());

    let mut ctx = GeneratorContext::new(Flags {
        plain_object_check: PlainObjectCheck::Lodash,
        has_own_check: HasOwnCheck::In,
    });
    assert_eq!(compile_in("Date", &mut ctx).to_string(), "isPlainObject(value)");
    assert!(ctx.registry.needs_plain_object);
}
