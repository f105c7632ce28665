//! Output for every combination of plain-object and existence-check flags.
use tsg_generator::{Flags, GuardOutput, HasOwnCheck, PlainObjectCheck, generate_type_guards_from_source};

const SOURCE: &str = "interface Simple {\n  str: string;\n  num?: number;\n  obj: {\n    value: boolean;\n  };\n}\n";

fn generate(plain_object_check: PlainObjectCheck, has_own_check: HasOwnCheck) -> GuardOutput {
    let flags = Flags {
        plain_object_check,
        has_own_check,
    };
    generate_type_guards_from_source("simple.ts", SOURCE, flags).expect("generates")
}

fn expected_body(gate: fn(&str) -> String, exists: fn(&str, &str) -> String) -> String {
    format!(
        "return ({} && {} && typeof value.str === \"string\" && ({} ? typeof value.num === \"number\" : true) && {} && {} && {} && typeof value.obj.value === \"boolean\");",
        gate("value"),
        exists("value", "str"),
        exists("value", "num"),
        exists("value", "obj"),
        gate("value.obj"),
        exists("value.obj", "value"),
    )
}

fn simple_gate(path: &str) -> String {
    format!("{path} !== null && typeof {path} === \"object\"")
}

fn plain_object_gate(path: &str) -> String {
    format!("isPlainObject({path})")
}

fn in_check(path: &str, key: &str) -> String {
    format!("\"{key}\" in {path}")
}

fn has_own_check(path: &str, key: &str) -> String {
    format!("hasOwn({path}, \"{key}\")")
}

#[test]
fn simple_in() {
    let output = generate(PlainObjectCheck::Simple, HasOwnCheck::In);
    assert!(output.guards[0].code.contains(&expected_body(simple_gate, in_check)));
    assert!(output.prologue.is_empty());
    assert!(output.helpers.is_empty());
}

#[test]
fn simple_has_own() {
    let output = generate(PlainObjectCheck::Simple, HasOwnCheck::HasOwn);
    assert!(output.guards[0].code.contains(&expected_body(simple_gate, has_own_check)));
    assert!(output.prologue.is_empty());
    assert_eq!(output.helpers.len(), 1);
    assert!(output.helpers[0].starts_with("function hasOwn<"));
}

#[test]
fn insert_in() {
    let output = generate(PlainObjectCheck::Insert, HasOwnCheck::In);
    assert!(output.guards[0].code.contains(&expected_body(plain_object_gate, in_check)));
    assert!(output.prologue.is_empty());
    assert_eq!(output.helpers.len(), 1);
    assert!(output.helpers[0].starts_with("function isPlainObject(value: unknown)"));
}

#[test]
fn insert_has_own_orders_helpers_before_guards() {
    let output = generate(PlainObjectCheck::Insert, HasOwnCheck::HasOwn);
    assert!(output.guards[0].code.contains(&expected_body(plain_object_gate, has_own_check)));

    let text = output.render();
    let source_at = text.find("interface Simple").expect("source");
    let plain_at = text.find("function isPlainObject").expect("isPlainObject");
    let has_own_at = text.find("function hasOwn").expect("hasOwn");
    let guard_at = text.find("export function isSimple").expect("guard");
    assert!(source_at < plain_at && plain_at < has_own_at && has_own_at < guard_at);
}

#[test]
fn lodash_imports_before_source() {
    let output = generate(PlainObjectCheck::Lodash, HasOwnCheck::In);
    assert!(output.guards[0].code.contains(&expected_body(plain_object_gate, in_check)));
    assert_eq!(output.prologue, vec![r#"import { isPlainObject } from "lodash";"#.to_string()]);
    assert!(output.helpers.is_empty());
    assert!(output.render().starts_with("import { isPlainObject } from \"lodash\";\n\ninterface Simple {"));
}

#[test]
fn es_toolkit_in() {
    let output = generate(PlainObjectCheck::EsToolkit, HasOwnCheck::In);
    assert!(output.guards[0].code.contains(&expected_body(plain_object_gate, in_check)));
    assert_eq!(
        output.prologue,
        vec![r#"import { isPlainObject } from "es-toolkit";"#.to_string()]
    );
}

#[test]
fn es_toolkit_has_own() {
    let output = generate(PlainObjectCheck::EsToolkit, HasOwnCheck::HasOwn);
    assert!(output.guards[0].code.contains(&expected_body(plain_object_gate, has_own_check)));
    assert_eq!(output.prologue.len(), 1);
    assert_eq!(output.helpers.len(), 1);
    assert!(output.helpers[0].starts_with("function hasOwn<"));
}

#[test]
fn no_objects_means_no_helpers() {
    let output = generate_type_guards_from_source(
        "prims.ts",
        "type Id = string | number;",
        Flags {
            plain_object_check: PlainObjectCheck::Lodash,
            has_own_check: HasOwnCheck::HasOwn,
        },
    )
    .expect("generates");
    assert!(output.prologue.is_empty());
    assert!(output.helpers.is_empty());
}
