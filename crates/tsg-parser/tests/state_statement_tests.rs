//! Tests for statement and declaration parsing in the parser.
use tsg_parser::{ParserState, PropertyName, SourceFile, Statement, parse_source_file};

fn parse_ok(source: &str) -> SourceFile {
    parse_source_file("test.ts", source).expect("source parses")
}

#[test]
fn type_alias_with_modifiers_and_type_parameters() {
    let file = parse_ok("export declare type Box<T extends object = {}, in out U> = { value: T };");
    let Statement::TypeAlias(alias) = &file.statements[0] else {
        panic!("expected type alias");
    };
    assert!(alias.modifiers.export);
    assert!(alias.modifiers.declare);
    assert_eq!(alias.name.text, "Box");
    let names: Vec<_> = alias.type_parameters.iter().map(|p| p.name.text.as_str()).collect();
    assert_eq!(names, vec!["T", "U"]);
    assert!(alias.type_parameters[0].constraint.is_some());
    assert!(alias.type_parameters[0].default.is_some());
}

#[test]
fn interface_heritage_and_members() {
    let file = parse_ok(
        "export default interface Child<T> extends Base, ns.Other<T> {\n  name: string\n  age?: number\n}",
    );
    let Statement::Interface(decl) = &file.statements[0] else {
        panic!("expected interface");
    };
    assert!(decl.modifiers.default);
    let heritage: Vec<_> = decl.heritage.iter().map(|h| h.type_name.text()).collect();
    assert_eq!(heritage, vec!["Base", "ns.Other"]);
    assert_eq!(decl.heritage[1].type_arguments.len(), 1);
    assert_eq!(decl.members.len(), 2);
}

#[test]
fn enum_members_and_initializer_text() {
    let file = parse_ok(
        "const enum Color { Red = 'RED', Green = 1 << 2, \"Blue\" = compute(1, 2), Plain, }",
    );
    let Statement::Enum(decl) = &file.statements[0] else {
        panic!("expected enum");
    };
    assert!(decl.is_const);
    assert_eq!(decl.members.len(), 4);
    assert_eq!(decl.members[0].initializer.as_deref(), Some("'RED'"));
    assert_eq!(decl.members[1].initializer.as_deref(), Some("1 << 2"));
    assert_eq!(decl.members[2].initializer.as_deref(), Some("compute(1, 2)"));
    assert!(matches!(&decl.members[2].name, PropertyName::StringLiteral { value, .. } if value == "Blue"));
    assert_eq!(decl.members[3].initializer, None);
}

#[test]
fn class_declarations_keep_only_the_name() {
    let file = parse_ok(
        "@sealed\nexport abstract class Shape<T> extends mixin(Base) implements IShape {\n  area(): number { return 0 }\n}\nexport default class {}\n",
    );
    let Statement::Class(shape) = &file.statements[0] else {
        panic!("expected class");
    };
    assert!(shape.is_abstract);
    assert_eq!(shape.name.as_ref().map(|n| n.text.as_str()), Some("Shape"));
    let Statement::Class(anonymous) = &file.statements[1] else {
        panic!("expected class");
    };
    assert!(anonymous.name.is_none());
}

#[test]
fn import_forms() {
    let file = parse_ok(
        r#"import type { A, B as C } from "./types";
import Default, { type D, "e-f" as EF } from './mod' with { type: "json" };
import * as ns from "ns";
import "side-effect";
import fs = require("fs");
"#,
    );
    let imports: Vec<_> = file
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::Import(decl) => Some(decl),
            _ => None,
        })
        .collect();
    assert_eq!(imports.len(), 4);

    assert!(imports[0].is_type_only);
    assert_eq!(imports[0].module_specifier, "./types");
    assert_eq!(imports[0].local_names().collect::<Vec<_>>(), vec!["A", "C"]);

    assert_eq!(imports[1].local_names().collect::<Vec<_>>(), vec!["Default", "D", "EF"]);
    assert!(imports[1].named_bindings[0].is_type_only);

    assert_eq!(imports[2].namespace_binding.as_ref().map(|n| n.text.as_str()), Some("ns"));
    assert_eq!(imports[3].module_specifier, "side-effect");
    assert!(matches!(file.statements[4], Statement::Other(_)));
}

#[test]
fn non_declarations_are_skipped_whole() {
    let file = parse_ok(
        r#"#!/usr/bin/env node
const handler = (x: number) => { if (x > 1) { return `${x}`; } return "}"; }
function f() {
  type Local = string;
}
namespace NS { export type Inner = number }
declare module "m" { interface Hidden {} }
export { f };
export type { Local } from "./x";
type Visible = boolean;
"#,
    );
    let visible: Vec<_> = file
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::TypeAlias(alias) => Some(alias.name.text.as_str()),
            Statement::Interface(decl) => Some(decl.name.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(visible, vec!["Visible"]);
}

#[test]
fn contextual_type_keyword_used_as_identifier() {
    let file = parse_ok("let type = 1;\ntype = 2;\ntype Real = string;");
    assert!(matches!(file.statements.last(), Some(Statement::TypeAlias(a)) if a.name.text == "Real"));
}

#[test]
fn stray_closing_brace_is_an_error() {
    let mut parser = ParserState::new("test.ts".to_string(), "}\ntype A = string;".to_string());
    let file = parser.parse_source_file();
    assert_eq!(parser.get_diagnostics().len(), 1);
    assert!(matches!(file.statements.last(), Some(Statement::TypeAlias(_))));
}

#[test]
fn statement_spans_cover_modifiers() {
    let source = "export interface A { x: number }";
    let file = parse_ok(source);
    assert_eq!(file.text_of(file.statements[0].span()), source);
}
