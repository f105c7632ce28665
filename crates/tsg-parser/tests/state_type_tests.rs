//! Tests for type expression parsing in the parser.
use tsg_parser::{
    KeywordKind, LiteralKind, ParserState, PropertyName, SourceFile, Statement, TypeMember,
    TypeNode, TypeOperatorKind, parse_source_file,
};

fn parse_source(source: &str) -> (ParserState, SourceFile) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let source_file = parser.parse_source_file();
    (parser, source_file)
}

fn alias_type(source: &str) -> TypeNode {
    let source_file = parse_source_file("test.ts", source).expect("source parses");
    match source_file.statements.into_iter().next() {
        Some(Statement::TypeAlias(alias)) => alias.type_node,
        other => panic!("expected a type alias, got {other:?}"),
    }
}

#[test]
fn parse_complex_type_expressions_have_no_errors() {
    let (parser, _file) = parse_source(
        "type T = { [K in keyof O]: O[K] } & Partial<{ a: string; b: number }>;\ntype U<T> = T extends { a: infer V } ? V : never;",
    );
    assert_eq!(parser.get_diagnostics().len(), 0);
}

#[test]
fn parse_invalid_type_reports_diagnostics() {
    let (parser, _file) = parse_source("type T = <; ");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn keywords_become_keyword_nodes() {
    let TypeNode::Union(union) = alias_type("type T = string | number | null | undefined | void | symbol;")
    else {
        panic!("expected union");
    };
    let keywords: Vec<_> = union
        .types
        .iter()
        .map(|t| match t {
            TypeNode::Keyword(k) => k.keyword,
            other => panic!("expected keyword, got {other:?}"),
        })
        .collect();
    assert_eq!(
        keywords,
        vec![
            KeywordKind::String,
            KeywordKind::Number,
            KeywordKind::Null,
            KeywordKind::Undefined,
            KeywordKind::Void,
            KeywordKind::Symbol,
        ]
    );
}

#[test]
fn literal_text_is_verbatim() {
    let TypeNode::Union(union) = alias_type(r#"type T = "a" | 'b' | -1 | 0x10 | 5n | true;"#) else {
        panic!("expected union");
    };
    let texts: Vec<_> = union
        .types
        .iter()
        .map(|t| match t {
            TypeNode::Literal(lit) => (lit.literal, lit.text.as_str()),
            other => panic!("expected literal, got {other:?}"),
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (LiteralKind::String, r#""a""#),
            (LiteralKind::String, "'b'"),
            (LiteralKind::Numeric, "-1"),
            (LiteralKind::Numeric, "0x10"),
            (LiteralKind::BigInt, "5n"),
            (LiteralKind::Boolean, "true"),
        ]
    );
}

#[test]
fn leading_bar_with_single_member_is_not_a_union() {
    assert!(matches!(alias_type("type T =\n  | 'only';"), TypeNode::Literal(_)));
}

#[test]
fn array_suffixes_nest_left_to_right() {
    let TypeNode::Array(outer) = alias_type("type T = string[][];") else {
        panic!("expected array");
    };
    assert!(matches!(*outer.element_type, TypeNode::Array(_)));
}

#[test]
fn readonly_array_is_a_type_operator() {
    let TypeNode::TypeOperator(op) = alias_type("type T = readonly number[];") else {
        panic!("expected type operator");
    };
    assert_eq!(op.operator, TypeOperatorKind::Readonly);
    assert!(matches!(*op.type_node, TypeNode::Array(_)));
}

#[test]
fn tuple_elements_track_names_optional_and_rest() {
    let TypeNode::Tuple(tuple) = alias_type("type T = [id: number, string?, ...rest: boolean[]];")
    else {
        panic!("expected tuple");
    };
    assert_eq!(tuple.elements.len(), 3);
    assert_eq!(tuple.elements[0].name.as_ref().map(|n| n.text.as_str()), Some("id"));
    assert!(!tuple.elements[0].optional);
    assert!(tuple.elements[1].optional);
    assert!(tuple.elements[2].rest);
    assert!(matches!(tuple.elements[2].type_node, TypeNode::Array(_)));
}

#[test]
fn qualified_references_keep_all_segments() {
    let TypeNode::TypeReference(reference) = alias_type("type T = ns.Inner.Leaf<string>;") else {
        panic!("expected reference");
    };
    assert_eq!(reference.type_name.text(), "ns.Inner.Leaf");
    assert_eq!(reference.type_name.last(), "Leaf");
    assert_eq!(reference.type_arguments.len(), 1);
}

#[test]
fn nested_generic_arguments_close_with_separate_tokens() {
    let TypeNode::TypeReference(reference) = alias_type("type T = Map<string, Array<Set<number>>>;")
    else {
        panic!("expected reference");
    };
    assert_eq!(reference.type_name.text(), "Map");
    assert_eq!(reference.type_arguments.len(), 2);
}

#[test]
fn typeof_query_and_indexed_access() {
    assert!(matches!(alias_type("type T = typeof MyClass;"), TypeNode::TypeQuery(_)));
    assert!(matches!(alias_type("type T = Foo['bar'];"), TypeNode::IndexedAccess(_)));
}

#[test]
fn function_and_constructor_types() {
    let TypeNode::Function(f) = alias_type("type F = (a: string, b?: number) => void;") else {
        panic!("expected function type");
    };
    assert!(!f.is_constructor);
    let TypeNode::Function(c) = alias_type("type C = abstract new () => object;") else {
        panic!("expected constructor type");
    };
    assert!(c.is_constructor);
    assert!(matches!(
        alias_type("type G = <T>(value: unknown) => value is T;"),
        TypeNode::Function(_)
    ));
}

#[test]
fn parenthesized_type_is_not_a_function_type() {
    assert!(matches!(alias_type("type T = (string | number)[];"), TypeNode::Array(_)));
    assert!(matches!(alias_type("type T = (string);"), TypeNode::Parenthesized(_)));
}

#[test]
fn conditional_type_with_infer_constraint() {
    let TypeNode::Conditional(conditional) =
        alias_type("type T<U> = U extends [infer H extends string, ...unknown[]] ? H : never;")
    else {
        panic!("expected conditional");
    };
    assert!(matches!(*conditional.extends_type, TypeNode::Tuple(_)));
}

#[test]
fn mapped_type_with_modifiers() {
    let TypeNode::Mapped(mapped) = alias_type("type T = { -readonly [K in Keys as `x${K}`]+?: K };")
    else {
        panic!("expected mapped type");
    };
    assert_eq!(mapped.type_parameter.text, "K");
    assert!(mapped.type_node.is_some());
}

#[test]
fn template_literal_type_is_a_single_node() {
    let TypeNode::TemplateLiteral(template) = alias_type("type T = `a${string}b`;") else {
        panic!("expected template literal");
    };
    assert_eq!(template.text, "`a${string}b`");
}

#[test]
fn type_literal_members() {
    let TypeNode::TypeLiteral(literal) = alias_type(
        r#"type T = {
            readonly id: number;
            "dash-value"?: string,
            [0]: boolean
            [Symbol.iterator](): Iterator<number>;
            [key: string]: unknown;
            method(a: string): void;
            (call: number): string;
            new (x: number): T;
            get size(): number;
            set size(value: number);
            #secret: string;
        };"#,
    ) else {
        panic!("expected type literal");
    };
    let members = &literal.members;
    assert_eq!(members.len(), 10);

    let TypeMember::Property(id) = &members[0] else { panic!() };
    assert!(id.readonly);
    assert!(matches!(&id.name, PropertyName::Identifier(name) if name.text == "id"));

    let TypeMember::Property(dash) = &members[1] else { panic!() };
    assert!(dash.question_token);
    assert!(matches!(&dash.name, PropertyName::StringLiteral { value, .. } if value == "dash-value"));

    let TypeMember::Property(zero) = &members[2] else { panic!() };
    assert!(matches!(&zero.name, PropertyName::NumericLiteral { text, .. } if text == "0"));

    let TypeMember::Method(iterator) = &members[3] else { panic!() };
    assert!(matches!(&iterator.name, PropertyName::Computed { expression, .. } if expression == "Symbol.iterator"));

    assert!(matches!(members[4], TypeMember::Index(_)));
    assert!(matches!(members[5], TypeMember::Method(_)));
    assert!(matches!(members[6], TypeMember::CallSignature(_)));
    assert!(matches!(members[7], TypeMember::ConstructSignature(_)));

    let TypeMember::Property(size) = &members[8] else { panic!() };
    assert!(matches!(&size.name, PropertyName::Identifier(name) if name.text == "size"));
    assert!(size.type_annotation.is_some());

    assert!(matches!(
        &members[9],
        TypeMember::Property(p) if matches!(p.name, PropertyName::PrivateIdentifier(_))
    ));
}

#[test]
fn members_named_like_keywords() {
    let TypeNode::TypeLiteral(literal) =
        alias_type("type T = { readonly: boolean; get: string; new: number; type?: string };")
    else {
        panic!("expected type literal");
    };
    let names: Vec<_> = literal
        .members
        .iter()
        .map(|m| match m {
            TypeMember::Property(p) => match &p.name {
                PropertyName::Identifier(id) => id.text.clone(),
                other => panic!("unexpected name {other:?}"),
            },
            other => panic!("unexpected member {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["readonly", "get", "new", "type"]);
}

#[test]
fn missing_member_separator_on_same_line_is_an_error() {
    let (parser, _file) = parse_source("type T = { a: string b: number };");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn unterminated_string_is_reported() {
    let error = parse_source_file("test.ts", "type T = 'open;\n").unwrap_err();
    assert!(!error.diagnostics.is_empty());
}

#[test]
fn bracket_members_split_into_index_signatures_and_computed_names() {
    let TypeNode::TypeLiteral(literal) = alias_type(
        "type T = { [key: string]: number; readonly [index: number]: string; [key]: boolean; [Symbol.iterator]: string };",
    ) else {
        panic!("expected type literal");
    };
    let members = &literal.members;
    assert_eq!(members.len(), 4);

    let TypeMember::Index(by_key) = &members[0] else { panic!("expected index signature") };
    assert_eq!(by_key.parameter_name.text, "key");
    assert!(!by_key.readonly);
    assert!(matches!(by_key.parameter_type, TypeNode::Keyword(_)));

    let TypeMember::Index(by_index) = &members[1] else { panic!("expected index signature") };
    assert_eq!(by_index.parameter_name.text, "index");
    assert!(by_index.readonly);

    let TypeMember::Property(computed) = &members[2] else { panic!("expected property") };
    assert!(matches!(&computed.name, PropertyName::Computed { expression, .. } if expression == "key"));

    let TypeMember::Property(symbol) = &members[3] else { panic!("expected property") };
    assert!(matches!(&symbol.name, PropertyName::Computed { expression, .. } if expression == "Symbol.iterator"));
}
