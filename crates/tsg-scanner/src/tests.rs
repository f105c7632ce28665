use super::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        out.push(kind);
    }
    out
}

#[test]
fn scans_type_alias_tokens() {
    assert_eq!(
        kinds("type Id = string | number;"),
        vec![
            SyntaxKind::TypeKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::StringKeyword,
            SyntaxKind::BarToken,
            SyntaxKind::NumberKeyword,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn scans_literals_and_punctuation() {
    assert_eq!(
        kinds("'a' \"b\" 1.5e3 0xFF 10n ... => ?"),
        vec![
            SyntaxKind::StringLiteral,
            SyntaxKind::StringLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::NumericLiteral,
            SyntaxKind::BigIntLiteral,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::QuestionToken,
        ]
    );
}

#[test]
fn operators_outside_the_type_grammar_collapse() {
    assert_eq!(
        kinds("a === b || c && !d"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::Identifier,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::Identifier,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::OtherPunctuation,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn template_literal_is_one_token_with_nested_placeholders() {
    let source = "type T = `a${`b${string}`}c${'}'}`;";
    assert_eq!(
        kinds(source),
        vec![
            SyntaxKind::TypeKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::TemplateLiteral,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn tracks_preceding_line_breaks_across_comments() {
    let mut scanner = ScannerState::new("a /* one\ntwo */ b // tail\nc");
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
    scanner.scan();
    assert_eq!(scanner.token_text(), "b");
    assert!(scanner.has_preceding_line_break());
    scanner.scan();
    assert_eq!(scanner.token_text(), "c");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn save_and_restore_rewinds_tokens() {
    let mut scanner = ScannerState::new("foo bar");
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    assert_eq!(scanner.token_text(), "bar");
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token_text(), "foo");
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
}

#[test]
fn string_token_value_is_unescaped() {
    let mut scanner = ScannerState::new(r#""dash\"value""#);
    scanner.scan();
    assert_eq!(scanner.token_value(), "dash\"value");
    assert_eq!(scanner.token_text(), r#""dash\"value""#);
}

#[test]
fn unterminated_comment_is_reported() {
    let mut scanner = ScannerState::new("type /* never closed");
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.token(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
}

#[test]
fn private_and_unicode_identifiers() {
    assert_eq!(
        kinds("#secret café $el _x"),
        vec![
            SyntaxKind::PrivateIdentifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
        ]
    );
}
