//! Тесты для лексического анализатора языка фильтров

use crate::common::Result;
use crate::query::{Lexer, TokenKind};

#[test]
fn test_fields_and_literals() -> Result<()> {
    let tokens = Lexer::new("$publisher ACME = ").tokenize()?;

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Field);
    assert_eq!(tokens[0].value, "publisher");
    assert_eq!(tokens[1].kind, TokenKind::Literal);
    assert_eq!(tokens[1].value, "ACME");
    assert_eq!(tokens[2].kind, TokenKind::Eq);
    Ok(())
}

#[test]
fn test_operators_and_casts() -> Result<()> {
    let tokens = Lexer::new("= != < <= > >= and or not int string bool time workflow tlp")
        .tokenize()?;

    let expected = [
        TokenKind::Eq,
        TokenKind::Ne,
        TokenKind::Lt,
        TokenKind::Le,
        TokenKind::Gt,
        TokenKind::Ge,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::CastInt,
        TokenKind::CastString,
        TokenKind::CastBool,
        TokenKind::CastTime,
        TokenKind::CastWorkflow,
        TokenKind::CastTlp,
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, kind) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
    }
    Ok(())
}

#[test]
fn test_quoted_literal() -> Result<()> {
    let tokens = Lexer::new(r#"$title "BIND 9: \"urgent\" fix" ="#).tokenize()?;

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, TokenKind::Literal);
    assert_eq!(tokens[1].value, r#"BIND 9: "urgent" fix"#);
    Ok(())
}

#[test]
fn test_boolean_keywords() -> Result<()> {
    let tokens = Lexer::new("true false").tokenize()?;

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::True);
    assert_eq!(tokens[1].kind, TokenKind::False);
    Ok(())
}

#[test]
fn test_token_positions() -> Result<()> {
    let tokens = Lexer::new("$id 42 int =").tokenize()?;

    assert_eq!(tokens[0].position.index, 0);
    assert_eq!(tokens[0].position.offset, 0);
    assert_eq!(tokens[1].position.index, 1);
    assert_eq!(tokens[1].position.offset, 4);
    assert_eq!(tokens[3].position.index, 3);
    Ok(())
}

#[test]
fn test_empty_field_name() {
    let err = Lexer::new("$ 42").tokenize().unwrap_err();
    assert!(err.to_string().contains("empty field name"));
}

#[test]
fn test_unterminated_string() {
    let err = Lexer::new(r#"$title "no end"#).tokenize().unwrap_err();
    assert!(err.to_string().contains("unterminated string"));
}

#[test]
fn test_empty_input() -> Result<()> {
    let tokens = Lexer::new("   ").tokenize()?;
    assert!(tokens.is_empty());
    Ok(())
}
