use pretty_assertions::assert_eq;
use skald_ir::TokenKind;

use super::tokenize;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_simple_statement() {
    assert_eq!(
        kinds("x = 1;"),
        vec![
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn longest_match_wins_for_shifts() {
    assert_eq!(
        kinds("a >>> b >> c"),
        vec![
            TokenKind::Ident,
            TokenKind::UShr,
            TokenKind::Ident,
            TokenKind::Shr,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn compound_operators_are_single_tokens() {
    assert_eq!(
        kinds("a <= b != c ?? d ** e"),
        vec![
            TokenKind::Ident,
            TokenKind::Le,
            TokenKind::Ident,
            TokenKind::NotEq,
            TokenKind::Ident,
            TokenKind::QuestionQuestion,
            TokenKind::Ident,
            TokenKind::StarStar,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_with_escaped_quote() {
    let tokens = tokenize(r#""a\"b";"#);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].span.range(), 0..6);
}

#[test]
fn keywords_beat_identifiers() {
    assert_eq!(
        kinds("true falsey false"),
        vec![
            TokenKind::True,
            TokenKind::Ident,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comment_is_kept_as_token() {
    assert_eq!(
        kinds("// note\nx"),
        vec![TokenKind::Comment, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn number_forms() {
    for src in ["0", "42", "3.14", "2.5e-8", "1e9"] {
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::Number, "lexing {src}");
        assert_eq!(tokens[0].span.range(), 0..src.len(), "lexing {src}");
    }
}

#[test]
fn unlexable_input_becomes_error_token() {
    let tokens = tokenize("x = @;");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Error));
    // The rest of the stream is still usable.
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn spans_slice_source() {
    let src = "ab + cd";
    let tokens = tokenize(src);
    assert_eq!(&src[tokens[0].span.range()], "ab");
    assert_eq!(&src[tokens[1].span.range()], "+");
    assert_eq!(&src[tokens[2].span.range()], "cd");
}
