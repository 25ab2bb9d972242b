//! Lexer for Skald using logos.
//!
//! Produces a flat `Vec<Token>` of spanned tokens over the source. Tokens
//! carry no text; callers slice the source through `Token::span`. Comments
//! are kept (the parser turns them into tree nodes), whitespace is
//! skipped, and unlexable input becomes `TokenKind::Error` tokens so the
//! parse can flag the tree instead of the lexer failing.

use logos::Logos;
use skald_ir::{Span, Token, TokenKind};

/// Raw token from logos, before conversion to the shared `TokenKind`.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    // Double-quoted, backslash escapes pass through uncooked.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token(">>>")]
    UShr,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("??")]
    QuestionQuestion,
    #[token("=")]
    Assign,
    #[token(":")]
    Colon,

    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::LineComment => TokenKind::Comment,
        RawToken::Number => TokenKind::Number,
        RawToken::Str => TokenKind::Str,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Ident => TokenKind::Ident,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::UShr => TokenKind::UShr,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Le => TokenKind::Le,
        RawToken::Ge => TokenKind::Ge,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::QuestionQuestion => TokenKind::QuestionQuestion,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
    }
}

/// Tokenize a source string.
///
/// Always succeeds; lexing errors surface as `TokenKind::Error` tokens.
/// The returned list is terminated by a single `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(raw) => convert(raw),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }
    let end = source.len();
    tokens.push(Token::new(TokenKind::Eof, Span::from_range(end..end)));
    tokens
}

#[cfg(test)]
mod tests;
