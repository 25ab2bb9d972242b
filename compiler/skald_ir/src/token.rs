//! Token types for the Skald lexer.

use std::fmt;

use crate::Span;

/// A token with its span in the source.
///
/// Tokens carry no text payload; the raw slice is recovered from the span
/// when needed, so the token list stays small and `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Skald.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Number literal: `42`, `3.14`, `2.5e-8`
    Number,
    /// String literal, quotes included: `"hello"`
    Str,
    /// `true`
    True,
    /// `false`
    False,
    /// Identifier: `shape`, `x_1`
    Ident,
    /// Line comment: `// ...`
    Comment,

    // Operators
    /// `!`
    Bang,
    /// `~`
    Tilde,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `??`
    QuestionQuestion,
    /// `=` - constant assignment
    Assign,
    /// `:` - mutable assignment
    Colon,

    // Punctuation
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// Unlexable input.
    Error,
    /// End of input. The lexer always terminates the list with one.
    Eof,
}

impl TokenKind {
    /// Tokens the parser skips when looking for syntax.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment)
    }

    /// Whether this token can begin an expression.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::Str
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Ident
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Minus
                | TokenKind::LBrace
                | TokenKind::LParen
        )
    }
}
