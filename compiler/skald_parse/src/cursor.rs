//! Token cursor for navigating the token stream.

use skald_ir::{Span, Token, TokenKind};

/// Cursor over the lexer's token list.
///
/// `peek`/`bump` skip comment trivia, which is right for expression
/// context; block-level code uses `peek_raw` so comments can become tree
/// nodes instead of disappearing.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must be Eof-terminated"
        );
        Cursor { tokens, pos: 0 }
    }

    /// The current token, trivia included.
    #[inline]
    pub fn peek_raw(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// The current non-trivia token.
    #[inline]
    pub fn peek(&mut self) -> Token {
        self.skip_trivia();
        self.peek_raw()
    }

    /// The current non-trivia token kind.
    #[inline]
    pub fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind
    }

    /// Consume and return the current non-trivia token.
    pub fn bump(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token (trivia included).
    pub fn bump_raw(&mut self) -> Token {
        let token = self.peek_raw();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_kind() == kind {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Whether the non-trivia stream is at its end.
    #[inline]
    pub fn at_eof(&mut self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Span of the current non-trivia token.
    #[inline]
    pub fn current_span(&mut self) -> Span {
        self.peek().span
    }

    fn skip_trivia(&mut self) {
        while self.peek_raw().kind.is_trivia() {
            self.pos += 1;
        }
    }
}
