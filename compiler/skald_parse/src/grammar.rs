//! Grammar productions.
//!
//! One method per construct, precedence climbing for binary expressions.
//! Recovery: record a `ParseError`, emit an `error` node, and synchronize
//! to the next `;` or `}` so the rest of the file still parses.

use std::rc::Rc;

use skald_ir::{NodeKind, Span, SyntaxNode, SyntaxTree, Token, TokenKind};

use crate::cursor::Cursor;
use crate::{ParseError, ParseOutcome};

/// Binding power for a binary operator token, plus right-associativity.
///
/// Higher binds tighter. `**` is the only right-associative operator.
fn binary_power(kind: TokenKind) -> Option<(u8, bool)> {
    let power = match kind {
        TokenKind::QuestionQuestion => (1, false),
        TokenKind::PipePipe => (2, false),
        TokenKind::AmpAmp => (3, false),
        TokenKind::Pipe => (4, false),
        TokenKind::Caret => (5, false),
        TokenKind::Amp => (6, false),
        TokenKind::EqEq | TokenKind::NotEq => (7, false),
        TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge => (8, false),
        TokenKind::Shl | TokenKind::Shr | TokenKind::UShr => (9, false),
        TokenKind::Plus | TokenKind::Minus => (10, false),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (11, false),
        TokenKind::StarStar => (12, true),
        _ => return None,
    };
    Some(power)
}

pub struct Parser {
    source: Rc<str>,
    cursor: Cursor,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(source: &str, tokens: Vec<Token>) -> Self {
        Parser {
            source: Rc::from(source),
            cursor: Cursor::new(tokens),
            errors: Vec::new(),
        }
    }

    /// Parse the whole file into a root `block` node.
    pub fn parse_source_file(mut self) -> ParseOutcome {
        let children = self.parse_block_contents(TokenKind::Eof);
        let span = Span::from_range(0..self.source.len());
        let root = SyntaxNode::new(NodeKind::Block, span, Rc::clone(&self.source), children);
        let has_error = !self.errors.is_empty();
        ParseOutcome {
            tree: SyntaxTree::new(root, has_error),
            errors: self.errors,
        }
    }

    /// Statements and comments up to (not including) `terminator`.
    fn parse_block_contents(&mut self, terminator: TokenKind) -> Vec<SyntaxNode> {
        let mut children = Vec::new();
        loop {
            // Comments become nodes only at statement level; inside
            // expressions the cursor drops them as trivia.
            if self.cursor.peek_raw().kind == TokenKind::Comment {
                let token = self.cursor.bump_raw();
                children.push(self.leaf(NodeKind::Comment, token.span));
                continue;
            }
            let kind = self.cursor.peek_kind();
            if kind == terminator || kind == TokenKind::Eof {
                break;
            }
            if kind == TokenKind::Semicolon {
                let semi = self.cursor.bump();
                children.push(SyntaxNode::new(
                    NodeKind::Statement,
                    semi.span,
                    Rc::clone(&self.source),
                    Vec::new(),
                ));
                continue;
            }
            children.push(self.parse_statement());
        }
        children
    }

    fn parse_statement(&mut self) -> SyntaxNode {
        let expr = self.parse_expression();
        let mut span = expr.span();
        if let Some(semi) = self.cursor.eat(TokenKind::Semicolon) {
            span = span.to(semi.span);
        } else {
            let at = self.cursor.current_span();
            self.error("expected `;` after statement", at);
            self.synchronize();
        }
        SyntaxNode::new(
            NodeKind::Statement,
            span,
            Rc::clone(&self.source),
            vec![expr],
        )
    }

    fn parse_expression(&mut self) -> SyntaxNode {
        self.parse_assignment()
    }

    /// `lhs (= | :) rhs`, right-associative; lowest precedence.
    fn parse_assignment(&mut self) -> SyntaxNode {
        let lhs = self.parse_binary(1);
        let kind = self.cursor.peek_kind();
        if kind != TokenKind::Assign && kind != TokenKind::Colon {
            return lhs;
        }
        let op_token = self.cursor.bump();
        let op = self.leaf(NodeKind::Operator, op_token.span);
        let rhs = self.parse_assignment();
        let span = lhs.span().to(rhs.span());
        SyntaxNode::new(
            NodeKind::AssignmentExpression,
            span,
            Rc::clone(&self.source),
            vec![lhs, op, rhs],
        )
    }

    fn parse_binary(&mut self, min_power: u8) -> SyntaxNode {
        let mut lhs = self.parse_unary();
        while let Some((power, right_assoc)) = binary_power(self.cursor.peek_kind()) {
            if power < min_power {
                break;
            }
            let op_token = self.cursor.bump();
            let op = self.leaf(NodeKind::Operator, op_token.span);
            let next_min = if right_assoc { power } else { power + 1 };
            let rhs = self.parse_binary(next_min);
            let span = lhs.span().to(rhs.span());
            lhs = SyntaxNode::new(
                NodeKind::BinaryExpression,
                span,
                Rc::clone(&self.source),
                vec![lhs, op, rhs],
            );
        }
        lhs
    }

    fn parse_unary(&mut self) -> SyntaxNode {
        match self.cursor.peek_kind() {
            TokenKind::Bang | TokenKind::Tilde | TokenKind::Minus => {
                let op_token = self.cursor.bump();
                let op = self.leaf(NodeKind::Operator, op_token.span);
                let operand = self.parse_unary();
                let span = op_token.span.to(operand.span());
                SyntaxNode::new(
                    NodeKind::UnaryExpression,
                    span,
                    Rc::clone(&self.source),
                    vec![op, operand],
                )
            }
            _ => self.parse_postfix(),
        }
    }

    /// `primary ('.' identifier)*`, left-nested member expressions.
    fn parse_postfix(&mut self) -> SyntaxNode {
        let mut node = self.parse_primary();
        while let Some(dot_token) = self.cursor.eat(TokenKind::Dot) {
            let dot = self.leaf(NodeKind::Operator, dot_token.span);
            let member = match self.cursor.eat(TokenKind::Ident) {
                Some(ident) => self.leaf(NodeKind::Identifier, ident.span),
                None => {
                    let at = self.cursor.current_span();
                    self.error("expected identifier after `.`", at);
                    self.leaf(NodeKind::Error, at)
                }
            };
            let span = node.span().to(member.span());
            node = SyntaxNode::new(
                NodeKind::MemberExpression,
                span,
                Rc::clone(&self.source),
                vec![node, dot, member],
            );
        }
        node
    }

    fn parse_primary(&mut self) -> SyntaxNode {
        let token = self.cursor.peek();
        match token.kind {
            TokenKind::Number => {
                self.cursor.bump();
                self.leaf(NodeKind::Number, token.span)
            }
            TokenKind::Str => {
                self.cursor.bump();
                self.leaf(NodeKind::String, token.span)
            }
            TokenKind::True | TokenKind::False => {
                self.cursor.bump();
                self.leaf(NodeKind::Boolean, token.span)
            }
            TokenKind::Ident => {
                self.cursor.bump();
                self.leaf(NodeKind::Identifier, token.span)
            }
            TokenKind::LParen => {
                self.cursor.bump();
                // No wrapper node: the inner expression stands in directly.
                let expr = self.parse_expression();
                if self.cursor.eat(TokenKind::RParen).is_none() {
                    let at = self.cursor.current_span();
                    self.error("expected `)`", at);
                }
                expr
            }
            TokenKind::LBrace => self.parse_block(),
            _ => {
                let found = self.token_text(token);
                self.error(format!("expected expression, found `{found}`"), token.span);
                // Always consume one token so the parser makes progress.
                self.cursor.bump();
                self.leaf(NodeKind::Error, token.span)
            }
        }
    }

    fn parse_block(&mut self) -> SyntaxNode {
        let open = self.cursor.bump();
        debug_assert_eq!(open.kind, TokenKind::LBrace);
        let children = self.parse_block_contents(TokenKind::RBrace);
        let mut span = open.span;
        if let Some(close) = self.cursor.eat(TokenKind::RBrace) {
            span = span.to(close.span);
        } else {
            let at = self.cursor.current_span();
            self.error("expected `}`", at);
            span = span.to(at);
        }
        SyntaxNode::new(NodeKind::Block, span, Rc::clone(&self.source), children)
    }

    /// Skip to just past the next `;`, or stop before `}`/end of input.
    fn synchronize(&mut self) {
        loop {
            match self.cursor.peek_kind() {
                TokenKind::Semicolon => {
                    self.cursor.bump();
                    return;
                }
                TokenKind::RBrace | TokenKind::Eof => return,
                _ => {
                    self.cursor.bump();
                }
            }
        }
    }

    fn leaf(&self, kind: NodeKind, span: Span) -> SyntaxNode {
        SyntaxNode::leaf(kind, span, Rc::clone(&self.source))
    }

    fn token_text(&self, token: Token) -> String {
        if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            self.source[token.span.range()].to_string()
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.errors.push(ParseError::new(message, span));
    }
}
