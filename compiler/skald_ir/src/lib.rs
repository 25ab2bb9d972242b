//! Skald IR - shared data model for the Skald toolchain.
//!
//! This crate defines what flows between the lexer, the parser, and the
//! evaluator:
//!
//! - `Span`: byte ranges into the source
//! - `Token` / `TokenKind`: lexer output
//! - `SyntaxNode` / `SyntaxTree` / `NodeKind`: the parsed tree the
//!   evaluator walks (kind tag, ordered children, raw text slice, error
//!   flag)
//! - `BinaryOp` / `UnaryOp`: operator vocabulary resolved from raw
//!   operator text
//!
//! The tree is concrete rather than abstract: operator tokens appear as
//! child nodes, and every node can reproduce its raw source slice. The
//! evaluator dispatches on `NodeKind` and reads operator/identifier text
//! straight from the nodes.

mod node;
mod op;
mod span;
mod token;

pub use node::{NodeKind, SyntaxNode, SyntaxTree};
pub use op::{BinaryOp, UnaryOp};
pub use span::Span;
pub use token::{Token, TokenKind};
