//! Recursive dispatch over syntax-tree node kinds.
//!
//! Evaluation order is pre-order, left-to-right, and eager on both
//! operands of every binary expression. There is no state machine beyond
//! the syntax-driven recursion, and recursion depth is bounded only by
//! the host call stack - a boundary condition for deeply nested input.
//!
//! There are no loop, conditional, or function-call node kinds here:
//! functions and iterators exist as values but are not yet invocable.
//! Function application is a documented gap, not something this module
//! quietly fills in.

use skald_ir::{BinaryOp, NodeKind, Span, SyntaxNode, UnaryOp};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::environment::{EnvRef, MemberPathError};
use crate::errors::{EvalError, EvalResult};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::value::Value;

/// The tree-walking evaluator.
///
/// Holds the soft-diagnostics sink for one evaluation; hard errors come
/// back through the `Result`.
#[derive(Default)]
pub struct Interpreter {
    diagnostics: Diagnostics,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::default()
    }

    /// Soft failures recorded so far, in evaluation order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.items()
    }

    /// Drain the recorded soft failures.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Evaluate a syntax tree node in the given environment.
    ///
    /// `Err` carries hard failures only; soft failures are recorded and
    /// evaluate to void so the surrounding program continues.
    pub fn evaluate(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        match node.kind() {
            NodeKind::Block => self.eval_block(node, env),
            NodeKind::Statement => self.eval_statement(node, env),
            NodeKind::Identifier => Ok(env.lookup(node.text())),
            NodeKind::Number => Ok(self.eval_number_literal(node)),
            NodeKind::String => Ok(eval_string_literal(node)),
            NodeKind::Boolean => Ok(Value::Bool(node.text() == "true")),
            NodeKind::UnaryExpression => self.eval_unary_expression(node, env),
            NodeKind::BinaryExpression => self.eval_binary_expression(node, env),
            NodeKind::AssignmentExpression => self.eval_assignment_expression(node, env),
            NodeKind::MemberExpression => self.eval_member_expression(node, env),
            NodeKind::Comment => Ok(Value::Void),
            kind => Ok(self.soft(
                DiagnosticKind::UnhandledNodeKind,
                format!("unhandled node kind `{kind}`"),
                node.span(),
            )),
        }
    }

    /// A block creates a child scope, wraps it as a value first, then
    /// runs every direct `statement` child into it in sequence. No
    /// statement's result short-circuits the rest.
    fn eval_block(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        let block_env = env.extend();
        let block = Value::block(block_env.clone());
        for child in node.children() {
            if child.kind() == NodeKind::Statement {
                self.evaluate(child, &block_env)?;
            }
        }
        Ok(block)
    }

    fn eval_statement(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        match node.first_child() {
            Some(expr) => self.evaluate(expr, env),
            None => Ok(Value::Void),
        }
    }

    fn eval_number_literal(&mut self, node: &SyntaxNode) -> Value {
        match node.text().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => self.soft(
                DiagnosticKind::LiteralParse,
                format!("invalid number literal `{}`", node.text()),
                node.span(),
            ),
        }
    }

    fn eval_unary_expression(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        let [op_node, operand_node] = node.children() else {
            return Ok(self.malformed("unary", node));
        };
        let operand = self.evaluate(operand_node, env)?;
        let Some(op) = UnaryOp::from_symbol(op_node.text()) else {
            return Ok(self.soft(
                DiagnosticKind::UnhandledOperator,
                format!("unhandled unary operator `{}`", op_node.text()),
                op_node.span(),
            ));
        };
        match evaluate_unary(op, &operand) {
            Ok(value) => Ok(value),
            Err(message) => Ok(self.soft(DiagnosticKind::TypeMismatch, message, node.span())),
        }
    }

    /// Both operands are evaluated before the operator is applied -
    /// including `&&` and `||`, which do not short-circuit.
    fn eval_binary_expression(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        let [lhs_node, op_node, rhs_node] = node.children() else {
            return Ok(self.malformed("binary", node));
        };
        let lhs = self.evaluate(lhs_node, env)?;
        let rhs = self.evaluate(rhs_node, env)?;
        let Some(op) = BinaryOp::from_symbol(op_node.text()) else {
            return Ok(self.soft(
                DiagnosticKind::UnhandledOperator,
                format!("unhandled binary operator `{}`", op_node.text()),
                op_node.span(),
            ));
        };
        match evaluate_binary(op, &lhs, &rhs) {
            Ok(value) => Ok(value),
            Err(message) => Ok(self.soft(DiagnosticKind::TypeMismatch, message, node.span())),
        }
    }

    /// Member access reads from the block's own table only; it does not
    /// walk that environment's parent chain.
    fn eval_member_expression(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        let [lhs_node, _dot, member_node] = node.children() else {
            return Ok(self.malformed("member", node));
        };
        let lhs = self.evaluate(lhs_node, env)?;
        match lhs {
            Value::Block(block_env) => Ok(block_env.lookup_local(member_node.text())),
            other => Ok(self.soft(
                DiagnosticKind::TypeMismatch,
                format!(
                    "left side of member expression is {}, not a block",
                    other.type_name()
                ),
                node.span(),
            )),
        }
    }

    /// The operator token decides constancy: text containing `=` binds
    /// constant, anything else binds mutable.
    fn eval_assignment_expression(&mut self, node: &SyntaxNode, env: &EnvRef) -> EvalResult {
        let [lhs_node, op_node, rhs_node] = node.children() else {
            return Ok(self.malformed("assignment", node));
        };
        let constant = op_node.text().contains('=');
        let value = self.evaluate(rhs_node, env)?;
        match lhs_node.kind() {
            NodeKind::Identifier => env.declare_or_assign(lhs_node.text(), value, constant),
            NodeKind::MemberExpression => {
                let path: Vec<&str> = lhs_node.text().split('.').collect();
                match env.resolve_member_path(&path, constant) {
                    Ok(target) => {
                        let last = path.last().copied().unwrap_or_default();
                        target.declare_or_assign(last, value, constant)
                    }
                    Err(MemberPathError::Redeclaration { name }) => {
                        Err(EvalError::Redeclaration { name })
                    }
                    Err(soft) => Ok(self.soft(
                        DiagnosticKind::UnresolvedMember,
                        soft.to_string(),
                        lhs_node.span(),
                    )),
                }
            }
            _ => Ok(Value::Void),
        }
    }

    fn malformed(&mut self, what: &str, node: &SyntaxNode) -> Value {
        self.soft(
            DiagnosticKind::UnhandledNodeKind,
            format!("malformed {what} expression `{}`", node.text()),
            node.span(),
        )
    }

    /// Record a soft failure and substitute void.
    fn soft(&mut self, kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Value {
        self.diagnostics
            .emit(Diagnostic::new(kind, message.into(), Some(span)));
        Value::Void
    }
}

/// Strip the delimiting quotes; escape sequences pass through uncooked.
fn eval_string_literal(node: &SyntaxNode) -> Value {
    let text = node.text();
    let inner = text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text);
    Value::string(inner)
}

#[cfg(test)]
mod tests;
