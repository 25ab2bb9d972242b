//! Skald Eval - the evaluation core of the Skald language.
//!
//! Given an already-parsed syntax tree (see `skald_ir`), this crate
//! computes runtime values while maintaining lexical scoping and binding
//! mutability rules.
//!
//! # Architecture
//!
//! - `value`: `Value`, the closed sum type of runtime values
//! - `environment`: `EnvRef`, the shared-handle chained binding table
//! - `interpreter`: `Interpreter`, recursive dispatch over node kinds
//! - `operators` / `unary_operators`: direct enum-based operator dispatch
//! - `diagnostics`: the soft-error sink (evaluation substitutes void and
//!   continues); `errors`: the hard error that aborts evaluation
//! - `snapshot`: serializable nested record of an environment's bindings,
//!   for reporting only
//!
//! # Error model
//!
//! `evaluate` returns `Result<Value, EvalError>`. The `Err` side is
//! reserved for hard failures (reassigning a constant), which unwind the
//! whole evaluation. Everything else - type mismatches, unknown
//! operators, unresolvable member paths, unhandled node kinds - is soft:
//! pushed into the interpreter's diagnostics sink, logged through
//! `tracing`, and evaluated as `Value::Void` so the remaining statements
//! still run.

mod diagnostics;
mod environment;
mod errors;
mod interpreter;
mod operators;
mod snapshot;
mod unary_operators;
mod value;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use environment::{Binding, EnvRef, MemberPathError};
pub use errors::{EvalError, EvalResult};
pub use interpreter::Interpreter;
pub use operators::evaluate_binary;
pub use snapshot::{BindingSnapshot, BindingsSnapshot, ScalarSnapshot};
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, IteratorValue, Value};
