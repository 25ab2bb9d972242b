//! Hard evaluation errors.
//!
//! Hard errors unwind the entire evaluation with no partial-result
//! guarantee; the driver turns them into a failure message and a
//! non-zero exit. Soft failures never appear here - they go through the
//! diagnostics sink and evaluate to void (see `diagnostics`).

use thiserror::Error;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// A hard evaluation failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// Assignment into a name already bound constant anywhere in its
    /// resolution chain.
    #[error("cannot reassign constant binding `{name}`")]
    Redeclaration { name: String },
}
