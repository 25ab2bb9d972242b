//! Runtime values for the Skald evaluator.
//!
//! `Value` is a closed sum type with a precise payload per variant - no
//! "any"-typed escape hatch. Composite values (`Block`, `Function`,
//! `Iterator`) hold *shared references* to the environment they belong
//! to, never copies: mutating a captured variable must be observable
//! through every holder of that environment.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use skald_ir::SyntaxNode;

use crate::environment::EnvRef;

/// A runtime value.
///
/// Cloning is cheap for composite variants (reference bumps) and O(len)
/// for strings; the evaluator clones freely.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value; also what soft-failed evaluation yields.
    Void,
    /// 64-bit float. The only numeric type in the language.
    Number(f64),
    /// String.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// An evaluated scope as a first-class value. Owns (conceptually)
    /// the environment created at block entry; closures captured inside
    /// the block share the same environment.
    Block(EnvRef),
    /// A closure: parameter-pattern nodes, body node, captured
    /// environment.
    Function(FunctionValue),
    /// A lazy, partially realized sequence. Constructible, but the
    /// production/consumption protocol is reserved; nothing drives one
    /// yet.
    Iterator(IteratorValue),
}

/// A closure value.
///
/// Parameters and body are references into the syntax tree; the
/// environment is the shared defining scope, not a copy of it.
#[derive(Clone)]
pub struct FunctionValue {
    pub params: Vec<SyntaxNode>,
    pub body: SyntaxNode,
    pub env: EnvRef,
}

/// A lazy sequence value: what it has produced so far, where the next
/// consumer reads, and the closure-like half that would produce more.
///
/// The buffer and cursor sit behind a shared cell so every holder of the
/// iterator observes the same progress; restarting means re-invoking,
/// not rewinding the cursor.
#[derive(Clone)]
pub struct IteratorValue {
    pub params: Vec<SyntaxNode>,
    pub state: Rc<RefCell<IteratorState>>,
    pub env: EnvRef,
}

/// Mutable half of an iterator.
#[derive(Clone, Default)]
pub struct IteratorState {
    pub produced: Vec<Value>,
    pub cursor: usize,
}

impl Value {
    /// Create a number value.
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a boolean value.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Wrap an environment as a block value.
    #[inline]
    pub fn block(env: EnvRef) -> Self {
        Value::Block(env)
    }

    /// Create a closure over the given environment.
    pub fn function(params: Vec<SyntaxNode>, body: SyntaxNode, env: EnvRef) -> Self {
        Value::Function(FunctionValue { params, body, env })
    }

    /// Create an empty iterator over the given environment.
    pub fn iterator(params: Vec<SyntaxNode>, env: EnvRef) -> Self {
        Value::Iterator(IteratorValue {
            params,
            state: Rc::new(RefCell::new(IteratorState::default())),
            env,
        })
    }

    /// The kind label used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Block(_) => "block",
            Value::Function(_) => "function",
            Value::Iterator(_) => "iterator",
        }
    }

    /// Whether this is the void value.
    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }
}

/// Structural equality: tag first, payload second.
///
/// Distinct tags are never equal and never raise. Equal tags use the
/// natural equality of the payload: exact float equality for numbers,
/// raw string equality for strings. Environment-carrying values compare
/// by identity of the captured environment (scopes are stateful; value
/// equality degenerates to reference equality).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => {
                a.env.ptr_eq(&b.env) && a.body.same_node(&b.body)
            }
            (Value::Iterator(a), Value::Iterator(b)) => Rc::ptr_eq(&a.state, &b.state),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Block(env) => write!(f, "<block: {} bindings>", env.binding_count()),
            Value::Function(func) => write!(f, "<function/{}>", func.params.len()),
            Value::Iterator(iter) => {
                write!(f, "<iterator @ {}>", iter.state.borrow().cursor)
            }
        }
    }
}

// Shallow on purpose: environments can reach themselves through block
// values, so a derived Debug could recurse forever.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("Void"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Block(env) => write!(f, "Block(<{} bindings>)", env.binding_count()),
            Value::Function(func) => write!(f, "Function(<{} params>)", func.params.len()),
            Value::Iterator(iter) => {
                let state = iter.state.borrow();
                write!(
                    f,
                    "Iterator(<{} produced, cursor {}>)",
                    state.produced.len(),
                    state.cursor
                )
            }
        }
    }
}
