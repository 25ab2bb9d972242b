//! Chained binding tables implementing lexical scope.
//!
//! An `Environment` maps names to `{value, constant}` bindings and holds
//! an optional parent. `EnvRef` is the shared handle (`Rc<RefCell<..>>`
//! behind a newtype): block values and closures hold owning references to
//! the environment they capture, so an environment lives as long as its
//! longest-lived holder - lifetime is governed by reference count, not
//! lexical nesting.
//!
//! Name resolution always walks from the starting environment upward and
//! stops at the first table containing the name. There is no
//! shadow-then-restore: declaring a name in a nearer scope simply makes
//! it resolve first for that scope's lifetime.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::errors::EvalError;
use crate::snapshot::BindingsSnapshot;
use crate::value::Value;

/// A named binding.
#[derive(Clone, Debug)]
pub struct Binding {
    pub value: Value,
    pub constant: bool,
}

/// The binding table itself. Only reachable through `EnvRef`.
struct Environment {
    bindings: FxHashMap<String, Binding>,
    parent: Option<EnvRef>,
}

/// Failure to resolve a dotted member path.
///
/// These are soft from the evaluator's point of view (diagnostic + void),
/// except `Redeclaration`, which surfaces the hard constant-rebinding
/// failure hit while autovivifying.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MemberPathError {
    /// A segment was absent and the traversal context was constant, so
    /// autovivification is not permitted.
    #[error("cannot create member `{segment}` through a constant path")]
    MissingOnConstant { segment: String },
    /// A segment resolved to a non-block value; there is no environment
    /// to descend into.
    #[error("member path segment `{segment}` is not a block")]
    NotABlock { segment: String },
    /// Autovivification tried to bind over a constant.
    #[error("cannot reassign constant binding `{name}`")]
    Redeclaration { name: String },
}

/// Shared handle to an environment.
///
/// Clone is an `Rc` bump; clones refer to the same table. All mutation
/// goes through `&self` methods (interior mutability), which is sound
/// because evaluation is single-threaded.
#[derive(Clone)]
pub struct EnvRef(Rc<RefCell<Environment>>);

/// Equality is handle identity: two `EnvRef`s are equal iff they point at
/// the same environment table (`ptr_eq`). `Environment`/`Value` are not
/// structurally comparable, so this is the only equality `EnvRef` defines.
impl PartialEq for EnvRef {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl EnvRef {
    /// Create a root environment with no parent: the global scope.
    pub fn global() -> Self {
        EnvRef::with_parent(None)
    }

    /// Create a child environment with `self` as parent.
    #[must_use]
    pub fn extend(&self) -> Self {
        EnvRef::with_parent(Some(self.clone()))
    }

    fn with_parent(parent: Option<EnvRef>) -> Self {
        EnvRef(Rc::new(RefCell::new(Environment {
            bindings: FxHashMap::default(),
            parent,
        })))
    }

    /// Whether two handles refer to the same environment.
    #[inline]
    pub fn ptr_eq(&self, other: &EnvRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of bindings in this table (parents excluded).
    pub fn binding_count(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    /// Declaration and assignment share one operation.
    ///
    /// Resolve `name` through the parent chain. Found constant anywhere:
    /// hard `Redeclaration` error. Found mutable: the write goes into the
    /// table that originally declared it, with the new constancy flag.
    /// Found nowhere: a fresh binding in *this* table. A constant can
    /// only ever be set once across its entire resolution chain.
    pub fn declare_or_assign(
        &self,
        name: &str,
        value: Value,
        constant: bool,
    ) -> Result<Value, EvalError> {
        if let Some(owner) = self.resolve(name) {
            let mut env = owner.0.borrow_mut();
            let binding = env
                .bindings
                .get_mut(name)
                .unwrap_or_else(|| unreachable!("resolve returned a table without `{name}`"));
            if binding.constant {
                return Err(EvalError::Redeclaration {
                    name: name.to_string(),
                });
            }
            *binding = Binding {
                value: value.clone(),
                constant,
            };
            return Ok(value);
        }
        self.0.borrow_mut().bindings.insert(
            name.to_string(),
            Binding {
                value: value.clone(),
                constant,
            },
        );
        Ok(value)
    }

    /// Look up a name through the parent chain.
    ///
    /// Absence of a binding is not an error at lookup time: a missing
    /// name yields void.
    pub fn lookup(&self, name: &str) -> Value {
        self.lookup_binding(name)
            .map_or(Value::Void, |binding| binding.value)
    }

    /// Look up a name in this table only - no parent walk.
    ///
    /// Member expressions use this: `a.b` consults only `a`'s own scope.
    pub fn lookup_local(&self, name: &str) -> Value {
        self.0
            .borrow()
            .bindings
            .get(name)
            .map_or(Value::Void, |binding| binding.value.clone())
    }

    /// The full binding (value + constancy) for a name, walking parents.
    pub fn lookup_binding(&self, name: &str) -> Option<Binding> {
        self.resolve(name)
            .and_then(|owner| owner.0.borrow().bindings.get(name).cloned())
    }

    /// The nearest environment (including self) containing `name`.
    pub fn resolve(&self, name: &str) -> Option<EnvRef> {
        if self.0.borrow().bindings.contains_key(name) {
            return Some(self.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.resolve(name))
    }

    /// Resolve a dotted path for assignment, autovivifying as permitted.
    ///
    /// For each non-final segment: a void result soft-fails when the
    /// traversal context is constant, otherwise a fresh mutable block is
    /// bound under that name (its environment extends the current one)
    /// and traversal descends into it; a non-block value soft-fails; a
    /// block descends, the context constancy becoming that binding's
    /// constancy. For the final segment the same void/constant interplay
    /// decides whether assignment may proceed; on success the returned
    /// environment is where the final segment is to be bound.
    pub fn resolve_member_path(
        &self,
        path: &[&str],
        constant: bool,
    ) -> Result<EnvRef, MemberPathError> {
        let Some((head, rest)) = path.split_first() else {
            return Ok(self.clone());
        };
        if rest.is_empty() {
            if self.lookup(head).is_void() && constant {
                return Err(MemberPathError::MissingOnConstant {
                    segment: (*head).to_string(),
                });
            }
            return Ok(self.clone());
        }
        match self.lookup_binding(head) {
            None => self.autovivify(head, rest, constant),
            Some(binding) => match binding.value {
                Value::Void => self.autovivify(head, rest, constant),
                Value::Block(env) => env.resolve_member_path(rest, binding.constant),
                _ => Err(MemberPathError::NotABlock {
                    segment: (*head).to_string(),
                }),
            },
        }
    }

    /// Bind a fresh mutable block under `head` and continue resolution
    /// inside it, or refuse when the traversal context is constant.
    fn autovivify(
        &self,
        head: &str,
        rest: &[&str],
        constant: bool,
    ) -> Result<EnvRef, MemberPathError> {
        if constant {
            return Err(MemberPathError::MissingOnConstant {
                segment: head.to_string(),
            });
        }
        let block_env = self.extend();
        self.declare_or_assign(head, Value::block(block_env.clone()), false)
            .map_err(|EvalError::Redeclaration { name }| MemberPathError::Redeclaration { name })?;
        block_env.resolve_member_path(rest, false)
    }

    /// Nested record of every binding, for reporting only.
    ///
    /// Blocks expand recursively; functions and iterators become
    /// descriptive records; scalars carry their value and constancy.
    pub fn snapshot(&self) -> BindingsSnapshot {
        crate::snapshot::snapshot_environment(self)
    }

    pub(crate) fn for_each_binding(&self, mut f: impl FnMut(&str, &Binding)) {
        let env = self.0.borrow();
        for (name, binding) in &env.bindings {
            f(name, binding);
        }
    }
}

// Shallow: environments can reach themselves through block values.
impl fmt::Debug for EnvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = self.0.borrow();
        write!(
            f,
            "EnvRef(<{} bindings{}>)",
            env.bindings.len(),
            if env.parent.is_some() { ", has parent" } else { "" }
        )
    }
}
