//! Serializable record of an environment's bindings.
//!
//! Used only for external reporting, never for evaluation. Keys are
//! sorted (`BTreeMap`) so output is deterministic.

use std::collections::BTreeMap;

use serde::Serialize;
use skald_ir::SyntaxNode;

use crate::environment::{Binding, EnvRef};
use crate::value::Value;

/// All bindings of one environment, keyed by name.
pub type BindingsSnapshot = BTreeMap<String, BindingSnapshot>;

/// One binding in a snapshot.
///
/// Serialization is untagged: scopes render as nested objects, scalar
/// and callable bindings as flat records, matching the shape consumers
/// display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindingSnapshot {
    /// A block value: its environment, expanded recursively.
    Scope(BindingsSnapshot),
    /// A function value, descriptively: parameter texts and a
    /// whitespace-collapsed body.
    Function {
        params: Vec<String>,
        body: String,
        constant: bool,
    },
    /// An iterator value, descriptively.
    Iterator {
        params: Vec<String>,
        cursor: usize,
        constant: bool,
    },
    /// Any scalar kind.
    Scalar {
        value: ScalarSnapshot,
        constant: bool,
    },
}

/// Scalar payload in a snapshot.
///
/// Untagged, so void renders as `null` and the rest as bare JSON values.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarSnapshot {
    Void,
    Number(f64),
    Str(String),
    Bool(bool),
}

pub(crate) fn snapshot_environment(env: &EnvRef) -> BindingsSnapshot {
    let mut out = BindingsSnapshot::new();
    env.for_each_binding(|name, binding| {
        out.insert(name.to_string(), snapshot_binding(binding));
    });
    out
}

fn snapshot_binding(binding: &Binding) -> BindingSnapshot {
    match &binding.value {
        Value::Block(env) => BindingSnapshot::Scope(snapshot_environment(env)),
        Value::Function(func) => BindingSnapshot::Function {
            params: param_texts(&func.params),
            body: collapse_whitespace(func.body.text()),
            constant: binding.constant,
        },
        Value::Iterator(iter) => BindingSnapshot::Iterator {
            params: param_texts(&iter.params),
            cursor: iter.state.borrow().cursor,
            constant: binding.constant,
        },
        Value::Void => BindingSnapshot::Scalar {
            value: ScalarSnapshot::Void,
            constant: binding.constant,
        },
        Value::Number(n) => BindingSnapshot::Scalar {
            value: ScalarSnapshot::Number(*n),
            constant: binding.constant,
        },
        Value::Str(s) => BindingSnapshot::Scalar {
            value: ScalarSnapshot::Str(s.clone()),
            constant: binding.constant,
        },
        Value::Bool(b) => BindingSnapshot::Scalar {
            value: ScalarSnapshot::Bool(*b),
            constant: binding.constant,
        },
    }
}

fn param_texts(params: &[SyntaxNode]) -> Vec<String> {
    params.iter().map(|p| p.text().trim().to_string()).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
