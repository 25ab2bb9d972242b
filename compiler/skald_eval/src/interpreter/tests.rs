use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

/// Parse and evaluate a program against a fresh root environment.
///
/// Returns the evaluation result (the root block value on success) and
/// the interpreter, so tests can inspect diagnostics.
fn eval_source(source: &str) -> (EvalResult, Interpreter) {
    let outcome = skald_parse::parse(source);
    assert!(
        !outcome.tree.has_error(),
        "parse errors in {source:?}: {:?}",
        outcome.errors
    );
    let mut interpreter = Interpreter::new();
    let global = EnvRef::global();
    let result = interpreter.evaluate(outcome.tree.root(), &global);
    (result, interpreter)
}

/// Evaluate and return the root block's environment; panics on hard
/// errors or non-block results.
fn eval_env(source: &str) -> (EnvRef, Interpreter) {
    let (result, interpreter) = eval_source(source);
    match result {
        Ok(Value::Block(env)) => (env, interpreter),
        other => panic!("expected a block result for {source:?}, got {other:?}"),
    }
}

fn kinds(interpreter: &Interpreter) -> Vec<DiagnosticKind> {
    interpreter.diagnostics().iter().map(|d| d.kind).collect()
}

#[test]
fn arithmetic_on_floats() {
    let (env, interpreter) = eval_env("a = 1.5 + 2.25; b = 7 - 2; c = 3 * 4; d = 1 / 4;");
    assert_eq!(env.lookup("a"), Value::number(3.75));
    assert_eq!(env.lookup("b"), Value::number(5.0));
    assert_eq!(env.lookup("c"), Value::number(12.0));
    assert_eq!(env.lookup("d"), Value::number(0.25));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn division_by_zero_follows_float_semantics() {
    let (env, interpreter) = eval_env("inf = 1 / 0; nan = 0 / 0;");
    assert_eq!(env.lookup("inf"), Value::number(f64::INFINITY));
    assert!(matches!(env.lookup("nan"), Value::Number(n) if n.is_nan()));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn string_concatenation() {
    let (env, _) = eval_env(r#"s = "ab" + "cd";"#);
    assert_eq!(env.lookup("s"), Value::string("abcd"));
}

#[test]
fn mixed_addition_is_soft_type_mismatch() {
    let (env, interpreter) = eval_env(r#"x = 1 + "x"; y = 2;"#);
    assert_eq!(env.lookup("x"), Value::Void);
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::TypeMismatch]);
    // Evaluation continued with the next statement.
    assert_eq!(env.lookup("y"), Value::number(2.0));
}

#[test]
fn equality_is_total_across_kinds() {
    let (env, interpreter) = eval_env(r#"a = 5 == 5; b = 5 == "5"; c = 5 != "5";"#);
    assert_eq!(env.lookup("a"), Value::boolean(true));
    assert_eq!(env.lookup("b"), Value::boolean(false));
    assert_eq!(env.lookup("c"), Value::boolean(true));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn constant_rebinding_aborts_evaluation() {
    let (result, _) = eval_source("x = 1; x = 2;");
    assert_eq!(
        result,
        Err(EvalError::Redeclaration {
            name: "x".to_string()
        })
    );
}

#[test]
fn mutable_rebinding_updates_in_place() {
    let (env, interpreter) = eval_env("x : 1; x : 2;");
    assert_eq!(env.lookup("x"), Value::number(2.0));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn constant_guard_applies_across_scopes() {
    // The constant is declared at the top level; the inner block's
    // assignment resolves to it and must abort.
    let (result, _) = eval_source("x = 1; b = { x : 2; };");
    assert!(result.is_err());
}

#[test]
fn block_scoping_and_snapshot_shape() {
    let (env, _) = eval_env("b = { a = 1; c = 2; };");
    let Value::Block(inner) = env.lookup("b") else {
        panic!("expected `b` to be a block");
    };
    assert_eq!(
        serde_json::to_value(inner.snapshot()).expect("snapshot serializes"),
        json!({
            "a": { "value": 1.0, "constant": true },
            "c": { "value": 2.0, "constant": true },
        })
    );
    // Inner bindings are not visible in the enclosing scope.
    assert_eq!(env.lookup("a"), Value::Void);
    assert_eq!(env.lookup("c"), Value::Void);
}

#[test]
fn block_statements_run_in_sequence_into_the_block_scope() {
    let (env, _) = eval_env("b = { x : 1; y = x + 1; };");
    let Value::Block(inner) = env.lookup("b") else {
        panic!("expected `b` to be a block");
    };
    assert_eq!(inner.lookup_local("y"), Value::number(2.0));
}

#[test]
fn member_read_is_non_recursive() {
    let (env, interpreter) = eval_env("outer = 1; o.x : 2; v = o.outer;");
    // `o.outer` consults only `o`'s own table, so this is void even
    // though `outer` is visible up the chain.
    assert_eq!(env.lookup("v"), Value::Void);
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn member_read_of_existing_member() {
    let (env, _) = eval_env("o.x : 2; v = o.x;");
    assert_eq!(env.lookup("v"), Value::number(2.0));
}

#[test]
fn member_read_on_non_block_is_soft_type_mismatch() {
    let (env, interpreter) = eval_env("n = 1; v = n.x;");
    assert_eq!(env.lookup("v"), Value::Void);
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::TypeMismatch]);
}

#[test]
fn member_path_autovivification_mutable() {
    let (env, interpreter) = eval_env("shape.x : 5;");
    let Value::Block(shape) = env.lookup("shape") else {
        panic!("expected `shape` to be autovivified as a block");
    };
    assert_eq!(shape.lookup_local("x"), Value::number(5.0));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn member_path_through_unbound_name_fails_softly_when_constant() {
    let (env, interpreter) = eval_env("shape.x = 5; after = 1;");
    assert_eq!(env.lookup("shape"), Value::Void);
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::UnresolvedMember]);
    // Evaluation continued.
    assert_eq!(env.lookup("after"), Value::number(1.0));
}

#[test]
fn member_path_through_constant_block_fails_softly() {
    let (env, interpreter) = eval_env("shape = { y = 1; }; shape.x : 5;");
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::UnresolvedMember]);
    // Bindings unchanged: no `x` appeared.
    let Value::Block(shape) = env.lookup("shape") else {
        panic!("expected `shape` to be a block");
    };
    assert_eq!(shape.lookup_local("x"), Value::Void);
    assert_eq!(shape.lookup_local("y"), Value::number(1.0));
}

#[test]
fn nullish_coalescing() {
    let (env, _) = eval_env("a = missing ?? 7; b = false ?? 7; c = 0 ?? 7;");
    assert_eq!(env.lookup("a"), Value::number(7.0));
    assert_eq!(env.lookup("b"), Value::number(7.0));
    // Zero is not treated as falsy.
    assert_eq!(env.lookup("c"), Value::number(0.0));
}

#[test]
fn logical_operators_are_eager() {
    // Both operands run: `a` ends at 2 even though the result is a
    // type mismatch (assignments evaluate to the assigned number).
    let (env, interpreter) = eval_env("a : 0; r = (a : 1) && (a : 2);");
    assert_eq!(env.lookup("a"), Value::number(2.0));
    assert_eq!(env.lookup("r"), Value::Void);
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::TypeMismatch]);
}

#[test]
fn logical_operators_on_booleans() {
    let (env, _) = eval_env("a = true && false; b = true || false;");
    assert_eq!(env.lookup("a"), Value::boolean(false));
    assert_eq!(env.lookup("b"), Value::boolean(true));
}

#[test]
fn unary_operators() {
    let (env, interpreter) = eval_env("a = -3; b = !false; c = ~0; d = !1;");
    assert_eq!(env.lookup("a"), Value::number(-3.0));
    assert_eq!(env.lookup("b"), Value::boolean(true));
    assert_eq!(env.lookup("c"), Value::number(-1.0));
    assert_eq!(env.lookup("d"), Value::Void);
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::TypeMismatch]);
}

#[test]
fn shift_and_bitwise_operators() {
    let (env, _) = eval_env("a = 1 << 4; b = -8 >> 1; c = -1 >>> 28; d = 6 & 3; e = 6 ^ 3; f = 6 | 1;");
    assert_eq!(env.lookup("a"), Value::number(16.0));
    assert_eq!(env.lookup("b"), Value::number(-4.0));
    assert_eq!(env.lookup("c"), Value::number(15.0));
    assert_eq!(env.lookup("d"), Value::number(2.0));
    assert_eq!(env.lookup("e"), Value::number(5.0));
    assert_eq!(env.lookup("f"), Value::number(7.0));
}

#[test]
fn comparison_operators() {
    let (env, _) = eval_env(r#"a = 1 < 2; b = 2 <= 2; c = 3 >= 4; d = "a" < "b";"#);
    assert_eq!(env.lookup("a"), Value::boolean(true));
    assert_eq!(env.lookup("b"), Value::boolean(true));
    assert_eq!(env.lookup("c"), Value::boolean(false));
    assert_eq!(env.lookup("d"), Value::boolean(true));
}

#[test]
fn end_to_end_final_bindings() {
    let (env, interpreter) = eval_env("x = 3; y = 4; z = x + y;");
    assert_eq!(
        serde_json::to_value(env.snapshot()).expect("snapshot serializes"),
        json!({
            "x": { "value": 3.0, "constant": true },
            "y": { "value": 4.0, "constant": true },
            "z": { "value": 7.0, "constant": true },
        })
    );
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn comments_and_empty_statements_are_inert() {
    let (env, interpreter) = eval_env("// leading\nx = 1; ; // trailing\n");
    assert_eq!(env.lookup("x"), Value::number(1.0));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn assignment_to_literal_lhs_is_void() {
    let (env, interpreter) = eval_env("1 = 2; x = 3;");
    assert_eq!(env.lookup("x"), Value::number(3.0));
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn boolean_literals() {
    let (env, _) = eval_env("t = true; f = false;");
    assert_eq!(env.lookup("t"), Value::boolean(true));
    assert_eq!(env.lookup("f"), Value::boolean(false));
}

#[test]
fn identifier_lookup_of_unbound_name_is_void() {
    let (env, interpreter) = eval_env("x = missing;");
    assert_eq!(env.lookup("x"), Value::Void);
    assert!(interpreter.diagnostics().is_empty());
}

#[test]
fn unhandled_node_kind_is_soft() {
    let outcome = skald_parse::parse("x = 1;");
    let stmt = outcome.tree.root().children()[0].clone();
    let assignment = stmt.children()[0].clone();
    // The operator leaf is not an evaluatable node kind.
    let op = assignment.children()[1].clone();
    let mut interpreter = Interpreter::new();
    let global = EnvRef::global();
    let result = interpreter.evaluate(&op, &global);
    assert_eq!(result, Ok(Value::Void));
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::UnhandledNodeKind]);
}

#[test]
fn bad_number_literal_is_soft_parse_diagnostic() {
    use std::rc::Rc;
    let node = skald_ir::SyntaxNode::leaf(
        skald_ir::NodeKind::Number,
        skald_ir::Span::from_range(0..3),
        Rc::from("abc"),
    );
    let mut interpreter = Interpreter::new();
    let global = EnvRef::global();
    let result = interpreter.evaluate(&node, &global);
    assert_eq!(result, Ok(Value::Void));
    assert_eq!(kinds(&interpreter), vec![DiagnosticKind::LiteralParse]);
}

#[test]
fn nested_blocks_see_enclosing_scope() {
    let (env, _) = eval_env("x = 10; b = { y = x + 1; };");
    let Value::Block(inner) = env.lookup("b") else {
        panic!("expected `b` to be a block");
    };
    assert_eq!(inner.lookup_local("y"), Value::number(11.0));
}

#[test]
fn chained_member_assignment_autovivifies_each_level() {
    let (env, interpreter) = eval_env("a.b.c : 9;");
    let Value::Block(a) = env.lookup("a") else {
        panic!("expected `a` to be a block");
    };
    let Value::Block(b) = a.lookup_local("b") else {
        panic!("expected `a.b` to be a block");
    };
    assert_eq!(b.lookup_local("c"), Value::number(9.0));
    assert!(interpreter.diagnostics().is_empty());
}
