//! Unary operator implementations.

use skald_ir::UnaryOp;

use crate::operators::to_int32;
use crate::value::Value;

/// Evaluate a unary operation on an already-evaluated operand.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Result<Value, String> {
    match (op, operand) {
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
        // Bitwise not truncates through the 32-bit interpretation.
        (UnaryOp::BitNot, Value::Number(n)) => Ok(Value::Number(f64::from(!to_int32(*n)))),
        _ => Err(format!(
            "invalid operand for `{op}`: {}",
            operand.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logical_not_requires_boolean() {
        assert_eq!(
            evaluate_unary(UnaryOp::Not, &Value::Bool(true)),
            Ok(Value::Bool(false))
        );
        assert!(evaluate_unary(UnaryOp::Not, &Value::Number(1.0)).is_err());
    }

    #[test]
    fn negation_requires_number() {
        assert_eq!(
            evaluate_unary(UnaryOp::Neg, &Value::Number(2.5)),
            Ok(Value::Number(-2.5))
        );
        assert!(evaluate_unary(UnaryOp::Neg, &Value::string("x")).is_err());
    }

    #[test]
    fn bitwise_not_truncates() {
        assert_eq!(
            evaluate_unary(UnaryOp::BitNot, &Value::Number(0.0)),
            Ok(Value::Number(-1.0))
        );
        assert_eq!(
            evaluate_unary(UnaryOp::BitNot, &Value::Number(6.9)),
            Ok(Value::Number(-7.0))
        );
    }
}
