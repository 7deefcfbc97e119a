//! Expression evaluator
//!
//! Walks an AST left-to-right, depth-first, resolving variables through
//! a binding table and function calls through the registry. Arithmetic
//! is float-only; integral values widen at the variable and function
//! boundaries.

pub mod error;

pub use error::{EvaluationError, EvaluationResult};

use crate::ast::{BinaryOperator, ExpressionNode, LiteralValue};
use crate::model::Value;
use crate::registry::FunctionRegistry;
use rustc_hash::FxHashMap;

/// Maps variable names to the values they take in an expression
pub type Context = FxHashMap<String, Value>;

/// Evaluate a parsed expression against a binding table and a function
/// registry.
pub fn evaluate(
    expression: &ExpressionNode,
    context: &Context,
    functions: &FunctionRegistry,
) -> EvaluationResult<Value> {
    match expression {
        ExpressionNode::Literal(LiteralValue::Number(n)) => Ok(Value::Float(*n)),
        ExpressionNode::Literal(LiteralValue::String(s)) => Ok(Value::String(s.clone())),

        ExpressionNode::Identifier(name) => {
            let value = context
                .get(name)
                .ok_or_else(|| EvaluationError::UnknownVariable { name: name.clone() })?;
            Ok(value.clone().widen())
        }

        ExpressionNode::FunctionCall { name, args } => {
            let mut evaluated = Vec::with_capacity(args.len());
            for arg in args {
                evaluated.push(evaluate(arg, context, functions)?);
            }
            // Integral results widen at the call boundary.
            Ok(functions.call(name, &evaluated)?.widen())
        }

        ExpressionNode::BinaryOp { op, left, right } => {
            let left = evaluate(left, context, functions)?;
            let right = evaluate(right, context, functions)?;
            apply_operator(*op, left, right)
        }
    }
}

fn apply_operator(op: BinaryOperator, left: Value, right: Value) -> EvaluationResult<Value> {
    if left.is_string() || right.is_string() {
        if op == BinaryOperator::Add {
            return Ok(Value::String(format!("{left}{right}")));
        }
        return Err(EvaluationError::StringOperator { op: op.symbol() });
    }

    // Variable and call boundaries have already widened; an integer here
    // is a broken invariant, not a user error.
    let (Value::Float(l), Value::Float(r)) = (&left, &right) else {
        return Err(EvaluationError::UnwidenedInteger);
    };

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if *r == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            l / r
        }
        BinaryOperator::Power => l.powf(*r),
    };
    Ok(Value::Float(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn eval(input: &str, context: Context) -> EvaluationResult<Value> {
        let expression = parse_expression(input).unwrap();
        evaluate(&expression, &context, &FunctionRegistry::standard())
    }

    fn eval_bare(input: &str) -> EvaluationResult<Value> {
        eval(input, Context::default())
    }

    #[test]
    fn arithmetic_respects_precedence() {
        assert_eq!(eval_bare("1+2*3+4/2"), Ok(Value::Float(9.0)));
        assert_eq!(eval_bare("2*(3+1)"), Ok(Value::Float(8.0)));
        assert_eq!(eval_bare("(10 + 1) * 1000"), Ok(Value::Float(11000.0)));
        assert_eq!(eval_bare("2 ^ 10"), Ok(Value::Float(1024.0)));
        assert_eq!(eval_bare("2 * 2 ^ 3"), Ok(Value::Float(16.0)));
    }

    #[test]
    fn division_by_zero_is_always_an_error() {
        assert_eq!(eval_bare("100 / 0"), Err(EvaluationError::DivisionByZero));
        assert_eq!(
            eval_bare("100 / (1-1)"),
            Err(EvaluationError::DivisionByZero)
        );
    }

    #[test]
    fn variables_widen_to_float() {
        let context = Context::from_iter([("i".to_string(), Value::Integer(10))]);
        assert_eq!(eval("i", context.clone()), Ok(Value::Float(10.0)));
        assert_eq!(eval("i*2+3", context), Ok(Value::Float(23.0)));
    }

    #[test]
    fn string_variables_pass_through() {
        let context = Context::from_iter([("i".to_string(), Value::from("hello"))]);
        assert_eq!(eval("i", context), Ok(Value::from("hello")));
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let context = Context::from_iter([("i".to_string(), Value::Integer(10))]);
        assert_eq!(
            eval("j*2+3", context),
            Err(EvaluationError::UnknownVariable {
                name: "j".to_string()
            })
        );
    }

    #[test]
    fn string_literals() {
        assert_eq!(eval_bare("'hello world'"), Ok(Value::from("hello world")));
        assert_eq!(eval_bare("\"hello world\""), Ok(Value::from("hello world")));
        assert_eq!(eval_bare("''"), Ok(Value::from("")));
    }

    #[test]
    fn plus_concatenates_when_either_side_is_a_string() {
        assert_eq!(
            eval_bare("'The answer is ' + 41 + 1"),
            Ok(Value::from("The answer is 411"))
        );
        assert_eq!(
            eval_bare("'The answer is ' + (41+1)"),
            Ok(Value::from("The answer is 42"))
        );
        assert_eq!(eval_bare("1 + ' and counting'"), Ok(Value::from("1 and counting")));
    }

    #[test]
    fn non_additive_string_operators_are_errors() {
        assert_eq!(
            eval_bare("'a' * 2"),
            Err(EvaluationError::StringOperator { op: "*" })
        );
        assert_eq!(
            eval_bare("'a' - 'b'"),
            Err(EvaluationError::StringOperator { op: "-" })
        );
        assert_eq!(
            eval_bare("'a' ^ 2"),
            Err(EvaluationError::StringOperator { op: "^" })
        );
    }

    #[test]
    fn function_results_widen_at_the_call_boundary() {
        assert_eq!(eval_bare("to_int('7') * 2"), Ok(Value::Float(14.0)));
        assert_eq!(eval_bare("to_int('2000000000') / 100"), Ok(Value::Float(2.0e7)));
    }

    #[test]
    fn function_errors_propagate() {
        assert!(eval_bare("to_int('x')").is_err());
        assert!(eval_bare("never_registered(1)").is_err());
    }

    #[test]
    fn arguments_evaluate_before_the_call() {
        let context = Context::from_iter([("raw".to_string(), Value::from("41"))]);
        assert_eq!(eval("to_int(raw) + 1", context), Ok(Value::Float(42.0)));
    }
}
