use crate::ast::*;
use crate::ops::{self, Function};
use crate::{MathError, Number, Result};

/// Evaluates an expression recursively.
///
/// Operators and called functions are checked against the allow-lists
/// before any of their operands are evaluated.
pub fn eval(expr: &Expr) -> Result<Number> {
    match expr {
        Expr::Number(num) => Ok(num.clone()),
        Expr::BinaryOp(expr) => {
            let apply = ops::binary_fn(expr.kind)
                .ok_or(MathError::UnsupportedOperator(expr.kind.symbol()))?;

            apply(eval(&expr.lhs)?, eval(&expr.rhs)?)
        },
        Expr::UnaryOp(expr) => {
            let apply = ops::unary_fn(expr.kind)
                .ok_or(MathError::UnsupportedOperator(expr.kind.symbol()))?;

            apply(eval(&expr.operand)?)
        },
        Expr::Call(expr) => eval_call(expr),
        Expr::Name(_) => Err(MathError::UnsupportedExpression("name")),
        Expr::Str(_) => Err(MathError::UnsupportedExpression("string")),
        Expr::Attribute(_) => Err(MathError::UnsupportedExpression("attribute")),
    }
}

fn eval_call(expr: &CallExpr) -> Result<Number> {
    let function = match &expr.function {
        Expr::Name(name) => Function::from_name(name),
        _ => None,
    };

    let function = function.ok_or_else(|| MathError::UnknownFunction(expr.function.to_string()))?;

    let args = expr.parameters.iter()
        .map(eval)
        .collect::<Result<Vec<_>>>()?;

    log::trace!("Calling `{}` with {} arguments", function.name(), args.len());
    function.apply(args)
}
