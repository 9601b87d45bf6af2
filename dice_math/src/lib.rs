//! Evaluation of restricted mathematical expressions with dice notation.
//!
//! Text is first scanned for dice notation like `2d6`, which is replaced by the
//! rolled values. The result is then parsed and evaluated, only allowing a fixed
//! set of operators and functions. Anything else, such as names, strings, or
//! calls to unknown functions, is rejected with a [`MathError`].
//!
//! ```
//! use dice_math::{eval_text, Number};
//!
//! assert_eq!(eval_text("2 ** (3 + 1)"), Ok(Number::from(16)));
//! assert!(eval_text("open('x')").is_err());
//! ```

pub mod ast;
pub mod dice;
mod error;
mod eval;
mod number;
pub mod ops;
mod parse;

pub use dice::{DieSource, RngDice};
pub use num_bigint::BigInt;
pub use error::{Arity, MathError, MathErrorKind};
pub use number::Number;

/// Result type with [`MathError`] as the default error.
pub type Result<T, E = MathError> = std::result::Result<T, E>;

/// Parses text into an expression tree without evaluating it.
pub fn parse(text: &str) -> Result<ast::Expr> {
    parse::parse(text)
}

/// Evaluates an already parsed expression.
pub fn eval(expr: &ast::Expr) -> Result<Number> {
    eval::eval(expr)
}

/// Parses and evaluates text that contains no dice notation.
pub fn eval_text(text: &str) -> Result<Number> {
    eval(&parse(text)?)
}

/// The result of [`eval_dice_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The text after rolling the dice.
    /// [`None`] if the input had no dice notation.
    pub resolved: Option<String>,
    /// The resulting value.
    pub value: Number,
}

/// Rolls the dice within some text and then evaluates it.
///
/// At most `max_dice` dice are rolled in total.
pub fn eval_dice_text(text: &str, source: impl DieSource, max_dice: u32) -> Result<Evaluation> {
    let resolved = dice::resolve_dice(text, source, max_dice)?;
    let value = eval_text(&resolved.text)?;

    Ok(Evaluation {
        resolved: resolved.has_dice.then_some(resolved.text),
        value,
    })
}
