//! The operator and function allow-lists.
//!
//! Anything not listed here is rejected by the evaluator.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::Arity;
use crate::{MathError, Number, Result};

/// Implementation of a binary operator.
pub type BinaryFn = fn(Number, Number) -> Result<Number>;

/// Implementation of a unary operator.
pub type UnaryFn = fn(Number) -> Result<Number>;

/// The largest absolute value allowed for either operand of an exponentiation.
///
/// This is the only bound on the size of integers.
pub const POW_OPERAND_LIMIT: u32 = 10_000;

/// Gets the implementation of an allowed binary operator.
#[must_use]
pub fn binary_fn(op: BinaryOp) -> Option<BinaryFn> {
    let f: BinaryFn = match op {
        BinaryOp::Add => add,
        BinaryOp::Sub => sub,
        BinaryOp::Mul => mul,
        BinaryOp::Div => div,
        BinaryOp::FloorDiv => floor_div,
        BinaryOp::Mod => modulo,
        BinaryOp::Pow => limited_pow,
        BinaryOp::MatMul
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::LShift
        | BinaryOp::RShift => return None,
    };

    Some(f)
}

/// Gets the implementation of an allowed unary operator.
#[must_use]
pub fn unary_fn(op: UnaryOp) -> Option<UnaryFn> {
    let f: UnaryFn = match op {
        UnaryOp::Neg => neg,
        UnaryOp::Plus => pos,
        UnaryOp::Invert => return None,
    };

    Some(f)
}

/// Applies the exact integer operation if both operands are integers,
/// and the float operation otherwise.
fn int_or_float(
    lhs: &Number,
    rhs: &Number,
    int: fn(&BigInt, &BigInt) -> BigInt,
    float: fn(f64, f64) -> f64,
) -> Number {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => Number::Int(int(a, b)),
        _ => Number::Float(float(lhs.to_f64(), rhs.to_f64())),
    }
}

fn add(lhs: Number, rhs: Number) -> Result<Number> {
    Ok(int_or_float(&lhs, &rhs, |a, b| a + b, |a, b| a + b))
}

fn sub(lhs: Number, rhs: Number) -> Result<Number> {
    Ok(int_or_float(&lhs, &rhs, |a, b| a - b, |a, b| a - b))
}

fn mul(lhs: Number, rhs: Number) -> Result<Number> {
    Ok(int_or_float(&lhs, &rhs, |a, b| a * b, |a, b| a * b))
}

fn div(lhs: Number, rhs: Number) -> Result<Number> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    Ok(Number::Float(match (&lhs, &rhs) {
        (Number::Int(a), Number::Int(b)) => int_true_div(a, b),
        _ => lhs.to_f64() / rhs.to_f64(),
    }))
}

/// Divides integers that may be too large for a float on their own.
fn int_true_div(a: &BigInt, b: &BigInt) -> f64 {
    // more than a float's precision
    const KEPT_BITS: u64 = 64;

    let shift_a = a.bits().saturating_sub(KEPT_BITS);
    let shift_b = b.bits().saturating_sub(KEPT_BITS);

    let as_float = |i: BigInt| i.to_f64().unwrap_or(f64::NAN);
    let mantissa = as_float(a >> shift_a) / as_float(b >> shift_b);

    // beyond this, the result is infinite or zero either way
    let exponent = (i128::from(shift_a) - i128::from(shift_b)).clamp(-2200, 2200);
    let exponent = i32::try_from(exponent).unwrap_or_default();
    let half = exponent / 2;

    mantissa * 2f64.powi(half) * 2f64.powi(exponent - half)
}

/// Division rounding towards negative infinity.
fn floor_div(lhs: Number, rhs: Number) -> Result<Number> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    Ok(int_or_float(&lhs, &rhs, BigInt::div_floor, |a, b| (a / b).floor()))
}

/// Remainder with the sign of the divisor.
fn modulo(lhs: Number, rhs: Number) -> Result<Number> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    Ok(int_or_float(&lhs, &rhs, BigInt::mod_floor, float_mod))
}

fn float_mod(a: f64, b: f64) -> f64 {
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) { rem + b } else { rem }
}

fn exceeds_pow_limit(value: &Number) -> bool {
    match value {
        Number::Int(i) => i.abs() > BigInt::from(POW_OPERAND_LIMIT),
        Number::Float(f) => f.abs() > f64::from(POW_OPERAND_LIMIT),
    }
}

/// Exponentiation, refusing operands above [`POW_OPERAND_LIMIT`].
///
/// Integers raised to non-negative integers stay exact.
fn limited_pow(base: Number, exponent: Number) -> Result<Number> {
    if exceeds_pow_limit(&base) || exceeds_pow_limit(&exponent) {
        return Err(MathError::OperandTooLarge);
    }

    if base.is_zero() && exponent.to_f64() < 0.0 {
        return Err(MathError::DivisionByZero);
    }

    if let (Number::Int(b), Number::Int(e)) = (&base, &exponent) {
        if let Some(e) = e.to_u32() {
            return Ok(Number::Int(b.pow(e)));
        }
    }

    checked_float("pow", base.to_f64().powf(exponent.to_f64()))
}

fn neg(value: Number) -> Result<Number> {
    Ok(match value {
        Number::Int(i) => Number::Int(-i),
        Number::Float(f) => Number::Float(-f),
    })
}

fn pos(value: Number) -> Result<Number> {
    Ok(value)
}

/// Helper macro to define the function allow-list.
macro_rules! define_functions {
    {
        $(#[$attr:meta])*
        enum $Fn:ident {
            $($name:ident $lit:literal => $apply:expr,)*
        }
    } => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $Fn {
            $($name,)*
        }

        impl $Fn {
            /// All allowed functions.
            pub const ALL: &'static [Self] = &[$(Self::$name,)*];

            /// Gets the function's name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => $lit, )*
                }
            }

            /// Tries to get a function from its name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $lit => Some(Self::$name), )*
                    _ => None,
                }
            }

            /// Applies the function to already evaluated arguments.
            pub fn apply(self, args: Vec<Number>) -> Result<Number> {
                let apply: fn(Self, Vec<Number>) -> Result<Number> = match self {
                    $( Self::$name => $apply, )*
                };

                apply(self, args)
            }
        }
    };
}

define_functions! {
    /// A function that may be called.
    enum Function {
        Max "max" => |f, args| select(f, args, Ordering::Greater),
        Min "min" => |f, args| select(f, args, Ordering::Less),
        Abs "abs" => abs,
        Round "round" => round,
        Ceil "ceil" => |f, args| int_fn(f, args, f64::ceil),
        Floor "floor" => |f, args| int_fn(f, args, f64::floor),
        Sqrt "sqrt" => |f, args| float_fn(f, args, f64::sqrt),
        Log "log" => log,
        Log10 "log10" => |f, args| positive_float_fn(f, args, f64::log10),
        Log2 "log2" => |f, args| positive_float_fn(f, args, f64::log2),
        Sin "sin" => |f, args| float_fn(f, args, f64::sin),
        Cos "cos" => |f, args| float_fn(f, args, f64::cos),
        Tan "tan" => |f, args| float_fn(f, args, f64::tan),
        Asin "asin" => |f, args| float_fn(f, args, f64::asin),
        Acos "acos" => |f, args| float_fn(f, args, f64::acos),
        Atan "atan" => |f, args| float_fn(f, args, f64::atan),
        Atan2 "atan2" => |f, args| {
            let [y, x] = read_args::<2>(f, args)?;
            checked_float(f.name(), y.to_f64().atan2(x.to_f64()))
        },
        Degrees "degrees" => |f, args| float_fn(f, args, f64::to_degrees),
        Radians "radians" => |f, args| float_fn(f, args, f64::to_radians),
    }
}

/// Reads exactly `N` arguments.
fn read_args<const N: usize>(function: Function, args: Vec<Number>) -> Result<[Number; N]> {
    <[Number; N]>::try_from(args).map_err(|_| MathError::InvalidParameterCount {
        function: function.name(),
        expected: Arity::Exactly(N),
    })
}

/// Returns an error if a float result is NaN.
fn checked_float(function: &'static str, value: f64) -> Result<Number> {
    if value.is_nan() {
        Err(MathError::Domain(function))
    } else {
        Ok(Number::Float(value))
    }
}

/// Converts an integral float to an exact integer.
fn integral_to_number(function: Function, value: f64) -> Result<Number> {
    BigInt::from_f64(value)
        .map(Number::Int)
        .ok_or(MathError::Domain(function.name()))
}

/// Picks the argument that compares as `prefer` to all others, keeping the earliest on ties.
fn select(function: Function, args: Vec<Number>, prefer: Ordering) -> Result<Number> {
    let mut args = args.into_iter();
    let first = args.next().ok_or(MathError::InvalidParameterCount {
        function: function.name(),
        expected: Arity::AtLeast(1),
    })?;

    Ok(args.fold(first, |best, candidate| {
        if candidate.compare(&best) == Some(prefer) { candidate } else { best }
    }))
}

fn abs(function: Function, args: Vec<Number>) -> Result<Number> {
    let [value] = read_args::<1>(function, args)?;
    Ok(match value {
        Number::Int(i) => Number::Int(i.abs()),
        Number::Float(f) => Number::Float(f.abs()),
    })
}

/// Rounds half to even. With a digit count, the type of the value is kept.
fn round(function: Function, args: Vec<Number>) -> Result<Number> {
    match args.as_slice() {
        [Number::Int(i)] => Ok(Number::Int(i.clone())),
        [Number::Float(f)] => integral_to_number(function, f.round_ties_even()),
        [value, Number::Int(digits)] => Ok(round_digits(value, digits)),
        [_, Number::Float(_)] => Err(MathError::InvalidArgument {
            function: function.name(),
            reason: "the digit count must be an integer",
        }),
        _ => Err(MathError::InvalidParameterCount {
            function: function.name(),
            expected: Arity::Either(1, 2),
        }),
    }
}

fn round_digits(value: &Number, digits: &BigInt) -> Number {
    match value {
        Number::Int(i) if !digits.is_negative() => Number::Int(i.clone()),
        Number::Int(i) => round_int(i, digits.magnitude()),
        Number::Float(f) => {
            // past these bounds, the result is either unchanged or 0
            let digits = digits.clone()
                .clamp(BigInt::from(-400), BigInt::from(400))
                .to_i32()
                .unwrap_or_default();

            let factor = 10f64.powi(digits);
            let scaled = f * factor;

            if factor == 0.0 {
                Number::Float(0.0)
            } else if !scaled.is_finite() {
                Number::Float(*f)
            } else {
                Number::Float(scaled.round_ties_even() / factor)
            }
        },
    }
}

/// Rounds an integer to a multiple of `10^digits`, half to even.
fn round_int(value: &BigInt, digits: &BigUint) -> Number {
    // with more digits than bits, the value is below half of `10^digits`
    let Some(digits) = digits.to_u64()
        .filter(|&d| d <= value.bits())
        .and_then(|d| u32::try_from(d).ok())
    else {
        return Number::Int(BigInt::zero());
    };

    let scale = BigInt::from(10).pow(digits);
    let (quotient, remainder) = value.div_mod_floor(&scale);
    let twice = remainder * 2;
    let round_up = twice > scale || (twice == scale && quotient.is_odd());
    let quotient = if round_up { quotient + 1 } else { quotient };

    Number::Int(quotient * scale)
}

/// Applies a float function and converts the integral result back to an integer.
fn int_fn(function: Function, args: Vec<Number>, f: fn(f64) -> f64) -> Result<Number> {
    match read_args::<1>(function, args)? {
        [Number::Int(i)] => Ok(Number::Int(i)),
        [Number::Float(value)] => integral_to_number(function, f(value)),
    }
}

/// Applies a float function of one argument.
fn float_fn(function: Function, args: Vec<Number>, f: fn(f64) -> f64) -> Result<Number> {
    let [value] = read_args::<1>(function, args)?;
    checked_float(function.name(), f(value.to_f64()))
}

/// Applies a float function only defined for positive arguments.
fn positive_float_fn(function: Function, args: Vec<Number>, f: fn(f64) -> f64) -> Result<Number> {
    let [value] = read_args::<1>(function, args)?;
    let value = value.to_f64();
    if value <= 0.0 {
        return Err(MathError::Domain(function.name()));
    }

    checked_float(function.name(), f(value))
}

/// The natural logarithm, or the logarithm to a given base.
fn log(function: Function, args: Vec<Number>) -> Result<Number> {
    let (value, base) = match args.as_slice() {
        [value] => (value.to_f64(), None),
        [value, base] => (value.to_f64(), Some(base.to_f64())),
        _ => return Err(MathError::InvalidParameterCount {
            function: function.name(),
            expected: Arity::Either(1, 2),
        }),
    };

    if value <= 0.0 || base.is_some_and(|b| b <= 0.0) {
        return Err(MathError::Domain(function.name()));
    }

    match base {
        None => checked_float(function.name(), value.ln()),
        Some(base) if base == 1.0 => Err(MathError::DivisionByZero),
        Some(base) => checked_float(function.name(), value.ln() / base.ln()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn int(value: i64) -> Number {
        Number::from(value)
    }

    #[test]
    fn operator_table_is_restricted() {
        assert!(binary_fn(BinaryOp::Add).is_some());
        assert!(binary_fn(BinaryOp::Pow).is_some());
        assert!(binary_fn(BinaryOp::BitAnd).is_none());
        assert!(binary_fn(BinaryOp::MatMul).is_none());
        assert!(unary_fn(UnaryOp::Neg).is_some());
        assert!(unary_fn(UnaryOp::Invert).is_none());
    }

    #[test]
    fn function_names() {
        for &function in Function::ALL {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }

        assert_eq!(Function::ALL.len(), 19);
        assert_eq!(Function::from_name("open"), None);
        assert_eq!(Function::from_name("MAX"), None);
    }

    #[test]
    fn floor_div_and_mod_follow_divisor_sign() {
        assert_eq!(floor_div(int(7), int(2)), Ok(int(3)));
        assert_eq!(floor_div(int(-7), int(2)), Ok(int(-4)));
        assert_eq!(floor_div(int(7), int(-2)), Ok(int(-4)));
        assert_eq!(floor_div(int(i64::MIN), int(-1)), Ok(Number::Int(-BigInt::from(i64::MIN))));
        assert_eq!(modulo(int(-7), int(3)), Ok(int(2)));
        assert_eq!(modulo(int(7), int(-3)), Ok(int(-2)));
        assert!((float_mod(-7.5, 2.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn integers_stay_exact() {
        let result = mul(int(i64::MAX), int(2)).unwrap();
        assert_eq!(result, Number::Int(BigInt::from(i64::MAX) * 2));

        let result = limited_pow(int(10), int(30)).unwrap();
        assert_eq!(result.to_string(), format!("1{}", "0".repeat(30)));

        let result = add(int(i64::MAX), int(1)).unwrap();
        assert_eq!(result.to_string(), "9223372036854775808");

        assert_eq!(neg(int(i64::MIN)), Ok(Number::Int(-BigInt::from(i64::MIN))));
        assert_eq!(Function::Abs.apply(vec![int(i64::MIN)]), Ok(Number::Int(-BigInt::from(i64::MIN))));
    }

    #[test]
    fn true_division() {
        let two_pow = |e| Number::Int(BigInt::from(2).pow(e));

        assert_eq!(div(int(7), int(2)), Ok(Number::Float(3.5)));
        assert_eq!(div(int(-1), int(4)), Ok(Number::Float(-0.25)));
        assert_eq!(div(two_pow(10000), two_pow(9999)), Ok(Number::Float(2.0)));
        assert_eq!(div(int(1), two_pow(10000)), Ok(Number::Float(0.0)));
        assert_eq!(div(two_pow(10000), int(3)), Ok(Number::Float(f64::INFINITY)));
        assert_eq!(div(int(1), int(0)), Err(MathError::DivisionByZero));
    }

    #[test]
    fn pow_guard() {
        assert_eq!(limited_pow(int(20000), int(2)), Err(MathError::OperandTooLarge));
        assert_eq!(limited_pow(int(2), Number::Float(-10000.5)), Err(MathError::OperandTooLarge));
        assert_eq!(limited_pow(Number::Float(f64::INFINITY), int(1)), Err(MathError::OperandTooLarge));
        assert_eq!(limited_pow(int(10000), int(1)), Ok(int(10000)));
        assert_eq!(limited_pow(int(0), int(-1)), Err(MathError::DivisionByZero));
        assert_eq!(limited_pow(int(-8), Number::Float(0.5)), Err(MathError::Domain("pow")));
        assert_eq!(limited_pow(int(2), int(-1)), Ok(Number::Float(0.5)));

        let huge = limited_pow(int(10000), int(10000)).unwrap();
        assert_eq!(huge.to_string().len(), 40001);
    }

    #[test]
    fn min_max_compare_exactly() {
        let big = Number::Int(BigInt::from(2).pow(64));
        let bigger = Number::Int(BigInt::from(2).pow(64) + 1);

        assert_eq!(Function::Max.apply(vec![big.clone(), bigger.clone()]), Ok(bigger));
        assert_eq!(Function::Min.apply(vec![int(3), Number::Float(2.5), int(4)]), Ok(Number::Float(2.5)));
        assert_eq!(Function::Max.apply(vec![int(2), Number::Float(2.0)]), Ok(int(2)));
    }

    #[test]
    fn rounding() {
        let round = |args: Vec<Number>| Function::Round.apply(args);
        assert_eq!(round(vec![Number::Float(2.5)]), Ok(int(2)));
        assert_eq!(round(vec![Number::Float(3.5)]), Ok(int(4)));
        assert_eq!(round(vec![Number::Float(-0.5)]), Ok(int(0)));
        assert_eq!(round(vec![Number::Float(1e20)]), Ok(Number::Int(BigInt::from(10).pow(20))));
        assert_eq!(round(vec![int(1250), int(-2)]), Ok(int(1200)));
        assert_eq!(round(vec![int(1350), int(-2)]), Ok(int(1400)));
        assert_eq!(round(vec![int(-1250), int(-2)]), Ok(int(-1200)));
        assert_eq!(round(vec![int(7), int(-30)]), Ok(int(0)));
        assert_eq!(round(vec![Number::Float(1.2345), int(2)]), Ok(Number::Float(1.23)));
        assert_eq!(round(vec![Number::Float(123.4), int(-500)]), Ok(Number::Float(0.0)));
        assert_eq!(round(vec![Number::Float(f64::INFINITY)]), Err(MathError::Domain("round")));
        assert!(matches!(round(vec![int(1), Number::Float(1.0)]), Err(MathError::InvalidArgument { .. })));
        assert!(matches!(round(vec![]), Err(MathError::InvalidParameterCount { expected: Arity::Either(1, 2), .. })));
    }
}
