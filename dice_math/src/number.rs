use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

/// A numeric value produced by evaluation.
///
/// Integers are arbitrarily large and integer operations stay integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    /// Converts the value to a float.
    ///
    /// Integers beyond the float range become infinite.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int(i) => i.to_f64().unwrap_or(match i.sign() {
                Sign::Minus => f64::NEG_INFINITY,
                _ => f64::INFINITY,
            }),
            Self::Float(f) => *f,
        }
    }

    /// Whether this is an integer or float zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(i) => i.is_zero(),
            Self::Float(f) => *f == 0.0,
        }
    }

    /// Compares two values numerically.
    ///
    /// Two integers are compared exactly. Returns [`None`] if either is NaN.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl Default for Number {
    /// Returns the integer 0.
    fn default() -> Self {
        Self::Int(BigInt::zero())
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(BigInt::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SCIENTIFIC_ABOVE: f64 = 1e16;
        const SCIENTIFIC_BELOW: f64 = 1e-4;

        let x = match self {
            Self::Int(i) => return write!(f, "{i}"),
            Self::Float(x) => *x,
        };

        // keep a trailing `.0` so floats stay recognizable
        if x.is_finite() && x.fract() == 0.0 && x.abs() < SCIENTIFIC_ABOVE {
            write!(f, "{x:.1}")
        } else if x.is_finite() && x != 0.0 && !(SCIENTIFIC_BELOW..SCIENTIFIC_ABOVE).contains(&x.abs()) {
            write!(f, "{x:e}")
        } else {
            write!(f, "{x}")
        }
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use num_bigint::BigInt;

    use super::Number;

    #[test]
    fn display() {
        assert_eq!(Number::from(-42).to_string(), "-42");
        assert_eq!(Number::Float(4.0).to_string(), "4.0");
        assert_eq!(Number::Float(0.5).to_string(), "0.5");
        assert_eq!(Number::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Number::Float(1e20).to_string(), "1e20");
        assert_eq!(Number::Float(0.00001).to_string(), "1e-5");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Number::Int(BigInt::from(10).pow(30)).to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn huge_ints_as_floats() {
        let huge = BigInt::from(2).pow(2000);
        assert_eq!(Number::Int(huge.clone()).to_f64(), f64::INFINITY);
        assert_eq!(Number::Int(-huge).to_f64(), f64::NEG_INFINITY);
        assert_eq!(Number::from(1_i64 << 40).to_f64(), 1_099_511_627_776.0);
    }

    #[test]
    fn comparisons() {
        let big = Number::Int(BigInt::from(2).pow(64));
        let bigger = Number::Int(BigInt::from(2).pow(64) + 1);

        assert_eq!(big.compare(&bigger), Some(Ordering::Less));
        assert_eq!(Number::from(2).compare(&Number::Float(1.5)), Some(Ordering::Greater));
        assert_eq!(Number::from(2).compare(&Number::Float(2.0)), Some(Ordering::Equal));
        assert_eq!(Number::Float(f64::NAN).compare(&Number::from(1)), None);
    }
}
