use std::fmt;

/// The kinds of errors that may occur when evaluating a mathematical expression.
///
/// Messages may contain parts of the input verbatim.
/// They are not escaped for any particular output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A sub-expression was expected but not found.
    /// Holds the last token before the error.
    ExprExpected(Option<String>),

    /// The input ended while a parenthesis or call was still open.
    UnexpectedEnd,

    /// Found a token in a binary operator position that isn't an operator.
    /// Holds the token in question.
    UnexpectedToken(String),

    /// Found text that doesn't form any valid token.
    InvalidToken(String),

    /// Found a token that seemed to be a number but couldn't be parsed as one.
    InvalidNumber(String),

    /// A quoted string wasn't closed.
    UnterminatedString,

    /// The operator exists in the grammar but isn't allowed.
    UnsupportedOperator(&'static str),

    /// Encountered a call to something that isn't an allowed function name.
    UnknownFunction(String),

    /// The expression node can never be evaluated, f.e. a bare name or a string.
    UnsupportedExpression(&'static str),

    /// The parameter count for a function was incorrect.
    InvalidParameterCount { function: &'static str, expected: Arity },

    /// A parameter had the wrong type.
    InvalidArgument { function: &'static str, reason: &'static str },

    /// The function isn't defined for the given input.
    Domain(&'static str),

    /// An exponentiation operand exceeded the allowed magnitude.
    OperandTooLarge,

    /// Division or modulo by zero.
    DivisionByZero,

    /// The expression rolls more dice than allowed.
    TooManyDice { limit: u32 },
}

/// Coarse classification of a [`MathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// The input isn't syntactically valid.
    Parse,
    /// An operator outside the allow-list.
    UnsupportedOperator,
    /// A call to a function outside the allow-list or to a non-name.
    UnknownFunction,
    /// An expression node that's never evaluated.
    UnsupportedExpression,
    /// Function arguments that don't fit the function.
    Argument,
    /// The exponentiation guard was hit.
    OperandTooLarge,
    /// Division or modulo by zero.
    DivisionByZero,
    /// Too many dice in one expression.
    DiceLimit,
}

/// The amount of parameters a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Either(usize, usize),
    AtLeast(usize),
}

impl MathError {
    /// Gets the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> MathErrorKind {
        match self {
            Self::ExprExpected(_)
            | Self::UnexpectedEnd
            | Self::UnexpectedToken(_)
            | Self::InvalidToken(_)
            | Self::InvalidNumber(_)
            | Self::UnterminatedString => MathErrorKind::Parse,
            Self::UnsupportedOperator(_) => MathErrorKind::UnsupportedOperator,
            Self::UnknownFunction(_) => MathErrorKind::UnknownFunction,
            Self::UnsupportedExpression(_) => MathErrorKind::UnsupportedExpression,
            Self::InvalidParameterCount { .. }
            | Self::InvalidArgument { .. }
            | Self::Domain(_) => MathErrorKind::Argument,
            Self::OperandTooLarge => MathErrorKind::OperandTooLarge,
            Self::DivisionByZero => MathErrorKind::DivisionByZero,
            Self::TooManyDice { .. } => MathErrorKind::DiceLimit,
        }
    }
}

impl std::error::Error for MathError {}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExprExpected(Some(at)) => write!(f, "expected expression at `{at}`"),
            Self::ExprExpected(None) => f.write_str("unexpected empty expression"),
            Self::UnexpectedEnd => f.write_str("unexpected end of expression, missing `)`"),
            Self::UnexpectedToken(token) => write!(f, "`{token}` is not a binary operator"),
            Self::InvalidToken(token) => write!(f, "`{token}` is not a valid token"),
            Self::InvalidNumber(num) => write!(f, "`{num}` is not a valid number"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::UnsupportedOperator(op) => write!(f, "the operator `{op}` is not supported"),
            Self::UnknownFunction(function) => write!(f, "the function `{function}` is unknown"),
            Self::UnsupportedExpression(kind) => write!(f, "a {kind} cannot be evaluated"),
            Self::InvalidParameterCount { function, expected: Arity::Exactly(1) } => write!(f, "the function `{function}` takes 1 parameter"),
            Self::InvalidParameterCount { function, expected } => write!(f, "the function `{function}` takes {expected} parameters"),
            Self::InvalidArgument { function, reason } => write!(f, "invalid argument for `{function}`: {reason}"),
            Self::Domain(function) => write!(f, "math domain error in `{function}`"),
            Self::OperandTooLarge => f.write_str("too large for exponentiation"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::TooManyDice { limit } => write!(f, "cannot roll more than {limit} dice at once"),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::Either(a, b) => write!(f, "{a} or {b}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}
