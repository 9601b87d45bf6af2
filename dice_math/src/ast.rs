//! The tree produced by parsing an expression.
//!
//! The parser accepts more than the evaluator allows, so that disallowed
//! constructs are rejected explicitly during evaluation.

use std::fmt;

use crate::Number;

/// A tree representing a mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant.
    Number(Number),
    /// A binary operation.
    BinaryOp(Box<BinaryOpExpr>),
    /// A unary operation.
    UnaryOp(Box<UnaryOpExpr>),
    /// A function call.
    Call(Box<CallExpr>),
    /// A name that isn't called.
    Name(String),
    /// A quoted string, without the quotes.
    Str(String),
    /// An attribute access like `a.b`.
    Attribute(Box<AttributeExpr>),
}

impl Default for Expr {
    /// Returns the numeric value 0.
    fn default() -> Self {
        Self::Number(Number::default())
    }
}

/// Helper macro to deduplicate code between operator kinds.
macro_rules! define_op_kind {
    {
        $(#[$attr:meta])*
        enum $Op:ident {
            $($name:ident $sym:literal $(| $alt:literal)*,)*
        }
    } => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $Op {
            $($name,)*
        }

        impl $Op {
            /// Gets the operator's canonical symbol.
            #[must_use]
            pub const fn symbol(self) -> &'static str {
                match self {
                    $( Self::$name => $sym, )*
                }
            }

            /// Tries to get an operator from a token.
            #[must_use]
            pub fn from_symbol(s: &str) -> Option<Self> {
                match s {
                    $( $sym $(| $alt)* => Some(Self::$name), )*
                    _ => None,
                }
            }
        }
    };
}

define_op_kind! {
    /// A binary operator kind.
    enum BinaryOp {
        Add "+",
        Sub "-",
        Mul "*",
        Div "/",
        FloorDiv "//",
        Mod "%",
        Pow "**" | "^",
        MatMul "@",
        BitAnd "&",
        BitOr "|",
        LShift "<<",
        RShift ">>",
    }
}

impl BinaryOp {
    /// The priority for the operator.
    /// Relevant for order-of-operations.
    #[must_use]
    pub const fn priority(self) -> isize {
        match self {
            BinaryOp::BitOr => 1,
            BinaryOp::BitAnd => 2,
            BinaryOp::LShift | BinaryOp::RShift => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod | BinaryOp::MatMul => 5,
            BinaryOp::Pow => 6,
        }
    }
}

/// A binary operation expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpExpr {
    /// The operator to apply.
    pub kind: BinaryOp,
    /// The left-hand-side value.
    pub lhs: Expr,
    /// The right-hand-side value.
    pub rhs: Expr,
}

impl BinaryOpExpr {
    /// Wraps this value in an [`Expr`].
    #[must_use]
    pub fn expr(self) -> Expr {
        Expr::BinaryOp(Box::new(self))
    }
}

define_op_kind! {
    /// A unary operator kind.
    enum UnaryOp {
        Neg "-",
        Plus "+",
        Invert "~",
    }
}

/// A unary operation expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpExpr {
    /// The operator to apply.
    pub kind: UnaryOp,
    /// The value.
    pub operand: Expr,
}

impl UnaryOpExpr {
    /// Wraps this value in an [`Expr`].
    #[must_use]
    pub fn expr(self) -> Expr {
        Expr::UnaryOp(Box::new(self))
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// The called expression. Only a [`Expr::Name`] can be evaluated.
    pub function: Expr,
    /// The provided parameters.
    pub parameters: Vec<Expr>,
}

impl CallExpr {
    /// Wraps this value in an [`Expr`].
    #[must_use]
    pub fn expr(self) -> Expr {
        Expr::Call(Box::new(self))
    }
}

/// An attribute access expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeExpr {
    /// The accessed value.
    pub value: Expr,
    /// The attribute name.
    pub name: String,
}

impl AttributeExpr {
    /// Wraps this value in an [`Expr`].
    #[must_use]
    pub fn expr(self) -> Expr {
        Expr::Attribute(Box::new(self))
    }
}

/// Formats the expression with every binary operation parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(num) => write!(f, "{num}"),
            Self::BinaryOp(expr) => write!(f, "({} {} {})", expr.lhs, expr.kind.symbol(), expr.rhs),
            Self::UnaryOp(expr) => write!(f, "{}{}", expr.kind.symbol(), expr.operand),
            Self::Call(expr) => {
                write!(f, "{}(", expr.function)?;
                for (index, param) in expr.parameters.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }

                    write!(f, "{param}")?;
                }

                f.write_str(")")
            },
            Self::Name(name) => f.write_str(name),
            Self::Str(text) => write!(f, "'{text}'"),
            Self::Attribute(expr) => write!(f, "{}.{}", expr.value, expr.name),
        }
    }
}
