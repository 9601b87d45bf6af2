use std::str::FromStr;

use num_bigint::BigInt;

use crate::ast::*;
use crate::{MathError, Number, Result};

/// A singular expression token, as returned by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token's actual text.
    pub text: &'a str,
}

/// Checks whether an `Option<Token>` has the given text.
macro_rules! matches_token {
    ($e:expr, $p:pat) => {
        matches!($e, Some(Token { text: $p }))
    };
}

/// Type of a successful [`read_expr_with_terminator`].
#[derive(Debug)]
struct ExprSuccess<'a> {
    /// The expression.
    expr: Expr,
    /// The token after the expression that terminated it.
    terminator: Option<Token<'a>>,
}

/// Pair of an expression and the following binary operator.
struct ExprPair {
    value: Expr,
    operator: Option<BinaryOp>,
}

/// A peekable stream over the tokens that remembers the last consumed one.
struct Tokens<'a> {
    iter: std::iter::Peekable<std::vec::IntoIter<Token<'a>>>,
    most_recent: Option<Token<'a>>,
}

impl<'a> Tokens<'a> {
    /// Reads the next token, or [`None`] if exhausted.
    fn next(&mut self) -> Option<Token<'a>> {
        let value = self.iter.next();
        if value.is_some() {
            self.most_recent = value;
        }

        value
    }

    fn peek(&mut self) -> Option<Token<'a>> {
        self.iter.peek().copied()
    }

    /// Returns a [`MathError::ExprExpected`] matching the last token.
    fn expr_expected(&self) -> MathError {
        MathError::ExprExpected(self.most_recent.map(|t| t.text.to_owned()))
    }
}

/// Parses the text into an expression tree.
pub fn parse(text: &str) -> Result<Expr> {
    let mut tokens = Tokens {
        iter: tokenize(text)?.into_iter().peekable(),
        most_recent: None,
    };

    read_expr_with_terminator(&mut tokens, |t| t.is_none()).map(|e| e.expr)
}

/// Splits the text into tokens.
///
/// Whitespace separates tokens but is otherwise ignored.
fn tokenize(text: &str) -> Result<Vec<Token<'_>>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0usize;

    while start < bytes.len() {
        if bytes[start].is_ascii_whitespace() {
            start += 1;
            continue;
        }

        // every token ends on an ASCII character, so slicing stays on char boundaries
        let end = start + token_len(&text[start..])?;
        tokens.push(Token { text: &text[start..end] });
        start = end;
    }

    Ok(tokens)
}

/// Determines the byte length of the token at the start of `rest`.
fn token_len(rest: &str) -> Result<usize> {
    let bytes = rest.as_bytes();
    match bytes {
        [b'*', b'*', ..] | [b'/', b'/', ..] | [b'<', b'<', ..] | [b'>', b'>', ..] => Ok(2),
        [b'+' | b'-' | b'*' | b'/' | b'%' | b'^' | b'&' | b'|' | b'~' | b'@' | b'(' | b')' | b',', ..] => Ok(1),
        [b'0'..=b'9', ..] | [b'.', b'0'..=b'9', ..] => Ok(number_len(bytes)),
        [b'.', ..] => Ok(1),
        [b'a'..=b'z' | b'A'..=b'Z' | b'_', ..] => {
            let len = bytes.iter()
                .position(|c| !(c.is_ascii_alphanumeric() || *c == b'_'))
                .unwrap_or(bytes.len());

            let name = &rest[..len];
            if is_valid_name(name) {
                Ok(len)
            } else {
                Err(MathError::InvalidToken(name.to_owned()))
            }
        },
        [quote @ (b'\'' | b'"'), tail @ ..] => tail.iter()
            .position(|c| c == quote)
            .map(|p| p + 2)
            .ok_or(MathError::UnterminatedString),
        _ => {
            let invalid = rest.chars().next().map(String::from).unwrap_or_default();
            Err(MathError::InvalidToken(invalid))
        },
    }
}

/// Determines the length of a number token, including trailing letters so that
/// things like `2x` are reported as a whole.
fn number_len(bytes: &[u8]) -> usize {
    let mut len = 0usize;
    while let Some(&c) = bytes.get(len) {
        let is_exponent_sign = matches!(c, b'+' | b'-') && matches!(bytes[..len], [.., b'e' | b'E']);
        if !(c.is_ascii_alphanumeric() || c == b'_' || c == b'.' || is_exponent_sign) {
            break;
        }

        len += 1;
    }

    len
}

/// Names are letters or underscores, optionally followed by digits.
fn is_valid_name(name: &str) -> bool {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '_');
    rest.bytes().all(|c| c.is_ascii_digit())
}

/// Parses a number token. Integers are kept exact regardless of size.
fn parse_number(token: Token<'_>) -> Result<Number> {
    let invalid = || MathError::InvalidNumber(token.text.to_owned());

    if token.text.bytes().all(|c| c.is_ascii_digit()) {
        return BigInt::from_str(token.text)
            .map(Number::Int)
            .map_err(|_| invalid());
    }

    // `f64::from_str` also accepts things like `inf`, but those never reach here
    f64::from_str(token.text)
        .map(Number::Float)
        .map_err(|_| invalid())
}

/// Reads an expression. This will consume `tokens` until it matches `terminate_on`
/// in a top-level binary-operator position.
///
/// If no more tokens are available before it finds the terminator, returns an error.
fn read_expr_with_terminator<'a>(
    tokens: &mut Tokens<'a>,
    terminate_on: fn(Option<Token<'a>>) -> bool,
) -> Result<ExprSuccess<'a>> {
    let mut pairs = Vec::new();
    loop {
        // read sub expressions until out of tokens
        let value = read_unary(tokens)?;
        let token = tokens.next();

        // if this a terminator, finish the expression and return it
        if terminate_on(token) {
            let expr = if pairs.is_empty() {
                value
            } else {
                pairs.push(ExprPair { value, operator: None });
                merge_expr_pairs(pairs)
            };

            return Ok(ExprSuccess {
                expr,
                terminator: token,
            });
        }

        let Some(operator) = token else {
            // a non-terminating None means something wasn't closed
            return Err(MathError::UnexpectedEnd);
        };

        // expecting a binary operator here
        let operator = BinaryOp::from_symbol(operator.text)
            .ok_or_else(|| MathError::UnexpectedToken(operator.text.to_owned()))?;

        pairs.push(ExprPair {
            value,
            operator: Some(operator),
        });
    }
}

/// Reads a unary operation or a power, which binds tighter than a unary operator to its left.
fn read_unary(tokens: &mut Tokens<'_>) -> Result<Expr> {
    if let Some(kind) = tokens.peek().and_then(|t| UnaryOp::from_symbol(t.text)) {
        tokens.next();
        let operand = read_unary(tokens)?;
        return Ok(UnaryOpExpr { kind, operand }.expr());
    }

    let base = read_primary(tokens)?;
    if matches_token!(tokens.peek(), "**" | "^") {
        tokens.next();

        // right-associative: `2 ** 3 ** 2` is `2 ** (3 ** 2)`
        let exponent = read_unary(tokens)?;
        return Ok(BinaryOpExpr { kind: BinaryOp::Pow, lhs: base, rhs: exponent }.expr());
    }

    Ok(base)
}

/// Reads a "primary" expression, i.e. a literal, a name, or an expression within parenthesis,
/// followed by any amount of calls and attribute accesses.
///
/// If no more tokens are available, returns an error.
fn read_primary(tokens: &mut Tokens<'_>) -> Result<Expr> {
    let Some(token) = tokens.next() else {
        return Err(tokens.expr_expected());
    };

    let mut expr = match token.text.as_bytes() {
        // start of parenthesis around child-expression
        b"(" => read_expr_with_terminator(tokens, |t| matches_token!(t, ")"))?.expr,

        // anything starting with a digit or dot-digit is assumed to be a number
        [b'0'..=b'9', ..] | [b'.', b'0'..=b'9', ..] => Expr::Number(parse_number(token)?),

        [b'a'..=b'z' | b'A'..=b'Z' | b'_', ..] => Expr::Name(token.text.to_owned()),

        // the tokenizer guarantees the closing quote
        [b'\'' | b'"', ..] => Expr::Str(token.text[1..token.text.len() - 1].to_owned()),

        // operators and punctuation shouldn't show up here
        _ => return Err(MathError::ExprExpected(Some(token.text.to_owned()))),
    };

    loop {
        if matches_token!(tokens.peek(), "(") {
            tokens.next();
            let parameters = read_call_parameters(tokens)?;
            expr = CallExpr { function: expr, parameters }.expr();
        } else if matches_token!(tokens.peek(), ".") {
            tokens.next();
            let name = match tokens.next() {
                Some(t) if t.text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') => t.text.to_owned(),
                Some(t) => return Err(MathError::UnexpectedToken(t.text.to_owned())),
                None => return Err(MathError::UnexpectedEnd),
            };

            expr = AttributeExpr { value: expr, name }.expr();
        } else {
            return Ok(expr);
        }
    }
}

/// Reads the parameters for a function call.
/// The `(` has to already be consumed.
fn read_call_parameters(tokens: &mut Tokens<'_>) -> Result<Vec<Expr>> {
    let mut params = Vec::new();

    if matches_token!(tokens.peek(), ")") {
        // empty argument list. pop `)`
        tokens.next();
        return Ok(params);
    }

    // otherwise terminate when we hit a close in a terminator position
    loop {
        let res = read_expr_with_terminator(tokens, |t| matches_token!(t, ")" | ","))?;
        params.push(res.expr);
        if matches_token!(res.terminator, ")") {
            return Ok(params);
        }
    }
}

/// Merges a list of expression pairs into a singular expression.
///
/// Every operator in `pairs` is left-associative.
fn merge_expr_pairs(mut pairs: Vec<ExprPair>) -> Expr {
    while pairs.len() > 1 {
        // iterate over adjacent pairs (e.g. basically `pairs.windows(2)` but mutable).
        'merge_once: for index in 0..(pairs.len() - 1) {
            let [lhs, rhs, ..] = &mut pairs[index..] else { unreachable!() };

            // `None` is only set for the last element, which is never `lhs` here.
            // merge cells if the left-hand priority is greater or equal than the right
            // or if the right hand operator is None
            if let Some(kind) = lhs.operator {
                if rhs.operator.map_or(true, |r| kind.priority() >= r.priority()) {
                    use std::mem::take;
                    let lhs_value = take(&mut lhs.value);
                    let rhs_value = take(&mut rhs.value);

                    *lhs = ExprPair {
                        value: BinaryOpExpr {
                            kind,
                            lhs: lhs_value,
                            rhs: rhs_value,
                        }.expr(),
                        operator: rhs.operator,
                    };

                    // remove `rhs` from the list entirely
                    pairs.remove(index + 1);
                    break 'merge_once;
                }
            }
        }
    }

    pairs.pop().map(|p| p.value).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::MathErrorKind;

    macro_rules! parses_as {
        ($text:literal, $tree:literal) => {{
            let expr = parse($text).expect($text);
            assert_eq!(expr.to_string(), $tree, "parsing {:?}", $text);
        }};
    }

    macro_rules! fails_with {
        ($text:literal, $kind:ident) => {{
            let err = parse($text).expect_err($text);
            assert_eq!(err.kind(), MathErrorKind::$kind, "parsing {:?} gave {err:?}", $text);
        }};
    }

    #[test]
    fn precedence() {
        parses_as!("1 + 2 * 3", "(1 + (2 * 3))");
        parses_as!("1 - 2 - 3", "((1 - 2) - 3)");
        parses_as!("2 ** 3 ** 2", "(2 ** (3 ** 2))");
        parses_as!("2^3*2", "((2 ** 3) * 2)");
        parses_as!("-2**2", "-(2 ** 2)");
        parses_as!("2**-1", "(2 ** -1)");
        parses_as!("(1 + 2) * 3", "((1 + 2) * 3)");
        parses_as!("7 // 2 % 3", "((7 // 2) % 3)");
        parses_as!("1 | 2 & 3 << 4 + 5", "(1 | (2 & (3 << (4 + 5))))");
    }

    #[test]
    fn numbers() {
        parses_as!("42", "42");
        parses_as!("1.5", "1.5");
        parses_as!(".5", "0.5");
        parses_as!("2.", "2.0");
        parses_as!("1e3", "1000.0");
        parses_as!("1e-3", "0.001");
        parses_as!("99999999999999999999", "1e20");
    }

    #[test]
    fn calls_and_names() {
        parses_as!("max(1, 2, 3)", "max(1, 2, 3)");
        parses_as!("min()", "min()");
        parses_as!("log10(100)", "log10(100)");
        parses_as!("open('x')", "open('x')");
        parses_as!("os.system(\"ls\")", "os.system('ls')");
        parses_as!("f(1)(2)", "f(1)(2)");
        parses_as!("x", "x");
    }

    #[test]
    fn parse_errors() {
        fails_with!("", Parse);
        fails_with!("   ", Parse);
        fails_with!("d6d6", Parse);
        fails_with!("1 +", Parse);
        fails_with!("(1 + 2", Parse);
        fails_with!("1 + 2)", Parse);
        fails_with!("1 2", Parse);
        fails_with!("2x", Parse);
        fails_with!("1..2", Parse);
        fails_with!("max(1,)", Parse);
        fails_with!("'open", Parse);
        fails_with!("1 = 2", Parse);
        fails_with!("5 ÷ 2", Parse);
        fails_with!("a.1", Parse);
    }
}
