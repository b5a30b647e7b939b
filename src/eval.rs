//! Floating point evaluation of calculator input lines.

use crate::error::{Error, ErrorRepr};
use peg::parser;
use std::fmt;

/// Raised while evaluating a division whose divisor is zero (of either sign).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DivideByZero;

type Eval = Result<f64, DivideByZero>;

parser! {
/// Standard precedence over `f64`: `+ -` below `* /` below unary signs.
/// Division by zero is carried through the result rather than failing the parse,
/// so a syntax error is only ever reported for malformed input.
grammar arith() for str {
    pub rule line() -> Eval
        = _ v:sum() _ { v }

    rule sum() -> Eval = precedence! {
        x:(@) _ "+" _ y:@ { apply(x, y, |a, b| Ok(a + b)) }
        x:(@) _ "-" _ y:@ { apply(x, y, |a, b| Ok(a - b)) }
        --
        x:(@) _ "*" _ y:@ { apply(x, y, |a, b| Ok(a * b)) }
        x:(@) _ "/" _ y:@ { apply(x, y, divide) }
        --
        "+" _ x:@ { x }
        "-" _ x:@ { x.map(|a| -a) }
        --
        n:number() { Ok(n) }
        "(" _ e:sum() _ ")" { e }
    }

    rule number() -> f64
        = n:$(mantissa() exponent()?) {? n.parse().or(Err("number")) }

    rule mantissa()
        = digits() ("." digits()?)?
        / "." digits()

    rule exponent()
        = ['e' | 'E'] ['+' | '-']? digits()

    rule digits()
        = ['0'..='9']+

    rule _ = [' ' | '\t']*
}}

fn apply(x: Eval, y: Eval, op: impl FnOnce(f64, f64) -> Eval) -> Eval {
    op(x?, y?)
}

fn divide(a: f64, b: f64) -> Eval {
    if b == 0.0 {
        Err(DivideByZero)
    } else {
        Ok(a / b)
    }
}

/// What the oracle expects the calculator to answer for one input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    DivisionByZero,
}

/// Renders the transcript line for this outcome, e.g. `> = 11` or `> ! Division by 0.`.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}{}", crate::RESULT_PREFIX, format_value(*v)),
            Self::DivisionByZero => f.write_str(crate::DIVISION_BY_ZERO),
        }
    }
}

/// Evaluates one line of calculator input.
///
/// Division by zero is an [`Outcome`], not an error. Any other problem, i.e. input that
/// is not an expression of numbers, `+ - * /` and parentheses, is an error.
///
/// ```
/// use pcalc_autogen::{evaluate, Outcome};
///
/// assert_eq!(evaluate("3+4*2").unwrap(), Outcome::Value(11.0));
/// assert_eq!(evaluate("5/0").unwrap(), Outcome::DivisionByZero);
/// assert!(evaluate("5/").is_err());
/// ```
pub fn evaluate(expr: &str) -> Result<Outcome, Error> {
    evaluate_line(1, expr)
}

pub(crate) fn evaluate_line(line: usize, expr: &str) -> Result<Outcome, Error> {
    let trimmed = expr.trim_end_matches(['\n', '\r']);
    match arith::line(trimmed) {
        Ok(Ok(v)) => Ok(Outcome::Value(v)),
        Ok(Err(DivideByZero)) => Ok(Outcome::DivisionByZero),
        Err(err) => Err(Error(ErrorRepr::Syntax {
            line,
            expr: trimmed.to_string(),
            err,
        })),
    }
}

/// Formats a value the way it appears after `> = `.
///
/// Integral values below 1e16 in magnitude are written without a fraction (`11`),
/// other finite values use the shortest representation that reads back to the same
/// `f64`, and non-finite values are `inf`, `-inf` or `nan`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        return itoa::Buffer::new().format(v as i64).to_string();
    }
    ryu::Buffer::new().format_finite(v).to_string()
}
