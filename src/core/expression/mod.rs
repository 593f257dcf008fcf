//! Arithmetic expression language for user-supplied formulas.
//!
//! Expressions are tokenized, parsed by recursive descent into an [`Expr`]
//! tree and evaluated against an explicit [`Namespace`]. Only arithmetic
//! operators and the whitelisted functions of the namespace are reachable, so
//! evaluating a formula can never run arbitrary code.

mod lexer;
mod namespace;
mod parser;

use smallvec::SmallVec;
use thiserror::Error;

pub use namespace::{Arity, Binding, MathFunction, Namespace};
pub use parser::{MAX_NESTING_DEPTH, parse};

use namespace::{PowZeroPolicy, power};

/// Failure while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("syntax error at offset {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("name `{0}` is not defined")]
    UndefinedName(String),

    #[error("`{0}` is not a function")]
    NotCallable(String),

    #[error("function `{0}` used as a value")]
    NotAValue(String),

    #[error("`{name}` takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: Arity,
        found: usize,
    },

    #[error("math domain error in `{operation}`")]
    Domain { operation: &'static str },

    #[error("numerical result out of range in `{operation}`")]
    Overflow { operation: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result {value} is not a finite number")]
    NonFinite { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates the tree, resolving every name through `namespace`.
    pub fn eval(&self, namespace: &Namespace) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Name(name) => match namespace.lookup(name) {
                Some(Binding::Constant(value)) => Ok(value),
                Some(Binding::Function(_)) => Err(EvalError::NotAValue(name.clone())),
                None => Err(EvalError::UndefinedName(name.clone())),
            },
            Self::Unary { op, operand } => {
                let value = operand.eval(namespace)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                })
            }
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.eval(namespace)?;
                let rhs = rhs.eval(namespace)?;
                apply_binary(*op, lhs, rhs)
            }
            Self::Call { name, args } => {
                let function = match namespace.lookup(name) {
                    Some(Binding::Function(function)) => function,
                    Some(Binding::Constant(_)) => return Err(EvalError::NotCallable(name.clone())),
                    None => return Err(EvalError::UndefinedName(name.clone())),
                };
                let expected = function.arity();
                if !expected.accepts(args.len()) {
                    return Err(EvalError::Arity {
                        name: name.clone(),
                        expected,
                        found: args.len(),
                    });
                }
                let values = args
                    .iter()
                    .map(|arg| arg.eval(namespace))
                    .collect::<Result<SmallVec<[f64; 4]>, _>>()?;
                function.apply(&values)
            }
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Sub => Ok(lhs - rhs),
        BinaryOp::Mul => Ok(lhs * rhs),
        BinaryOp::Div => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(lhs / rhs)
        }
        BinaryOp::FloorDiv => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok((lhs / rhs).floor())
        }
        BinaryOp::Mod => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            // Result takes the sign of the divisor.
            let remainder = lhs % rhs;
            if remainder != 0.0 && (remainder < 0.0) != (rhs < 0.0) {
                Ok(remainder + rhs)
            } else {
                Ok(remainder)
            }
        }
        BinaryOp::Pow => power(lhs, rhs, PowZeroPolicy::DivisionByZero),
    }
}

/// Parses and evaluates an expression without free variables.
///
/// Used for numeric configuration values such as `-pi/2`.
pub fn evaluate_constant(source: &str, namespace: &Namespace) -> Result<f64, EvalError> {
    let value = parse(source)?.eval(namespace)?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite { value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{EvalError, Namespace, evaluate_constant};

    fn eval(source: &str) -> Result<f64, EvalError> {
        evaluate_constant(source, &Namespace::math())
    }

    #[test]
    fn arithmetic_follows_operator_precedence() {
        assert_eq!(eval("1 + 2 * 3"), Ok(7.0));
        assert_eq!(eval("(1 + 2) * 3"), Ok(9.0));
        assert_eq!(eval("-2**2"), Ok(-4.0));
        assert_eq!(eval("2**-1"), Ok(0.5));
        assert_eq!(eval("2**3**2"), Ok(512.0));
    }

    #[test]
    fn floor_division_and_modulo_take_divisor_sign() {
        assert_eq!(eval("7 // 2"), Ok(3.0));
        assert_eq!(eval("-7 // 2"), Ok(-4.0));
        assert_eq!(eval("-7 % 3"), Ok(2.0));
        assert_eq!(eval("7 % -3"), Ok(-2.0));
    }

    #[test]
    fn zero_divisors_fail() {
        assert_eq!(eval("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1 % 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0**-1"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn names_resolve_through_namespace() {
        assert_eq!(eval("cos(0) + floor(pi)"), Ok(4.0));
        assert_eq!(eval("y"), Err(EvalError::UndefinedName("y".to_owned())));
        assert_eq!(eval("pi(1)"), Err(EvalError::NotCallable("pi".to_owned())));
        assert_eq!(eval("sin"), Err(EvalError::NotAValue("sin".to_owned())));
        assert!(matches!(eval("sin(1, 2)"), Err(EvalError::Arity { found: 2, .. })));
    }

    #[test]
    fn non_finite_constants_are_rejected() {
        assert!(matches!(eval("inf"), Err(EvalError::NonFinite { .. })));
        assert!(matches!(eval("(-8)**(1/3)"), Err(EvalError::Domain { .. })));
    }
}
