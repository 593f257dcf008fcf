use std::f64::consts::{E, PI, TAU};
use std::fmt;

use indexmap::IndexMap;

use super::EvalError;

/// Accepted argument counts for a namespace function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::Between(min, max) => (min..=max).contains(&count),
            Self::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{n}"),
            Self::Between(min, max) => write!(f, "{min} to {max}"),
            Self::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// Whitelisted numeric functions available to expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Expm1,
    Log,
    Log10,
    Log2,
    Log1p,
    Sqrt,
    Pow,
    Fabs,
    Floor,
    Ceil,
    Trunc,
    Hypot,
    Degrees,
    Radians,
    Fmod,
    Copysign,
    Min,
    Max,
    Round,
    Gamma,
    Lgamma,
    Erf,
    Erfc,
    Cbrt,
    Exp2,
    Factorial,
    Ldexp,
    Remainder,
}

impl MathFunction {
    pub const ALL: [(&'static str, Self); 43] = [
        ("sin", Self::Sin),
        ("cos", Self::Cos),
        ("tan", Self::Tan),
        ("asin", Self::Asin),
        ("acos", Self::Acos),
        ("atan", Self::Atan),
        ("atan2", Self::Atan2),
        ("sinh", Self::Sinh),
        ("cosh", Self::Cosh),
        ("tanh", Self::Tanh),
        ("asinh", Self::Asinh),
        ("acosh", Self::Acosh),
        ("atanh", Self::Atanh),
        ("exp", Self::Exp),
        ("expm1", Self::Expm1),
        ("log", Self::Log),
        ("log10", Self::Log10),
        ("log2", Self::Log2),
        ("log1p", Self::Log1p),
        ("sqrt", Self::Sqrt),
        ("pow", Self::Pow),
        ("fabs", Self::Fabs),
        ("abs", Self::Fabs),
        ("floor", Self::Floor),
        ("ceil", Self::Ceil),
        ("trunc", Self::Trunc),
        ("hypot", Self::Hypot),
        ("degrees", Self::Degrees),
        ("radians", Self::Radians),
        ("fmod", Self::Fmod),
        ("copysign", Self::Copysign),
        ("min", Self::Min),
        ("max", Self::Max),
        ("round", Self::Round),
        ("gamma", Self::Gamma),
        ("lgamma", Self::Lgamma),
        ("erf", Self::Erf),
        ("erfc", Self::Erfc),
        ("cbrt", Self::Cbrt),
        ("exp2", Self::Exp2),
        ("factorial", Self::Factorial),
        ("ldexp", Self::Ldexp),
        ("remainder", Self::Remainder),
    ];

    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::Atan2
            | Self::Pow
            | Self::Fmod
            | Self::Copysign
            | Self::Ldexp
            | Self::Remainder => Arity::Exactly(2),
            Self::Log | Self::Round => Arity::Between(1, 2),
            Self::Hypot => Arity::AtLeast(0),
            Self::Min | Self::Max => Arity::AtLeast(2),
            _ => Arity::Exactly(1),
        }
    }

    /// Applies the function to already-evaluated arguments.
    ///
    /// `args.len()` must satisfy [`MathFunction::arity`].
    pub fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Self::Sin => finite_arg("sin", a).map(f64::sin),
            Self::Cos => finite_arg("cos", a).map(f64::cos),
            Self::Tan => finite_arg("tan", a).map(f64::tan),
            Self::Asin => within_unit("asin", a).map(f64::asin),
            Self::Acos => within_unit("acos", a).map(f64::acos),
            Self::Atan => Ok(a.atan()),
            Self::Atan2 => Ok(a.atan2(b)),
            Self::Sinh => checked_overflow("sinh", a, a.sinh()),
            Self::Cosh => checked_overflow("cosh", a, a.cosh()),
            Self::Tanh => Ok(a.tanh()),
            Self::Asinh => Ok(a.asinh()),
            Self::Acosh => {
                if a < 1.0 {
                    return Err(EvalError::Domain { operation: "acosh" });
                }
                Ok(a.acosh())
            }
            Self::Atanh => {
                if a.abs() >= 1.0 {
                    return Err(EvalError::Domain { operation: "atanh" });
                }
                Ok(a.atanh())
            }
            Self::Exp => checked_overflow("exp", a, a.exp()),
            Self::Expm1 => checked_overflow("expm1", a, a.exp_m1()),
            Self::Log => {
                let value = positive_arg("log", a)?.ln();
                if args.len() < 2 {
                    return Ok(value);
                }
                let base = positive_arg("log", b)?.ln();
                if base == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(value / base)
            }
            Self::Log10 => positive_arg("log10", a).map(f64::log10),
            Self::Log2 => positive_arg("log2", a).map(f64::log2),
            Self::Log1p => {
                if a <= -1.0 {
                    return Err(EvalError::Domain { operation: "log1p" });
                }
                Ok(a.ln_1p())
            }
            Self::Sqrt => {
                if a < 0.0 {
                    return Err(EvalError::Domain { operation: "sqrt" });
                }
                Ok(a.sqrt())
            }
            Self::Pow => power(a, b, PowZeroPolicy::Domain),
            Self::Fabs => Ok(a.abs()),
            Self::Floor => integral_arg("floor", a).map(f64::floor),
            Self::Ceil => integral_arg("ceil", a).map(f64::ceil),
            Self::Trunc => integral_arg("trunc", a).map(f64::trunc),
            Self::Hypot => Ok(args.iter().fold(0.0_f64, |acc, value| acc.hypot(*value))),
            Self::Degrees => Ok(a.to_degrees()),
            Self::Radians => Ok(a.to_radians()),
            Self::Fmod => {
                if b == 0.0 || a.is_infinite() {
                    return Err(EvalError::Domain { operation: "fmod" });
                }
                Ok(a % b)
            }
            Self::Copysign => Ok(a.copysign(b)),
            Self::Min => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
            Self::Max => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            Self::Round => round_half_even(a, args.get(1).copied()),
            Self::Gamma => {
                let a = gamma_arg("gamma", a)?;
                checked_overflow("gamma", a, libm::tgamma(a))
            }
            Self::Lgamma => {
                let a = gamma_arg("lgamma", a)?;
                checked_overflow("lgamma", a, libm::lgamma(a))
            }
            Self::Erf => Ok(libm::erf(a)),
            Self::Erfc => Ok(libm::erfc(a)),
            Self::Cbrt => Ok(a.cbrt()),
            Self::Exp2 => checked_overflow("exp2", a, a.exp2()),
            Self::Factorial => factorial(a),
            Self::Ldexp => {
                if !b.is_finite() || b.fract() != 0.0 {
                    return Err(EvalError::Domain { operation: "ldexp" });
                }
                // Exponents past this range already saturate to 0 or infinity.
                let exponent = b.clamp(-2200.0, 2200.0) as i32;
                checked_overflow("ldexp", a, libm::ldexp(a, exponent))
            }
            Self::Remainder => {
                if b == 0.0 || a.is_infinite() {
                    return Err(EvalError::Domain {
                        operation: "remainder",
                    });
                }
                Ok(libm::remainder(a, b))
            }
        }
    }
}

/// How `0 ** negative` is reported: the operator divides by zero while the
/// `pow` function reports a domain violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PowZeroPolicy {
    DivisionByZero,
    Domain,
}

pub(crate) fn power(base: f64, exponent: f64, zero_policy: PowZeroPolicy) -> Result<f64, EvalError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(match zero_policy {
            PowZeroPolicy::DivisionByZero => EvalError::DivisionByZero,
            PowZeroPolicy::Domain => EvalError::Domain { operation: "pow" },
        });
    }
    if base < 0.0 && base.is_finite() && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(EvalError::Domain { operation: "pow" });
    }
    let value = base.powf(exponent);
    if value.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(EvalError::Overflow { operation: "pow" });
    }
    Ok(value)
}

fn finite_arg(operation: &'static str, value: f64) -> Result<f64, EvalError> {
    if value.is_infinite() {
        return Err(EvalError::Domain { operation });
    }
    Ok(value)
}

fn within_unit(operation: &'static str, value: f64) -> Result<f64, EvalError> {
    if value.abs() > 1.0 {
        return Err(EvalError::Domain { operation });
    }
    Ok(value)
}

fn positive_arg(operation: &'static str, value: f64) -> Result<f64, EvalError> {
    if value <= 0.0 {
        return Err(EvalError::Domain { operation });
    }
    Ok(value)
}

fn integral_arg(operation: &'static str, value: f64) -> Result<f64, EvalError> {
    if value.is_nan() {
        return Err(EvalError::Domain { operation });
    }
    if value.is_infinite() {
        return Err(EvalError::Overflow { operation });
    }
    Ok(value)
}

fn checked_overflow(operation: &'static str, input: f64, value: f64) -> Result<f64, EvalError> {
    if value.is_infinite() && input.is_finite() {
        return Err(EvalError::Overflow { operation });
    }
    Ok(value)
}

/// Poles of the gamma function: zero, negative integers and `-inf`.
fn gamma_arg(operation: &'static str, value: f64) -> Result<f64, EvalError> {
    if value == f64::NEG_INFINITY || (value <= 0.0 && value.fract() == 0.0) {
        return Err(EvalError::Domain { operation });
    }
    Ok(value)
}

/// Largest `n` whose factorial is finite in `f64`.
const MAX_FACTORIAL_ARG: f64 = 170.0;

fn factorial(value: f64) -> Result<f64, EvalError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(EvalError::Domain {
            operation: "factorial",
        });
    }
    if value > MAX_FACTORIAL_ARG {
        return Err(EvalError::Overflow {
            operation: "factorial",
        });
    }
    Ok((2..=value as u32).fold(1.0, |acc, k| acc * f64::from(k)))
}

fn round_half_even(value: f64, digits: Option<f64>) -> Result<f64, EvalError> {
    let Some(digits) = digits else {
        return integral_arg("round", value).map(f64::round_ties_even);
    };
    if !digits.is_finite() || digits.fract() != 0.0 {
        return Err(EvalError::Domain { operation: "round" });
    }
    if !value.is_finite() {
        return Ok(value);
    }
    let scale = 10.0_f64.powi(digits.clamp(-308.0, 308.0) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return Ok(value);
    }
    Ok(scaled.round_ties_even() / scale)
}

/// A value or function reachable by name from an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Constant(f64),
    Function(MathFunction),
}

/// Explicit name table that expressions are evaluated against.
///
/// Nothing is resolved from ambient state: every constant and function an
/// expression may reference is an entry here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Namespace {
    entries: IndexMap<String, Binding>,
}

impl Namespace {
    /// Creates a namespace without any entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the standard namespace of mathematical constants and functions.
    #[must_use]
    pub fn math() -> Self {
        let mut namespace = Self::empty();
        for (name, value) in [
            ("pi", PI),
            ("e", E),
            ("tau", TAU),
            ("inf", f64::INFINITY),
            ("nan", f64::NAN),
        ] {
            namespace.bind(name, value);
        }
        for (name, function) in MathFunction::ALL {
            namespace
                .entries
                .insert(name.to_owned(), Binding::Function(function));
        }
        namespace
    }

    #[must_use]
    pub fn with_constant(mut self, name: &str, value: f64) -> Self {
        self.bind(name, value);
        self
    }

    /// Binds `name` to a constant, replacing any previous entry of that name.
    pub fn bind(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = Binding::Constant(value);
        } else {
            self.entries
                .insert(name.to_owned(), Binding::Constant(value));
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
