use crate::core::expression::{EvalError, Expr, Namespace, parse};
use crate::error::{PlotError, PlotResult};

/// User formula bound to a parameter name and an explicit namespace.
///
/// The formula is parsed once at construction. Each evaluation rebinds the
/// parameter in the evaluator's own namespace before walking the tree, so an
/// evaluator must not be shared between concurrent evaluations; clone it per
/// worker instead.
///
/// Formulas can only reach arithmetic and the whitelisted namespace
/// functions. They are still user input: treat them as trusted configuration
/// and do not accept them from untrusted sources without limits on size.
#[derive(Debug, Clone)]
pub struct FunctionEvaluator {
    source: String,
    parameter: String,
    namespace: Namespace,
    expr: Expr,
}

impl FunctionEvaluator {
    pub fn new(
        source: impl Into<String>,
        parameter: impl Into<String>,
        namespace: Namespace,
    ) -> PlotResult<Self> {
        let source = source.into();
        let parameter = parameter.into();
        validate_parameter_name(&parameter)?;
        let expr = parse(&source).map_err(PlotError::Expression)?;
        Ok(Self {
            source,
            parameter,
            namespace,
            expr,
        })
    }

    /// Evaluates the formula at `x`.
    ///
    /// Failures carry `x` and the underlying cause. A non-finite result is an
    /// error because it cannot be placed on the canvas.
    pub fn evaluate(&mut self, x: f64) -> PlotResult<f64> {
        self.namespace.bind(&self.parameter, x);
        let value = self
            .expr
            .eval(&self.namespace)
            .map_err(|source| PlotError::Evaluation { x, source })?;
        if !value.is_finite() {
            return Err(PlotError::Evaluation {
                x,
                source: EvalError::NonFinite { value },
            });
        }
        Ok(value)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }
}

pub(crate) fn validate_parameter_name(name: &str) -> PlotResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    if !valid_start || !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(PlotError::InvalidConfiguration(format!(
            "parameter name `{name}` must be an identifier"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::FunctionEvaluator;
    use crate::core::expression::Namespace;
    use crate::error::PlotError;

    #[test]
    fn parameter_shadows_namespace_entry() {
        let mut evaluator =
            FunctionEvaluator::new("e * 2", "e", Namespace::math()).expect("evaluator");
        assert_eq!(evaluator.evaluate(3.0), Ok(6.0));
    }

    #[test]
    fn invalid_parameter_names_are_configuration_errors() {
        for name in ["", "2x", "x-y", "t "] {
            let result = FunctionEvaluator::new("1", name, Namespace::math());
            assert!(
                matches!(result, Err(PlotError::InvalidConfiguration(_))),
                "`{name}` should be rejected"
            );
        }
    }
}
