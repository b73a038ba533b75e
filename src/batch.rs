use ndarray::Axis;

use crate::{
    error::{AlphaError, AlphaResult},
    eval::{Variables, evaluate},
    parser::parse,
    registry::{Array, OpRegistry},
};

/// Parses and evaluates a list of expressions against one variable binding
/// and stacks the results along a new trailing axis.
///
/// Every result must share the reference shape, taken from an arbitrary
/// (first-by-iteration-order) variable. The output shape is the reference
/// shape plus a final axis of length `expressions.len()`, with expression
/// `i`'s result at index `i` on that axis. The first parse, evaluation, or
/// shape failure aborts the whole batch.
#[tracing::instrument(skip_all, fields(expressions = expressions.len()))]
pub fn compute<S: AsRef<str>>(
    expressions: &[S],
    variables: &Variables,
    registry: &OpRegistry,
) -> AlphaResult<Array> {
    let base_shape = variables
        .values()
        .next()
        .ok_or(AlphaError::NoVariables)?
        .shape()
        .to_vec();
    if expressions.is_empty() {
        return Err(AlphaError::NoExpressions);
    }

    let mut results = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let expression = expression.as_ref();
        let ast = parse(expression)?;
        let value = evaluate(&ast, variables, registry)?;

        if value.shape() != base_shape.as_slice() {
            return Err(AlphaError::ShapeMismatch(expression.to_string()));
        }

        tracing::debug!(expression, "evaluated expression");
        results.push(value.insert_axis(Axis(base_shape.len())));
    }

    let views: Vec<_> = results.iter().map(Array::view).collect();
    ndarray::concatenate(Axis(base_shape.len()), &views)
        .map_err(|e| AlphaError::Other(anyhow::Error::new(e)))
}
