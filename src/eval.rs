use std::collections::HashMap;

use crate::{
    ast::Expr,
    error::{AlphaError, AlphaResult},
    registry::{Array, OpRegistry},
};

/// Caller-supplied binding of variable names to array values. Supplied
/// fresh per evaluation; the engine never retains it.
pub type Variables = HashMap<String, Array>;

/// Evaluates an expression tree against a variable binding.
///
/// A pure recursive walk: variable leaves resolve against `variables`,
/// operation nodes resolve their operator in `registry` before any child is
/// evaluated, then evaluate children left to right and invoke the operator
/// with the resulting arrays. Any failure inside a registered operator is
/// wrapped as [`AlphaError::OperatorFailed`] with the operator name and the
/// original cause. Nothing is memoized; cost is proportional to tree size.
pub fn evaluate(node: &Expr, variables: &Variables, registry: &OpRegistry) -> AlphaResult<Array> {
    match node {
        Expr::Variable(name) => variables
            .get(name)
            .cloned()
            .ok_or_else(|| AlphaError::UnknownVariable(name.clone())),
        Expr::Operation { op, args } => {
            let func = registry
                .get(op)
                .ok_or_else(|| AlphaError::UnknownOperator(op.clone()))?;
            let mut resolved = Vec::with_capacity(args.len());
            for arg in args {
                resolved.push(evaluate(arg, variables, registry)?);
            }
            func(&resolved).map_err(|source| AlphaError::operator_failed(op.clone(), source))
        }
    }
}
