//! Built-in operator library.
//!
//! Arithmetic, comparison, logical, and ranking operators over f64 arrays.
//! All elementwise operators require their operands to have identical
//! shapes; logical operators treat any non-zero element as true and produce
//! 1.0/0.0 so their results compose with arithmetic.

use std::cmp::Ordering;
use std::sync::Arc;

use anyhow::{Result, bail};
use ndarray::{Axis, Zip};

use crate::registry::{Array, OpFn, OpRegistry};

/// Registers the built-in library into `registry`.
pub fn install(registry: &OpRegistry) {
    registry.register("Add", binary(|a, b| a + b));
    registry.register("Sub", binary(|a, b| a - b));
    registry.register("Mul", binary(|a, b| a * b));
    registry.register("Div", binary(|a, b| a / b));

    registry.register("Gt", binary(|a, b| f64::from(a > b)));
    registry.register("Lt", binary(|a, b| f64::from(a < b)));

    registry.register("And", binary(|a, b| f64::from(a != 0.0 && b != 0.0)));
    registry.register("Or", binary(|a, b| f64::from(a != 0.0 || b != 0.0)));
    registry.register("Not", unary(|a| f64::from(a == 0.0)));

    registry.register(
        "If",
        Arc::new(|args: &[Array]| {
            let [cond, then, other] = args else {
                bail!("expected 3 arguments, got {}", args.len());
            };
            check_same_shape(cond, then)?;
            check_same_shape(cond, other)?;
            Ok(Zip::from(cond)
                .and(then)
                .and(other)
                .map_collect(|&c, &t, &f| if c != 0.0 { t } else { f }))
        }),
    );

    registry.register(
        "Rank",
        Arc::new(|args: &[Array]| {
            let [a] = args else {
                bail!("expected 1 argument, got {}", args.len());
            };
            rank_last_axis(a)
        }),
    );
}

fn unary(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> OpFn {
    Arc::new(move |args: &[Array]| {
        let [a] = args else {
            bail!("expected 1 argument, got {}", args.len());
        };
        Ok(a.mapv(&f))
    })
}

fn binary(f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> OpFn {
    Arc::new(move |args: &[Array]| {
        let [a, b] = args else {
            bail!("expected 2 arguments, got {}", args.len());
        };
        check_same_shape(a, b)?;
        Ok(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y)))
    })
}

fn check_same_shape(a: &Array, b: &Array) -> Result<()> {
    if a.shape() != b.shape() {
        bail!(
            "operand shapes differ: {:?} vs {:?}",
            a.shape(),
            b.shape()
        );
    }
    Ok(())
}

/// Rank of each element within its lane along the last axis: 0 for the
/// smallest, lane length − 1 for the largest. Ties break by position
/// (stable sort), NaN compares equal to everything it meets.
fn rank_last_axis(a: &Array) -> Result<Array> {
    if a.ndim() == 0 {
        bail!("rank requires an array with at least one axis");
    }
    let axis = Axis(a.ndim() - 1);
    let len = a.len_of(axis);
    let mut out = Array::zeros(a.raw_dim());

    for (lane, mut ranks) in a.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        let mut order: Vec<usize> = (0..len).collect();
        order.sort_by(|&i, &j| lane[i].partial_cmp(&lane[j]).unwrap_or(Ordering::Equal));
        for (rank, &i) in order.iter().enumerate() {
            ranks[i] = rank as f64;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dyn2(a: [[f64; 2]; 2]) -> Array {
        ndarray::arr2(&a).into_dyn()
    }

    #[test]
    fn arithmetic_is_elementwise() {
        let registry = OpRegistry::with_builtins();
        let a = dyn2([[1.0, 2.0], [3.0, 4.0]]);
        let b = dyn2([[5.0, 6.0], [7.0, 8.0]]);

        let add = registry.get("Add").unwrap();
        assert_eq!(add(&[a.clone(), b.clone()]).unwrap(), dyn2([[6.0, 8.0], [10.0, 12.0]]));

        let sub = registry.get("Sub").unwrap();
        assert_eq!(sub(&[b.clone(), a.clone()]).unwrap(), dyn2([[4.0, 4.0], [4.0, 4.0]]));
    }

    #[test]
    fn division_follows_ieee() {
        let registry = OpRegistry::with_builtins();
        let div = registry.get("Div").unwrap();
        let out = div(&[array![1.0, 0.0].into_dyn(), array![0.0, 0.0].into_dyn()]).unwrap();
        assert!(out[[0]].is_infinite());
        assert!(out[[1]].is_nan());
    }

    #[test]
    fn comparisons_yield_indicator_arrays() {
        let registry = OpRegistry::with_builtins();
        let gt = registry.get("Gt").unwrap();
        let out = gt(&[array![1.0, 5.0].into_dyn(), array![2.0, 2.0].into_dyn()]).unwrap();
        assert_eq!(out, array![0.0, 1.0].into_dyn());
    }

    #[test]
    fn logical_ops_treat_nonzero_as_true() {
        let registry = OpRegistry::with_builtins();
        let and = registry.get("And").unwrap();
        let or = registry.get("Or").unwrap();
        let not = registry.get("Not").unwrap();

        let a = array![0.0, 2.0, -1.0].into_dyn();
        let b = array![3.0, 0.0, -1.0].into_dyn();
        assert_eq!(and(&[a.clone(), b.clone()]).unwrap(), array![0.0, 0.0, 1.0].into_dyn());
        assert_eq!(or(&[a.clone(), b.clone()]).unwrap(), array![1.0, 1.0, 1.0].into_dyn());
        assert_eq!(not(&[a]).unwrap(), array![1.0, 0.0, 0.0].into_dyn());
    }

    #[test]
    fn if_selects_elementwise() {
        let registry = OpRegistry::with_builtins();
        let op = registry.get("If").unwrap();
        let out = op(&[
            array![1.0, 0.0].into_dyn(),
            array![10.0, 20.0].into_dyn(),
            array![30.0, 40.0].into_dyn(),
        ])
        .unwrap();
        assert_eq!(out, array![10.0, 40.0].into_dyn());
    }

    #[test]
    fn rank_is_double_argsort_along_last_axis() {
        let registry = OpRegistry::with_builtins();
        let rank = registry.get("Rank").unwrap();

        let out = rank(&[array![[3.0, 1.0, 2.0], [5.0, 6.0, 4.0]].into_dyn()]).unwrap();
        assert_eq!(out, array![[2.0, 0.0, 1.0], [1.0, 2.0, 0.0]].into_dyn());
    }

    #[test]
    fn rank_rejects_zero_dimensional_input() {
        let registry = OpRegistry::with_builtins();
        let rank = registry.get("Rank").unwrap();
        let scalar = ndarray::arr0(1.0).into_dyn();
        assert!(rank(&[scalar]).is_err());
    }

    #[test]
    fn wrong_arity_fails() {
        let registry = OpRegistry::with_builtins();
        let add = registry.get("Add").unwrap();
        assert!(add(&[array![1.0].into_dyn()]).is_err());

        let not = registry.get("Not").unwrap();
        assert!(not(&[]).is_err());
    }

    #[test]
    fn mismatched_shapes_fail() {
        let registry = OpRegistry::with_builtins();
        let add = registry.get("Add").unwrap();
        let a = dyn2([[1.0, 2.0], [3.0, 4.0]]);
        let b = array![1.0, 2.0].into_dyn();
        assert!(add(&[a, b]).is_err());
    }
}
