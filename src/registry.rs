use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The array value every operator consumes and produces. Dynamic
/// dimensionality; the engine itself only ever inspects `.shape()`.
pub type Array = ndarray::ArrayD<f64>;

/// A registered operator: takes its evaluated arguments in order and
/// produces one array. Failures (arity, shape, numeric domain) surface as
/// [`AlphaError::OperatorFailed`](crate::AlphaError::OperatorFailed) with
/// the cause preserved.
pub type OpFn = Arc<dyn Fn(&[Array]) -> anyhow::Result<Array> + Send + Sync>;

/// Name → operator map shared by every evaluation.
///
/// Constructed once at startup and handed to the evaluator by reference (or
/// `Arc` across threads). Registration is additive and last-write-wins;
/// lookups during a concurrent registration may or may not observe the new
/// entry, with no ordering guarantee.
pub struct OpRegistry {
    ops: RwLock<HashMap<String, OpFn>>,
}

impl OpRegistry {
    /// An empty registry with no operators.
    pub fn new() -> Self {
        Self {
            ops: RwLock::new(HashMap::new()),
        }
    }

    /// A registry pre-populated with the built-in operator library.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        crate::ops::install(&registry);
        registry
    }

    /// Inserts or replaces the operator registered under `name`.
    pub fn register(&self, name: impl Into<String>, func: OpFn) {
        let name = name.into();
        tracing::debug!(operator = %name, "registered operator");
        self.ops
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, func);
    }

    /// Looks up an operator. Absence is not an error here; the evaluator
    /// decides what a missing operator means.
    pub fn get(&self, name: &str) -> Option<OpFn> {
        self.ops
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Default for OpRegistry {
    fn default() -> Self {
        Self::new()
    }
}
