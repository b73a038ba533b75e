#![forbid(unsafe_code)]

pub mod ast;
pub mod batch;
pub mod error;
pub mod eval;
pub mod ops;
pub mod parser;
pub mod registry;

pub use ast::Expr;
pub use batch::compute;
pub use error::{AlphaError, AlphaResult};
pub use eval::{Variables, evaluate};
pub use parser::parse;
pub use registry::{Array, OpFn, OpRegistry};
