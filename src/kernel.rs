//! Kernel query AST and the factory that materializes it.
//!
//! The kernel AST is the untyped representation consumed by the query
//! planner. This module provides:
//! - Kernel values (scalars, paths, functions) and conditions
//! - The `ExpressionFactory` capability criteria lowering calls into
//! - `AstFactory`, a reference factory that builds the AST directly
//! - The shared JPQL substring argument conversion

pub mod ast_factory;
pub mod error;
pub mod expr;
pub mod factory;
pub mod substring;
pub mod value;

pub use ast_factory::AstFactory;
pub use error::{KernelError, KernelResult};
pub use expr::{CompareOp, Expression};
pub use factory::ExpressionFactory;
pub use substring::convert_substring_arguments;
pub use value::{BinaryFunction, Literal, LiteralKind, PathValue, Temporal, UnaryFunction, Value, ValueOp};
