//! Typed criteria query trees and their lowering to a kernel query AST.

pub mod criteria;
pub mod kernel;
pub mod metamodel;
pub mod types;

pub use criteria::{CriteriaBuilder, CriteriaError, CriteriaQuery, CriteriaResult, LoweringOptions};
pub use kernel::{AstFactory, ExpressionFactory};
pub use metamodel::{EntityType, Metamodel, StaticMetamodel};
pub use types::{Datum, ValueType};
