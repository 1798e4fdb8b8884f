//! Criteria expression tree and its lowering to the kernel AST.
//!
//! This module provides:
//! - The typed criteria tree (`Expr`, `Predicate`, `Path`, `Order`)
//! - Accumulating nodes (`Case`, `SimpleCase`, `Coalesce`, `In`)
//! - Construction-time type checking
//! - `CriteriaBuilder`, the public construction surface
//! - `Lowerer`, translating trees through an `ExpressionFactory`
//! - `CriteriaQuery`, composing clauses into a `KernelQuery`

pub mod builder;
pub mod case;
pub mod error;
pub mod expr;
pub mod lower;
pub mod operator;
pub mod options;
pub mod order;
pub mod path;
pub mod predicate;
pub mod query;
pub mod type_checker;

pub use builder::CriteriaBuilder;
pub use case::{Case, Coalesce, In, SimpleCase};
pub use error::{CriteriaError, CriteriaResult};
pub use expr::{Expr, ExprKind};
pub use lower::Lowerer;
pub use operator::{BinaryOperator, BooleanOperator, ComparisonOperator, TrimSpec, UnaryOperator};
pub use options::{LiteralClassification, LoweringOptions, MemberOfLowering};
pub use order::Order;
pub use path::{JoinType, Path, PathKind};
pub use predicate::{Predicate, PredicateKind};
pub use query::{CriteriaQuery, KernelQuery, Selection};
