//! Error types for criteria construction and lowering.

use crate::kernel::KernelError;
use thiserror::Error;

/// Errors raised while building or lowering a criteria tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    /// Operand type incompatible with the operator signature
    #[error("Type mismatch in {operator} for {node}: expected {expected}, got {actual}")]
    TypeMismatch {
        operator: String,
        node: String,
        expected: String,
        actual: String,
    },

    /// Node lacks parts it needs to be lowered
    #[error("Incomplete expression {node}: {reason}")]
    IncompleteExpression { node: String, reason: String },

    /// Variable referenced before a root or join bound it
    #[error("Unbound alias '{alias}' referenced by {node}")]
    UnboundAlias { alias: String, node: String },

    /// Alias already taken by another root or join of the query
    #[error("Duplicate alias '{alias}' on {node}")]
    DuplicateAlias { alias: String, node: String },

    /// The expression factory could not realize an operator
    #[error("Factory cannot realize {node}: {source}")]
    FactoryUnsupported {
        node: String,
        #[source]
        source: KernelError,
    },

    #[error("Unknown entity: {name}")]
    UnknownEntity { name: String },

    #[error("Unknown attribute {attribute} on entity {entity}")]
    UnknownAttribute { entity: String, attribute: String },
}

impl CriteriaError {
    pub fn type_mismatch(
        operator: impl Into<String>,
        node: impl ToString,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CriteriaError::TypeMismatch {
            operator: operator.into(),
            node: node.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn incomplete(node: impl ToString, reason: impl Into<String>) -> Self {
        CriteriaError::IncompleteExpression {
            node: node.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unbound(alias: impl Into<String>, node: impl ToString) -> Self {
        CriteriaError::UnboundAlias {
            alias: alias.into(),
            node: node.to_string(),
        }
    }

    pub fn duplicate_alias(alias: impl Into<String>, node: impl ToString) -> Self {
        CriteriaError::DuplicateAlias {
            alias: alias.into(),
            node: node.to_string(),
        }
    }

    /// Attach the node a factory failure surfaced under, keeping the
    /// innermost node if one is already recorded
    pub fn with_node(self, node: impl ToString) -> Self {
        match self {
            CriteriaError::FactoryUnsupported { node: current, source } if current.is_empty() => {
                CriteriaError::FactoryUnsupported {
                    node: node.to_string(),
                    source,
                }
            }
            other => other,
        }
    }
}

impl From<KernelError> for CriteriaError {
    fn from(source: KernelError) -> Self {
        CriteriaError::FactoryUnsupported {
            node: String::new(),
            source,
        }
    }
}

/// Result type for criteria operations
pub type CriteriaResult<T> = Result<T, CriteriaError>;
