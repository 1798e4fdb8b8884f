//! Error types raised by expression factories.

use thiserror::Error;

/// Errors a factory raises while materializing kernel nodes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Expression factory does not support operator {operator}")]
    Unsupported { operator: String },

    #[error("Invalid operand for operator {operator}: {reason}")]
    InvalidOperand { operator: String, reason: String },
}

impl KernelError {
    pub fn unsupported(operator: impl Into<String>) -> Self {
        KernelError::Unsupported {
            operator: operator.into(),
        }
    }

    pub fn invalid_operand(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        KernelError::InvalidOperand {
            operator: operator.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for factory operations
pub type KernelResult<T> = Result<T, KernelError>;
