//! ORDER BY items.

use crate::criteria::expr::Expr;
use std::fmt;

/// Sort key and direction
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    expr: Expr,
    ascending: bool,
}

impl Order {
    pub fn new(expr: impl Into<Expr>, ascending: bool) -> Self {
        Self {
            expr: expr.into(),
            ascending,
        }
    }

    pub fn asc(expr: impl Into<Expr>) -> Self {
        Self::new(expr, true)
    }

    pub fn desc(expr: impl Into<Expr>) -> Self {
        Self::new(expr, false)
    }

    /// Flip the direction in place
    pub fn reverse(&mut self) -> &mut Self {
        self.ascending = !self.ascending;
        self
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn is_ascending(&self) -> bool {
        self.ascending
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "ASC" } else { "DESC" };
        write!(f, "{} {}", self.expr, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_twice_restores_direction() {
        let mut order = Order::asc(1);
        assert!(order.is_ascending());

        order.reverse();
        assert!(!order.is_ascending());
        assert_eq!(order.to_string(), "1 DESC");

        order.reverse().reverse();
        assert!(!order.is_ascending());

        order.reverse();
        assert!(order.is_ascending());
    }

    #[test]
    fn test_default_direction() {
        assert!(Order::asc("name").is_ascending());
        assert!(!Order::desc("name").is_ascending());
        assert_eq!(Order::desc("name").expr().to_string(), "\"name\"");
    }
}
