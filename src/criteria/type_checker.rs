//! Construction-time operand type checks.
//!
//! Operands with no declared type (NULL constants, untyped case/coalesce
//! nodes) and `Object` operands pass every check; they are resolved by the
//! planner.

use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::criteria::expr::Expr;
use crate::types::ValueType;

/// Checks operands against the signature of one operator
pub struct TypeChecker<'a> {
    operator: &'a str,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker reporting mismatches under the given operator name
    pub fn new(operator: &'a str) -> Self {
        Self { operator }
    }

    fn check(
        &self,
        operand: &Expr,
        expected: &str,
        accepts: impl Fn(&ValueType) -> bool,
    ) -> CriteriaResult<()> {
        match operand.declared_type() {
            None | Some(ValueType::Object) => Ok(()),
            Some(actual) if accepts(actual) => Ok(()),
            Some(actual) => Err(CriteriaError::type_mismatch(
                self.operator,
                operand,
                expected,
                actual.name(),
            )),
        }
    }

    pub fn numeric(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "numeric", ValueType::is_numeric)
    }

    pub fn integral(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "integral", ValueType::is_integral)
    }

    pub fn string(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "String", ValueType::is_textual)
    }

    pub fn character(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "Character", |t| *t == ValueType::Character)
    }

    pub fn boolean(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "Boolean", |t| *t == ValueType::Boolean)
    }

    pub fn collection(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "collection", ValueType::is_collection)
    }

    /// Operand usable with `<`, `>` and BETWEEN
    pub fn ordered(&self, operand: &Expr) -> CriteriaResult<()> {
        self.check(operand, "comparable", |t| {
            t.is_numeric() || t.is_textual() || t.is_temporal()
        })
    }

    /// Both operands must be mutually compatible
    pub fn compatible(&self, left: &Expr, right: &Expr) -> CriteriaResult<()> {
        match (left.declared_type(), right.declared_type()) {
            (Some(lt), Some(rt)) if !lt.is_compatible_with(rt) => Err(
                CriteriaError::type_mismatch(self.operator, right, lt.name(), rt.name()),
            ),
            _ => Ok(()),
        }
    }

    /// Operand must be compatible with a declared type, if there is one
    pub fn conforms(&self, expected: Option<&ValueType>, operand: &Expr) -> CriteriaResult<()> {
        match (expected, operand.declared_type()) {
            (Some(expected), Some(actual)) if !expected.is_compatible_with(actual) => Err(
                CriteriaError::type_mismatch(self.operator, operand, expected.name(), actual.name()),
            ),
            _ => Ok(()),
        }
    }

    /// Element must be compatible with the collection's element type
    pub fn member_of(&self, element: &Expr, collection: &Expr) -> CriteriaResult<()> {
        self.collection(collection)?;
        let element_type = collection.declared_type().and_then(ValueType::element_type);
        self.conforms(element_type, element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_check() {
        let checker = TypeChecker::new("abs");
        assert!(checker.numeric(&Expr::from(1)).is_ok());
        assert!(checker.numeric(&Expr::from(1.5)).is_ok());
        assert!(checker.numeric(&Expr::null()).is_ok());
        assert!(checker
            .numeric(&Expr::typed_constant(ValueType::Object, "x"))
            .is_ok());

        let err = checker.numeric(&Expr::from("x")).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::TypeMismatch {
                operator: "abs".to_string(),
                node: "\"x\"".to_string(),
                expected: "numeric".to_string(),
                actual: "String".to_string(),
            }
        );
    }

    #[test]
    fn test_compatible() {
        let checker = TypeChecker::new("=");
        assert!(checker.compatible(&Expr::from(1), &Expr::from(2i64)).is_ok());
        assert!(checker.compatible(&Expr::from("a"), &Expr::from('b')).is_ok());
        assert!(checker.compatible(&Expr::from(1), &Expr::null()).is_ok());
        assert!(checker.compatible(&Expr::from(1), &Expr::from("1")).is_err());
    }

    #[test]
    fn test_ordered() {
        let checker = TypeChecker::new(">");
        assert!(checker.ordered(&Expr::from(1)).is_ok());
        assert!(checker.ordered(&Expr::from("a")).is_ok());
        assert!(checker.ordered(&Expr::from(true)).is_err());
    }

    #[test]
    fn test_member_of() {
        let checker = TypeChecker::new("member of");
        let tags = Expr::typed_constant(
            ValueType::collection_of(ValueType::String),
            crate::types::Datum::from(vec!["a", "b"]),
        );

        assert!(checker.member_of(&Expr::from("a"), &tags).is_ok());
        assert!(checker.member_of(&Expr::from(1), &tags).is_err());
        assert!(checker.member_of(&Expr::from("a"), &Expr::from("b")).is_err());
    }
}
