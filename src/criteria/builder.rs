//! Fluent construction surface for criteria trees.
//!
//! Every operator is type-checked here, when the node is built. Operands are
//! taken as `impl Into<Expr>`, so raw domain values are wrapped in constants.

use crate::criteria::case::{Case, Coalesce, In, SimpleCase};
use crate::criteria::error::CriteriaResult;
use crate::criteria::expr::{Expr, ExprKind};
use crate::criteria::operator::{BinaryOperator, ComparisonOperator, TrimSpec, UnaryOperator};
use crate::criteria::order::Order;
use crate::criteria::path::{JoinType, Path};
use crate::criteria::predicate::{Predicate, PredicateKind, DEFAULT_ESCAPE};
use crate::criteria::query::CriteriaQuery;
use crate::criteria::type_checker::TypeChecker;
use crate::kernel::Temporal;
use crate::metamodel::Metamodel;
use crate::types::{Datum, ValueType};

/// Character TRIM removes when none is given
pub const DEFAULT_TRIM: char = ' ';

/// Builds criteria nodes against a metamodel
pub struct CriteriaBuilder<'m, M: ?Sized> {
    model: &'m M,
}

impl<'m, M: Metamodel + ?Sized> CriteriaBuilder<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m M {
        self.model
    }

    pub fn create_query(&self) -> CriteriaQuery {
        CriteriaQuery::new()
    }

    // Paths

    /// Root over the named entity
    pub fn root(&self, entity: &str) -> CriteriaResult<Path> {
        Ok(Path::root(self.model.require_entity(entity)?))
    }

    pub fn get(&self, path: &Path, attribute: &str) -> CriteriaResult<Path> {
        path.get(self.model, attribute)
    }

    /// Inner join over an association
    pub fn join(&self, path: &Path, attribute: &str) -> CriteriaResult<Path> {
        path.join(self.model, attribute, JoinType::Inner)
    }

    pub fn left_join(&self, path: &Path, attribute: &str) -> CriteriaResult<Path> {
        path.join(self.model, attribute, JoinType::Left)
    }

    // Literals

    pub fn literal(&self, value: impl Into<Datum>) -> Expr {
        Expr::constant(value)
    }

    /// NULL with a declared type
    pub fn null_literal(&self, declared_type: ValueType) -> Expr {
        Expr::typed_constant(declared_type, Datum::Null)
    }

    // Unary functions and aggregates

    pub fn abs(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("abs").numeric(&x)?;
        Ok(unary(UnaryOperator::Abs, x))
    }

    pub fn sqrt(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("sqrt").numeric(&x)?;
        Ok(unary(UnaryOperator::Sqrt, x))
    }

    pub fn avg(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("avg").numeric(&x)?;
        Ok(unary(UnaryOperator::Avg, x))
    }

    pub fn max(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("max").ordered(&x)?;
        Ok(unary(UnaryOperator::Max, x))
    }

    pub fn min(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("min").ordered(&x)?;
        Ok(unary(UnaryOperator::Min, x))
    }

    /// Number of elements of a collection-valued operand
    pub fn size(&self, collection: impl Into<Expr>) -> CriteriaResult<Expr> {
        let collection = collection.into();
        TypeChecker::new("size").collection(&collection)?;
        Ok(unary(UnaryOperator::Size, collection))
    }

    /// Size of a literal collection
    pub fn size_of<T: Into<Datum>>(&self, values: Vec<T>) -> CriteriaResult<Expr> {
        self.size(Datum::from(values))
    }

    pub fn count(&self, x: impl Into<Expr>) -> Expr {
        count(x.into(), false)
    }

    pub fn count_distinct(&self, x: impl Into<Expr>) -> Expr {
        count(x.into(), true)
    }

    /// Aggregate SUM
    pub fn sum(&self, x: impl Into<Expr>) -> CriteriaResult<Expr> {
        let x = x.into();
        TypeChecker::new("sum").numeric(&x)?;
        Ok(Expr::new(
            x.declared_type().cloned(),
            ExprKind::Sum {
                left: Box::new(x),
                right: None,
            },
        ))
    }

    pub fn cast(&self, x: impl Into<Expr>, target: ValueType) -> Expr {
        Expr::new(
            Some(target.clone()),
            ExprKind::Cast {
                operand: Box::new(x.into()),
                target,
            },
        )
    }

    // Binary arithmetic

    /// Arithmetic `a + b`
    pub fn add(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        let (a, b) = (a.into(), b.into());
        let checker = TypeChecker::new("sum");
        checker.numeric(&a)?;
        checker.numeric(&b)?;

        let declared_type = a.declared_type().or_else(|| b.declared_type()).cloned();
        Ok(Expr::new(
            declared_type,
            ExprKind::Sum {
                left: Box::new(a),
                right: Some(Box::new(b)),
            },
        ))
    }

    pub fn prod(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        arithmetic(BinaryOperator::Product, a.into(), b.into())
    }

    pub fn diff(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        arithmetic(BinaryOperator::Diff, a.into(), b.into())
    }

    pub fn quot(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        arithmetic(BinaryOperator::Quotient, a.into(), b.into())
    }

    pub fn modulo(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        let (a, b) = (a.into(), b.into());
        let checker = TypeChecker::new("mod");
        checker.integral(&a)?;
        checker.integral(&b)?;
        Ok(binary(BinaryOperator::Mod, a, b))
    }

    // Strings

    pub fn concat(&self, a: impl Into<Expr>, b: impl Into<Expr>) -> CriteriaResult<Expr> {
        let (a, b) = (a.into(), b.into());
        let checker = TypeChecker::new("concat");
        checker.string(&a)?;
        checker.string(&b)?;
        Ok(binary(BinaryOperator::Concat, a, b))
    }

    /// Suffix starting at the 1-based position `from`
    pub fn substring(&self, s: impl Into<Expr>, from: impl Into<Expr>) -> CriteriaResult<Expr> {
        self.substring_parts(s, Some(from.into()), None)
    }

    /// `len` characters starting at the 1-based position `from`
    pub fn substring_len(
        &self,
        s: impl Into<Expr>,
        from: impl Into<Expr>,
        len: impl Into<Expr>,
    ) -> CriteriaResult<Expr> {
        self.substring_parts(s, Some(from.into()), Some(len.into()))
    }

    /// Substring with any of its position arguments omitted
    pub fn substring_parts(
        &self,
        s: impl Into<Expr>,
        from: Option<Expr>,
        len: Option<Expr>,
    ) -> CriteriaResult<Expr> {
        let s = s.into();
        let checker = TypeChecker::new("substring");
        checker.string(&s)?;
        for position in from.iter().chain(len.iter()) {
            checker.integral(position)?;
        }

        Ok(Expr::new(
            Some(ValueType::String),
            ExprKind::Substring {
                string: Box::new(s),
                from: from.map(Box::new),
                len: len.map(Box::new),
            },
        ))
    }

    /// Trim spaces from both ends
    pub fn trim(&self, s: impl Into<Expr>) -> CriteriaResult<Expr> {
        self.trim_with(TrimSpec::Both, DEFAULT_TRIM, s)
    }

    pub fn trim_spec(&self, spec: TrimSpec, s: impl Into<Expr>) -> CriteriaResult<Expr> {
        self.trim_with(spec, DEFAULT_TRIM, s)
    }

    pub fn trim_char(&self, character: impl Into<Expr>, s: impl Into<Expr>) -> CriteriaResult<Expr> {
        self.trim_with(TrimSpec::Both, character, s)
    }

    pub fn trim_with(
        &self,
        spec: TrimSpec,
        character: impl Into<Expr>,
        s: impl Into<Expr>,
    ) -> CriteriaResult<Expr> {
        let (character, s) = (character.into(), s.into());
        let checker = TypeChecker::new("trim");
        checker.character(&character)?;
        checker.string(&s)?;

        Ok(Expr::new(
            Some(ValueType::String),
            ExprKind::Trim {
                string: Box::new(s),
                character: Box::new(character),
                spec,
            },
        ))
    }

    // Date and time

    pub fn current_date(&self) -> Expr {
        Expr::new(Some(ValueType::Date), ExprKind::Current(Temporal::Date))
    }

    pub fn current_time(&self) -> Expr {
        Expr::new(Some(ValueType::Time), ExprKind::Current(Temporal::Time))
    }

    pub fn current_timestamp(&self) -> Expr {
        Expr::new(
            Some(ValueType::Timestamp),
            ExprKind::Current(Temporal::Timestamp),
        )
    }

    // Comparisons

    pub fn equal(&self, x: impl Into<Expr>, y: impl Into<Expr>) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::Equal, x.into(), y.into())
    }

    pub fn not_equal(&self, x: impl Into<Expr>, y: impl Into<Expr>) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::NotEqual, x.into(), y.into())
    }

    pub fn greater_than(
        &self,
        x: impl Into<Expr>,
        y: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::GreaterThan, x.into(), y.into())
    }

    pub fn greater_than_or_equal(
        &self,
        x: impl Into<Expr>,
        y: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::GreaterThanEqual, x.into(), y.into())
    }

    pub fn less_than(&self, x: impl Into<Expr>, y: impl Into<Expr>) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::LessThan, x.into(), y.into())
    }

    pub fn less_than_or_equal(
        &self,
        x: impl Into<Expr>,
        y: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        comparison(ComparisonOperator::LessThanEqual, x.into(), y.into())
    }

    /// `lo <= v AND v <= hi`
    pub fn between(
        &self,
        v: impl Into<Expr>,
        lo: impl Into<Expr>,
        hi: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        let v = v.into();
        let lower = comparison(ComparisonOperator::GreaterThanEqual, v.clone(), lo.into())?;
        let upper = comparison(ComparisonOperator::LessThanEqual, v, hi.into())?;
        Ok(Predicate::all(vec![lower, upper]))
    }

    // Null, collection and pattern tests

    pub fn is_null(&self, x: impl Into<Expr>) -> Predicate {
        null_test(x.into(), false)
    }

    pub fn is_not_null(&self, x: impl Into<Expr>) -> Predicate {
        null_test(x.into(), true)
    }

    pub fn is_empty(&self, collection: impl Into<Expr>) -> CriteriaResult<Predicate> {
        let collection = collection.into();
        TypeChecker::new("is empty").collection(&collection)?;
        Ok(Predicate::new(PredicateKind::IsEmpty(Box::new(collection))))
    }

    pub fn is_not_empty(&self, collection: impl Into<Expr>) -> CriteriaResult<Predicate> {
        Ok(self.is_empty(collection)?.not())
    }

    pub fn is_member(
        &self,
        element: impl Into<Expr>,
        collection: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        let (element, collection) = (element.into(), collection.into());
        TypeChecker::new("member of").member_of(&element, &collection)?;
        Ok(Predicate::new(PredicateKind::IsMember {
            element: Box::new(element),
            collection: Box::new(collection),
        }))
    }

    pub fn is_not_member(
        &self,
        element: impl Into<Expr>,
        collection: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        Ok(self.is_member(element, collection)?.not())
    }

    /// LIKE with the default escape character
    pub fn like(&self, s: impl Into<Expr>, pattern: impl Into<Expr>) -> CriteriaResult<Predicate> {
        self.like_escape(s, pattern, DEFAULT_ESCAPE)
    }

    pub fn like_escape(
        &self,
        s: impl Into<Expr>,
        pattern: impl Into<Expr>,
        escape: char,
    ) -> CriteriaResult<Predicate> {
        self.like_escape_expr(s, pattern, Expr::constant(escape))
    }

    /// LIKE whose escape character is itself an expression
    pub fn like_escape_expr(
        &self,
        s: impl Into<Expr>,
        pattern: impl Into<Expr>,
        escape: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        let (s, pattern, escape) = (s.into(), pattern.into(), escape.into());
        let checker = TypeChecker::new("like");
        checker.string(&s)?;
        checker.string(&pattern)?;
        checker.character(&escape)?;

        Ok(Predicate::new(PredicateKind::Like {
            string: Box::new(s),
            pattern: Box::new(pattern),
            escape: Box::new(escape),
        }))
    }

    pub fn not_like(
        &self,
        s: impl Into<Expr>,
        pattern: impl Into<Expr>,
    ) -> CriteriaResult<Predicate> {
        Ok(self.like(s, pattern)?.not())
    }

    /// Start an IN list over the operand
    pub fn in_(&self, operand: impl Into<Expr>) -> In {
        In::new(operand)
    }

    /// Boolean-valued expression used as a condition
    pub fn is_true(&self, x: impl Into<Expr>) -> CriteriaResult<Predicate> {
        let x = x.into();
        TypeChecker::new("is true").boolean(&x)?;
        Ok(Predicate::new(PredicateKind::Condition(Box::new(x))))
    }

    pub fn is_false(&self, x: impl Into<Expr>) -> CriteriaResult<Predicate> {
        Ok(self.is_true(x)?.not())
    }

    // Connectives

    pub fn and(&self, x: Predicate, y: Predicate) -> Predicate {
        x.and(y)
    }

    pub fn or(&self, x: Predicate, y: Predicate) -> Predicate {
        x.or(y)
    }

    pub fn not(&self, x: Predicate) -> Predicate {
        x.not()
    }

    pub fn and_all(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::all(predicates)
    }

    pub fn or_any(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::any(predicates)
    }

    pub fn conjunction(&self) -> Predicate {
        Predicate::conjunction()
    }

    pub fn disjunction(&self) -> Predicate {
        Predicate::disjunction()
    }

    // Accumulators

    pub fn coalesce(&self) -> Coalesce {
        Coalesce::new()
    }

    /// `coalesce(x, y)`
    pub fn coalesce_pair(&self, x: impl Into<Expr>, y: impl Into<Expr>) -> CriteriaResult<Expr> {
        Ok(Coalesce::new().value(x)?.value(y)?.into())
    }

    pub fn select_case(&self) -> Case {
        Case::new()
    }

    pub fn simple_case(&self, operand: impl Into<Expr>) -> SimpleCase {
        SimpleCase::new(operand)
    }

    // Ordering

    pub fn asc(&self, x: impl Into<Expr>) -> Order {
        Order::asc(x)
    }

    pub fn desc(&self, x: impl Into<Expr>) -> Order {
        Order::desc(x)
    }
}

fn unary(op: UnaryOperator, operand: Expr) -> Expr {
    Expr::new(
        op.output_type(operand.declared_type()),
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
    )
}

fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::new(
        op.output_type(left.declared_type().or_else(|| right.declared_type())),
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
    )
}

fn arithmetic(op: BinaryOperator, left: Expr, right: Expr) -> CriteriaResult<Expr> {
    let checker = TypeChecker::new(op.as_str());
    checker.numeric(&left)?;
    checker.numeric(&right)?;
    Ok(binary(op, left, right))
}

fn count(operand: Expr, distinct: bool) -> Expr {
    Expr::new(
        Some(ValueType::Int64),
        ExprKind::Count {
            operand: Box::new(operand),
            distinct,
        },
    )
}

fn comparison(op: ComparisonOperator, left: Expr, right: Expr) -> CriteriaResult<Predicate> {
    let checker = TypeChecker::new(op.as_str());
    if op.is_ordering() {
        checker.ordered(&left)?;
        checker.ordered(&right)?;
    }
    checker.compatible(&left, &right)?;

    Ok(Predicate::new(PredicateKind::Comparison {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

fn null_test(operand: Expr, negated: bool) -> Predicate {
    Predicate::new(PredicateKind::IsNull {
        operand: Box::new(operand),
        negated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::error::CriteriaError;
    use crate::criteria::operator::BooleanOperator;
    use crate::metamodel::{EntityType, StaticMetamodel};

    fn model() -> StaticMetamodel {
        StaticMetamodel::new().with_entity(
            EntityType::new("Employee")
                .with_basic("name", ValueType::String)
                .with_basic("age", ValueType::Int32)
                .with_basic("salary", ValueType::Double)
                .with_element_collection("skills", ValueType::String),
        )
    }

    #[test]
    fn test_result_types() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let e = cb.root("Employee").unwrap();
        let age = cb.get(&e, "age").unwrap();
        let salary = cb.get(&e, "salary").unwrap();

        assert_eq!(cb.abs(-5).unwrap().declared_type(), Some(&ValueType::Int32));
        assert_eq!(cb.avg(&age).unwrap().declared_type(), Some(&ValueType::Double));
        assert_eq!(cb.sqrt(&age).unwrap().declared_type(), Some(&ValueType::Double));
        assert_eq!(cb.max(&salary).unwrap().declared_type(), Some(&ValueType::Double));
        assert_eq!(cb.count(&e).declared_type(), Some(&ValueType::Int64));
        assert_eq!(
            cb.cast(&age, ValueType::String).declared_type(),
            Some(&ValueType::String)
        );
        assert_eq!(cb.prod(&salary, 2).unwrap().declared_type(), Some(&ValueType::Double));
        assert_eq!(cb.modulo(&age, 7).unwrap().declared_type(), Some(&ValueType::Int32));
        assert_eq!(cb.add(&age, 1).unwrap().declared_type(), Some(&ValueType::Int32));
        assert_eq!(cb.current_date().declared_type(), Some(&ValueType::Date));
        assert_eq!(
            cb.size(cb.get(&e, "skills").unwrap()).unwrap().declared_type(),
            Some(&ValueType::Int32)
        );
    }

    #[test]
    fn test_value_operand_overloads() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        assert_eq!(cb.concat(&name, "!").unwrap().to_string(), "concat(Employee.name, \"!\")");
        assert_eq!(cb.concat("Mr. ", &name).unwrap().to_string(), "concat(\"Mr. \", Employee.name)");
        assert_eq!(cb.diff(10, 3).unwrap().to_string(), "diff(10, 3)");
    }

    #[test]
    fn test_type_mismatch_at_construction() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let e = cb.root("Employee").unwrap();
        let name = cb.get(&e, "name").unwrap();
        let age = cb.get(&e, "age").unwrap();

        assert!(matches!(cb.abs(&name), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.concat(&age, "x"), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.equal(&age, "x"), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.greater_than(true, false), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.modulo(1.5, 2), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.size(&name), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.trim_char("*", &name), Err(CriteriaError::TypeMismatch { .. })));
        assert!(matches!(cb.is_true(&age), Err(CriteriaError::TypeMismatch { .. })));
    }

    #[test]
    fn test_null_operands_are_accepted() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);

        assert!(cb.abs(Expr::null()).is_ok());
        assert!(cb.equal(1, Expr::null()).is_ok());
        assert!(cb.concat(cb.null_literal(ValueType::String), "x").is_ok());
    }

    #[test]
    fn test_between_desugars() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let age = cb.get(&cb.root("Employee").unwrap(), "age").unwrap();

        let between = cb.between(&age, 18, 65).unwrap();
        assert_eq!(between.operator(), BooleanOperator::And);
        assert_eq!(between.to_string(), "(Employee.age >= 18 AND Employee.age <= 65)");
        assert!(cb.between(&age, "a", "z").is_err());
    }

    #[test]
    fn test_negated_forms() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let e = cb.root("Employee").unwrap();
        let skills = cb.get(&e, "skills").unwrap();

        let not_member = cb.is_not_member("rust", &skills).unwrap();
        assert_eq!(not_member.operator(), BooleanOperator::Not);
        assert_eq!(not_member.to_string(), "NOT \"rust\" MEMBER OF Employee.skills");

        assert_eq!(cb.is_not_empty(&skills).unwrap().operator(), BooleanOperator::Not);
        assert_eq!(cb.is_not_null(&e).to_string(), "Employee IS NOT NULL");
        assert!(cb.is_member(1, &skills).is_err());
    }

    #[test]
    fn test_like_default_escape() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        match cb.like(&name, "A%").unwrap().kind() {
            PredicateKind::Like { escape, .. } => {
                assert_eq!(escape.as_constant(), Some(&Datum::Character(' ')))
            }
            other => panic!("expected LIKE, got {:?}", other),
        }
        assert_eq!(
            cb.like(&name, "A%").unwrap().to_string(),
            "Employee.name LIKE \"A%\" ESCAPE ' '"
        );
    }

    #[test]
    fn test_like_escape_must_be_a_character() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        assert!(cb.like_escape_expr(&name, "A!%", cb.literal('!')).is_ok());
        assert!(matches!(
            cb.like_escape_expr(&name, "A!%", &name),
            Err(CriteriaError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_substring_arities() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        assert_eq!(cb.substring(&name, 2).unwrap().to_string(), "substring(Employee.name, 2)");
        assert_eq!(
            cb.substring_len(&name, 2, 3).unwrap().to_string(),
            "substring(Employee.name, 2, 3)"
        );
        assert_eq!(
            cb.substring_parts(&name, None, None).unwrap().to_string(),
            "substring(Employee.name)"
        );
        assert!(cb.substring(&name, "2").is_err());
    }

    #[test]
    fn test_trim_defaults() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);

        assert_eq!(cb.trim(" x ").unwrap().to_string(), "trim(BOTH ' ' from \" x \")");
        assert_eq!(
            cb.trim_spec(TrimSpec::Trailing, "x").unwrap().to_string(),
            "trim(TRAILING ' ' from \"x\")"
        );
        assert_eq!(cb.trim_char('*', "*x").unwrap().to_string(), "trim(BOTH '*' from \"*x\")");
    }

    #[test]
    fn test_size_of_literal_collection() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let size = cb.size_of(vec![1, 2, 3]).unwrap();
        assert_eq!(size.to_string(), "size([1, 2, 3])");
    }

    #[test]
    fn test_unknown_entity() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        assert_eq!(
            cb.root("Department").unwrap_err(),
            CriteriaError::UnknownEntity {
                name: "Department".to_string()
            }
        );
    }
}
