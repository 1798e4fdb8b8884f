//! Lowering of criteria trees to the kernel AST.
//!
//! The lowerer walks a criteria tree and rebuilds it through an
//! `ExpressionFactory`:
//! 1. Value nodes -> kernel `Value`, with the declared type and alias copied
//!    onto the result header
//! 2. Predicate nodes -> kernel `Expression`
//! 3. Roots and joins -> `bindVariable` conditions for the query filter
//!
//! Lowering never mutates the tree, and every call allocates fresh kernel
//! nodes, so the same tree may be lowered repeatedly.

use crate::criteria::case::{require_entries, Case, Coalesce, In, SimpleCase};
use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::criteria::expr::{Expr, ExprKind};
use crate::criteria::operator::{BinaryOperator, ComparisonOperator, UnaryOperator};
use crate::criteria::options::{LiteralClassification, LoweringOptions, MemberOfLowering};
use crate::criteria::order::Order;
use crate::criteria::path::{Path, PathKind};
use crate::criteria::predicate::{Predicate, PredicateKind};
use crate::kernel::{
    convert_substring_arguments, Expression, ExpressionFactory, KernelResult, LiteralKind,
    Temporal, Value,
};
use crate::metamodel::Metamodel;
use crate::types::{Datum, ValueType};
use std::collections::HashSet;

/// LIKE wildcard matching exactly one character
const SINGLE_CHAR_WILDCARD: &str = "_";

/// LIKE wildcard matching any run of characters
const MULTI_CHAR_WILDCARD: &str = "%";

/// Translates criteria nodes into kernel values and conditions
pub struct Lowerer<'a, F: ?Sized, M: ?Sized> {
    factory: &'a F,
    model: &'a M,
    options: LoweringOptions,
    /// Aliases bound so far by roots and joins
    bindings: HashSet<String>,
    /// Alias of the first bound root, which stands for the candidate
    candidate: Option<String>,
}

impl<'a, F, M> Lowerer<'a, F, M>
where
    F: ExpressionFactory + ?Sized,
    M: Metamodel + ?Sized,
{
    /// Create a lowerer with default options
    pub fn new(factory: &'a F, model: &'a M) -> Self {
        Self {
            factory,
            model,
            options: LoweringOptions::default(),
            bindings: HashSet::new(),
            candidate: None,
        }
    }

    pub fn with_options(mut self, options: LoweringOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoweringOptions {
        &self.options
    }

    /// Whether a root or join has bound the alias
    pub fn is_bound(&self, alias: &str) -> bool {
        self.bindings.contains(alias)
    }

    /// Lower a value node
    pub fn lower(&self, expr: &Expr) -> CriteriaResult<Value> {
        log::trace!("Lowering {} node {}", expr.kind.name(), expr);

        let mut value = self
            .lower_kind(expr)
            .map_err(|e| e.with_node(expr))?;

        if let Some(declared_type) = &expr.declared_type {
            value.set_implicit_type(declared_type.clone());
        }
        if let Some(alias) = &expr.alias {
            value.set_alias(alias.clone());
        }
        Ok(value)
    }

    /// Lower a predicate to a kernel condition
    pub fn lower_predicate(&self, predicate: &Predicate) -> CriteriaResult<Expression> {
        log::trace!("Lowering {:?} predicate {}", predicate.operator(), predicate);

        self.lower_predicate_kind(&predicate.kind)
            .map_err(|e| e.with_node(predicate))
    }

    /// Lower an ORDER BY item to its value and direction
    pub fn lower_order(&self, order: &Order) -> CriteriaResult<(Value, bool)> {
        Ok((self.lower(order.expr())?, order.is_ascending()))
    }

    /// Bind a root or join to a variable named by its alias.
    ///
    /// Returns the `bindVariable` condition; once bound, paths through the
    /// alias may be lowered.
    pub fn bind(&mut self, path: &Path) -> CriteriaResult<Expression> {
        let alias = path
            .alias()
            .ok_or_else(|| CriteriaError::incomplete(path, "no alias to bind"))?;

        let target = match path.kind() {
            PathKind::Root { entity } => self.root_value(entity),
            PathKind::Join {
                parent, attribute, ..
            } => self.navigate(path, parent, attribute),
            PathKind::Attribute { .. } => {
                return Err(CriteriaError::incomplete(
                    path,
                    "only roots and joins bind variables",
                ))
            }
        }
        .map_err(|e| e.with_node(path))?;

        let binding = self
            .factory
            .new_bound_variable(alias, path.value_type().clone())
            .and_then(|variable| self.factory.bind_variable(variable, target))
            .map_err(|e| CriteriaError::from(e).with_node(path))?;

        log::debug!("Bound alias '{}' to {}", alias, path);
        if path.is_root() && self.candidate.is_none() {
            self.candidate = Some(alias.to_string());
        }
        self.bindings.insert(alias.to_string());
        Ok(binding)
    }

    fn lower_kind(&self, expr: &Expr) -> CriteriaResult<Value> {
        let factory = self.factory;

        match &expr.kind {
            ExprKind::Constant(value) => self.literal(expr.declared_type(), value),
            ExprKind::Path(path) => self.lower_path(path),
            ExprKind::Unary { op, operand } => {
                let operand = self.lower(operand)?;
                let value = match op {
                    UnaryOperator::Abs => factory.abs(operand),
                    UnaryOperator::Avg => factory.avg(operand),
                    UnaryOperator::Sqrt => factory.sqrt(operand),
                    UnaryOperator::Max => factory.max(operand),
                    UnaryOperator::Min => factory.min(operand),
                    UnaryOperator::Size => factory.size(operand),
                }?;
                Ok(value)
            }
            ExprKind::Count { operand, distinct } => {
                let count = factory.count(self.lower(operand)?)?;
                if *distinct {
                    Ok(factory.distinct(count)?)
                } else {
                    Ok(count)
                }
            }
            ExprKind::Cast { operand, target } => {
                Ok(factory.cast(self.lower(operand)?, target.clone())?)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.lower(left)?;
                let right = self.lower(right)?;
                let value = match op {
                    BinaryOperator::Concat => factory.concat(left, right),
                    BinaryOperator::Product => factory.multiply(left, right),
                    BinaryOperator::Diff => factory.subtract(left, right),
                    BinaryOperator::Quotient => factory.divide(left, right),
                    BinaryOperator::Mod => factory.modulo(left, right),
                }?;
                Ok(value)
            }
            ExprKind::Sum { left, right } => {
                let left = self.lower(left)?;
                match right {
                    Some(right) => Ok(factory.add(left, self.lower(right)?)?),
                    None => Ok(factory.sum(left)?),
                }
            }
            ExprKind::Substring { string, from, len } => {
                let string = self.lower(string)?;
                let from = from.as_deref().map(|e| self.lower(e)).transpose()?;
                let len = len.as_deref().map(|e| self.lower(e)).transpose()?;
                Ok(convert_substring_arguments(factory, string, from, len)?)
            }
            ExprKind::Trim {
                string,
                character,
                spec,
            } => {
                let string = self.lower(string)?;
                let character = self.lower(character)?;
                Ok(factory.trim(string, character, spec.to_kernel())?)
            }
            ExprKind::Current(temporal) => {
                let value = match temporal {
                    Temporal::Date => factory.get_current_date(),
                    Temporal::Time => factory.get_current_time(),
                    Temporal::Timestamp => factory.get_current_timestamp(),
                }?;
                Ok(value)
            }
            ExprKind::Coalesce(coalesce) => self.lower_coalesce(coalesce),
            ExprKind::Case(case) => self.lower_case(case),
            ExprKind::SimpleCase(case) => self.lower_simple_case(case),
            ExprKind::Predicate(predicate) => {
                let condition = self.lower_predicate(predicate)?;
                Ok(factory.condition_value(condition)?)
            }
        }
    }

    /// Kernel literal for a domain value; NULL becomes the null sentinel
    fn literal(&self, declared: Option<&ValueType>, value: &Datum) -> CriteriaResult<Value> {
        if value.is_null() {
            return Ok(self.factory.get_null()?);
        }
        let kind = self.literal_kind(declared, value);
        Ok(self.factory.new_literal(value.clone(), kind)?)
    }

    fn literal_kind(&self, declared: Option<&ValueType>, value: &Datum) -> LiteralKind {
        if self.options.literal_classification == LiteralClassification::LegacyNumber {
            return LiteralKind::Number;
        }

        let value_type = declared
            .filter(|t| **t != ValueType::Object)
            .cloned()
            .or_else(|| value.value_type());

        match value_type {
            Some(t) if t.is_numeric() => LiteralKind::Number,
            Some(t) if t.is_textual() => LiteralKind::String,
            Some(ValueType::Boolean) => LiteralKind::Boolean,
            _ => LiteralKind::Object,
        }
    }

    fn lower_path(&self, path: &Path) -> CriteriaResult<Value> {
        match path.kind() {
            PathKind::Root { entity } => match path.alias() {
                Some(alias) if self.is_bound(alias) && !self.is_candidate(alias) => {
                    self.model.require_entity(entity)?;
                    self.variable_path(path, alias)
                }
                _ => self.root_value(entity),
            },
            PathKind::Attribute { parent, attribute } => self.navigate(path, parent, attribute),
            PathKind::Join { .. } => {
                let alias = path
                    .alias()
                    .ok_or_else(|| CriteriaError::incomplete(path, "join has no alias"))?;
                if !self.is_bound(alias) {
                    return Err(CriteriaError::unbound(alias, path));
                }
                self.variable_path(path, alias)
            }
        }
    }

    fn is_candidate(&self, alias: &str) -> bool {
        self.candidate.as_deref() == Some(alias)
    }

    /// Path rooted at the variable bound to `alias`
    fn variable_path(&self, path: &Path, alias: &str) -> CriteriaResult<Value> {
        let variable = self
            .factory
            .new_bound_variable(alias, path.value_type().clone())?;
        Ok(self.factory.new_path_from(variable)?)
    }

    /// Fresh candidate path carrying the entity metadata
    fn root_value(&self, entity: &str) -> CriteriaResult<Value> {
        let entity = self.model.require_entity(entity)?;
        let mut value = self.factory.new_path()?;
        value.set_metadata(entity.name());
        Ok(value)
    }

    /// Parent path extended with the attribute segment of `path`
    fn navigate(&self, path: &Path, parent: &Path, attribute: &str) -> CriteriaResult<Value> {
        let owner = path
            .owner_entity()
            .ok_or_else(|| CriteriaError::incomplete(path, "parent is not an entity"))?;
        let attr = self.model.require_attribute(owner, attribute)?;

        let mut value = self.factory.traverse(self.lower_path(parent)?, attribute)?;
        if let Some(target) = attr.target_entity() {
            value.set_metadata(target);
        }
        Ok(value)
    }

    fn lower_coalesce(&self, coalesce: &Coalesce) -> CriteriaResult<Value> {
        require_entries(coalesce.values(), coalesce, "values")?;

        let values = coalesce
            .values()
            .iter()
            .map(|value| self.lower(value))
            .collect::<CriteriaResult<Vec<_>>>()?;
        Ok(self.factory.coalesce_expression(values)?)
    }

    fn lower_case(&self, case: &Case) -> CriteriaResult<Value> {
        require_entries(case.whens(), case, "when branches")?;

        let mut whens = Vec::with_capacity(case.whens().len());
        for (condition, then) in case.whens() {
            let condition = self.lower_predicate(condition)?;
            let action = self.lower(then)?;
            whens.push(self.factory.when_condition(condition, action)?);
        }
        let otherwise = self.lower_otherwise(case.otherwise_expr())?;
        Ok(self.factory.general_case_expression(whens, otherwise)?)
    }

    fn lower_simple_case(&self, case: &SimpleCase) -> CriteriaResult<Value> {
        let operand = case
            .case_operand()
            .ok_or_else(|| CriteriaError::incomplete(case, "no case operand"))?;
        require_entries(case.whens(), case, "when branches")?;

        let operand_value = self.lower(operand)?;
        let mut whens = Vec::with_capacity(case.whens().len());
        for (key, then) in case.whens() {
            let scalar = self.literal(operand.declared_type(), key)?;
            let action = self.lower(then)?;
            whens.push(self.factory.when_scalar(scalar, action)?);
        }
        let otherwise = self.lower_otherwise(case.otherwise_expr())?;
        Ok(self
            .factory
            .simple_case_expression(operand_value, whens, otherwise)?)
    }

    fn lower_otherwise(&self, otherwise: Option<&Expr>) -> CriteriaResult<Value> {
        match otherwise {
            Some(otherwise) => self.lower(otherwise),
            None => Ok(self.factory.get_null()?),
        }
    }

    fn lower_predicate_kind(&self, kind: &PredicateKind) -> CriteriaResult<Expression> {
        let factory = self.factory;

        match kind {
            PredicateKind::And(children) => match self.fold(children, |l, r| factory.and(l, r))? {
                Some(expr) => Ok(expr),
                None => Ok(factory.empty_expression()?),
            },
            PredicateKind::Or(children) => match self.fold(children, |l, r| factory.or(l, r))? {
                Some(expr) => Ok(expr),
                None => Ok(factory.not(factory.empty_expression()?)?),
            },
            PredicateKind::Not(inner) => Ok(factory.not(self.lower_predicate(inner)?)?),
            PredicateKind::Comparison { op, left, right } => {
                let left = self.lower(left)?;
                let right = self.lower(right)?;
                self.compare(*op, left, right)
            }
            PredicateKind::IsNull { operand, negated } => {
                let operand = self.lower(operand)?;
                let null = factory.get_null()?;
                if *negated {
                    Ok(factory.not_equal(operand, null)?)
                } else {
                    Ok(factory.equal(operand, null)?)
                }
            }
            PredicateKind::IsEmpty(collection) => Ok(factory.is_empty(self.lower(collection)?)?),
            PredicateKind::IsMember {
                element,
                collection,
            } => {
                let element = match self.options.member_of {
                    MemberOfLowering::Element => self.lower(element)?,
                    MemberOfLowering::LegacyThis => factory.get_this()?,
                };
                Ok(factory.contains(element, self.lower(collection)?)?)
            }
            PredicateKind::Like {
                string,
                pattern,
                escape,
            } => {
                let string = self.lower(string)?;
                let pattern = self.lower(pattern)?;
                let escape = self.escape_text(escape)?;
                Ok(factory.matches(
                    string,
                    pattern,
                    SINGLE_CHAR_WILDCARD,
                    MULTI_CHAR_WILDCARD,
                    &escape,
                )?)
            }
            PredicateKind::In(in_list) => self.lower_in(in_list),
            PredicateKind::Condition(expr) => {
                let value = self.lower(expr)?;
                let truth = factory.new_literal(Datum::Boolean(true), LiteralKind::Boolean)?;
                Ok(factory.equal(value, truth)?)
            }
        }
    }

    /// Raw character of a literal escape; any other value is passed as rendered
    fn escape_text(&self, escape: &Expr) -> CriteriaResult<String> {
        let value = self.lower(escape)?;
        Ok(match value.as_literal() {
            Some(literal) => literal.value.to_text(),
            None => value.to_string(),
        })
    }

    /// `(e = v1 OR e = v2 ...) AND e IS NOT NULL`
    fn lower_in(&self, in_list: &In) -> CriteriaResult<Expression> {
        let factory = self.factory;

        let mut any: Option<Expression> = None;
        for value in in_list.value_list() {
            let equal = factory.equal(self.lower(in_list.operand())?, self.lower(value)?)?;
            any = Some(match any {
                Some(acc) => factory.or(acc, equal)?,
                None => equal,
            });
        }
        let any = match any {
            Some(any) => any,
            None => factory.not(factory.empty_expression()?)?,
        };

        let not_null = factory.not_equal(self.lower(in_list.operand())?, factory.get_null()?)?;
        Ok(factory.and(any, not_null)?)
    }

    fn compare(
        &self,
        op: ComparisonOperator,
        left: Value,
        right: Value,
    ) -> CriteriaResult<Expression> {
        let factory = self.factory;
        let expr = match op {
            ComparisonOperator::Equal => factory.equal(left, right),
            ComparisonOperator::NotEqual => factory.not_equal(left, right),
            ComparisonOperator::GreaterThan => factory.greater_than(left, right),
            ComparisonOperator::GreaterThanEqual => factory.greater_than_equal(left, right),
            ComparisonOperator::LessThan => factory.less_than(left, right),
            ComparisonOperator::LessThanEqual => factory.less_than_equal(left, right),
        }?;
        Ok(expr)
    }

    /// Left fold of the lowered children; `None` when there are none
    fn fold(
        &self,
        children: &[Predicate],
        combine: impl Fn(Expression, Expression) -> KernelResult<Expression>,
    ) -> CriteriaResult<Option<Expression>> {
        let mut acc: Option<Expression> = None;
        for child in children {
            let lowered = self.lower_predicate(child)?;
            acc = Some(match acc {
                Some(left) => combine(left, lowered)?,
                None => lowered,
            });
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::builder::CriteriaBuilder;
    use crate::criteria::path::JoinType;
    use crate::kernel::{AstFactory, KernelError, ValueOp};
    use crate::metamodel::{EntityType, StaticMetamodel};

    fn model() -> StaticMetamodel {
        StaticMetamodel::new()
            .with_entity(
                EntityType::new("Employee")
                    .with_basic("name", ValueType::String)
                    .with_basic("age", ValueType::Int32)
                    .with_basic("active", ValueType::Boolean)
                    .with_to_one("department", "Department")
                    .with_element_collection("skills", ValueType::String),
            )
            .with_entity(
                EntityType::new("Department")
                    .with_basic("name", ValueType::String)
                    .with_to_many("employees", "Employee"),
            )
    }

    /// Factory that realizes literals and paths only
    struct PathsOnly;

    impl ExpressionFactory for PathsOnly {
        fn new_literal(&self, value: Datum, kind: LiteralKind) -> KernelResult<Value> {
            AstFactory.new_literal(value, kind)
        }

        fn new_path(&self) -> KernelResult<Value> {
            AstFactory.new_path()
        }

        fn traverse(&self, path: Value, attribute: &str) -> KernelResult<Value> {
            AstFactory.traverse(path, attribute)
        }
    }

    fn literal_kind(value: &Value) -> LiteralKind {
        value.as_literal().map(|lit| lit.kind).unwrap_or(LiteralKind::Object)
    }

    #[test]
    fn test_type_and_alias_are_copied() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);

        let abs = cb.abs(-5).unwrap().with_alias("magnitude");
        let value = lowerer.lower(&abs).unwrap();
        assert_eq!(value.to_string(), "abs(literal(-5))");
        assert_eq!(value.implicit_type, Some(ValueType::Int32));
        assert_eq!(value.alias.as_deref(), Some("magnitude"));

        let null = lowerer.lower(&Expr::null()).unwrap();
        assert!(null.is_null());
        assert!(null.implicit_type.is_none());
    }

    #[test]
    fn test_literal_classification() {
        let model = model();
        let lowerer = Lowerer::new(&AstFactory, &model);

        let kind = |expr: Expr| literal_kind(&lowerer.lower(&expr).unwrap());
        assert_eq!(kind(Expr::from(1)), LiteralKind::Number);
        assert_eq!(kind(Expr::from(2.5)), LiteralKind::Number);
        assert_eq!(kind(Expr::from("a")), LiteralKind::String);
        assert_eq!(kind(Expr::from('a')), LiteralKind::String);
        assert_eq!(kind(Expr::from(true)), LiteralKind::Boolean);
        assert_eq!(
            kind(Expr::typed_constant(ValueType::Date, "2024-01-01")),
            LiteralKind::Object
        );
        assert_eq!(
            kind(Expr::typed_constant(ValueType::Object, "x")),
            LiteralKind::String
        );

        let legacy = Lowerer::new(&AstFactory, &model).with_options(
            LoweringOptions::new().with_literal_classification(LiteralClassification::LegacyNumber),
        );
        let value = legacy.lower(&Expr::from("a")).unwrap();
        assert_eq!(literal_kind(&value), LiteralKind::Number);
    }

    #[test]
    fn test_paths_carry_metadata() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let e = cb.root("Employee").unwrap();

        let root = lowerer.lower(&Expr::from(&e)).unwrap();
        assert_eq!(root.metadata.as_deref(), Some("Employee"));
        assert_eq!(root.implicit_type, Some(ValueType::Entity("Employee".to_string())));

        let dept = lowerer.lower(&Expr::from(cb.get(&e, "department").unwrap())).unwrap();
        assert_eq!(dept.to_string(), "path(department)");
        assert_eq!(dept.metadata.as_deref(), Some("Department"));

        let dept_name = cb
            .get(&cb.get(&e, "department").unwrap(), "name")
            .unwrap();
        let value = lowerer.lower(&Expr::from(dept_name)).unwrap();
        assert_eq!(value.to_string(), "path(department.name)");
        assert_eq!(value.implicit_type, Some(ValueType::String));
        assert!(value.metadata.is_none());
    }

    #[test]
    fn test_join_requires_binding() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let mut lowerer = Lowerer::new(&AstFactory, &model);

        let d = cb.root("Department").unwrap().with_alias("d");
        let x = d
            .join(&model, "employees", JoinType::Inner)
            .unwrap()
            .with_alias("x");
        let name = Expr::from(cb.get(&x, "name").unwrap());

        assert_eq!(
            lowerer.lower(&name).unwrap_err(),
            CriteriaError::UnboundAlias {
                alias: "x".to_string(),
                node: "x".to_string(),
            }
        );

        let root_binding = lowerer.bind(&d).unwrap();
        assert_eq!(root_binding.to_string(), "bindVariable(var(d), path(Department))");
        let join_binding = lowerer.bind(&x).unwrap();
        assert_eq!(join_binding.to_string(), "bindVariable(var(x), path(employees))");
        assert!(lowerer.is_bound("x"));

        let value = lowerer.lower(&name).unwrap();
        assert_eq!(value.to_string(), "path(x.name)");
    }

    #[test]
    fn test_bind_rejects_unaliased_and_attribute_paths() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let mut lowerer = Lowerer::new(&AstFactory, &model);
        let e = cb.root("Employee").unwrap();

        assert!(matches!(
            lowerer.bind(&e),
            Err(CriteriaError::IncompleteExpression { .. })
        ));
        let name = cb.get(&e, "name").unwrap().with_alias("n");
        assert!(matches!(
            lowerer.bind(&name),
            Err(CriteriaError::IncompleteExpression { .. })
        ));
    }

    #[test]
    fn test_empty_connectives() {
        let model = model();
        let lowerer = Lowerer::new(&AstFactory, &model);

        let always = lowerer.lower_predicate(&Predicate::conjunction()).unwrap();
        assert_eq!(always, Expression::Empty);
        let never = lowerer.lower_predicate(&Predicate::disjunction()).unwrap();
        assert_eq!(never.to_string(), "not(empty())");
    }

    #[test]
    fn test_connectives_fold_left() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);

        let p = cb
            .or_any(vec![
                cb.equal(1, 1).unwrap(),
                cb.equal(2, 2).unwrap(),
                cb.equal(3, 3).unwrap(),
            ])
            .not();
        assert_eq!(
            lowerer.lower_predicate(&p).unwrap().to_string(),
            "not(or(or(equal(literal(1), literal(1)), equal(literal(2), literal(2))), \
             equal(literal(3), literal(3))))"
        );

        let single = cb.and_all(vec![cb.equal(1, 1).unwrap()]);
        assert_eq!(
            lowerer.lower_predicate(&single).unwrap().to_string(),
            "equal(literal(1), literal(1))"
        );
    }

    #[test]
    fn test_null_tests_use_null_sentinel() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        assert_eq!(
            lowerer.lower_predicate(&cb.is_null(&name)).unwrap().to_string(),
            "equal(path(name), null)"
        );
        assert_eq!(
            lowerer.lower_predicate(&cb.is_not_null(&name)).unwrap().to_string(),
            "notEqual(path(name), null)"
        );
    }

    #[test]
    fn test_member_of_lowering() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let skills = cb.get(&cb.root("Employee").unwrap(), "skills").unwrap();
        let member = cb.is_member("rust", &skills).unwrap();

        let lowerer = Lowerer::new(&AstFactory, &model);
        assert_eq!(
            lowerer.lower_predicate(&member).unwrap().to_string(),
            "contains(literal(\"rust\"), path(skills))"
        );

        let legacy = Lowerer::new(&AstFactory, &model)
            .with_options(LoweringOptions::new().with_member_of(MemberOfLowering::LegacyThis));
        assert_eq!(
            legacy.lower_predicate(&member).unwrap().to_string(),
            "contains(this, path(skills))"
        );

        let empty = cb.is_empty(&skills).unwrap();
        assert_eq!(
            lowerer.lower_predicate(&empty).unwrap().to_string(),
            "isEmpty(path(skills))"
        );
    }

    #[test]
    fn test_case_branches_keep_order() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let age = cb.get(&cb.root("Employee").unwrap(), "age").unwrap();

        let case = cb
            .select_case()
            .when(cb.less_than(&age, 18).unwrap(), "minor")
            .unwrap()
            .when(cb.greater_than(&age, 65).unwrap(), "senior")
            .unwrap();

        let value = lowerer.lower(&Expr::from(case.clone())).unwrap();
        assert_eq!(
            value.to_string(),
            "case(whenCondition(lessThan(path(age), literal(18)), literal(\"minor\")), \
             whenCondition(greaterThan(path(age), literal(65)), literal(\"senior\")), \
             else null)"
        );
        assert_eq!(value.implicit_type, Some(ValueType::String));

        let value = lowerer
            .lower(&Expr::from(case.otherwise("adult").unwrap()))
            .unwrap();
        assert!(value.to_string().ends_with("else literal(\"adult\"))"));
    }

    #[test]
    fn test_simple_case_keys_follow_operand_type() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();

        let case = cb
            .simple_case(&name)
            .when("A", 1)
            .unwrap()
            .when("B", 2)
            .unwrap()
            .otherwise(0)
            .unwrap();
        let value = lowerer.lower(&Expr::from(case)).unwrap();
        assert_eq!(
            value.to_string(),
            "case(path(name), whenScalar(literal(\"A\"), literal(1)), \
             whenScalar(literal(\"B\"), literal(2)), else literal(0))"
        );

        match &value.op {
            ValueOp::SimpleCase { whens, .. } => match &whens[0] {
                Expression::WhenScalar { scalar, .. } => {
                    assert_eq!(literal_kind(scalar), LiteralKind::String)
                }
                other => panic!("expected a scalar branch, got {}", other),
            },
            other => panic!("expected a simple case, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_accumulators() {
        let model = model();
        let lowerer = Lowerer::new(&AstFactory, &model);

        let no_values = Expr::from(Coalesce::new());
        assert!(matches!(
            lowerer.lower(&no_values),
            Err(CriteriaError::IncompleteExpression { .. })
        ));

        let no_whens = Expr::from(Case::typed(ValueType::String));
        assert!(matches!(
            lowerer.lower(&no_whens),
            Err(CriteriaError::IncompleteExpression { .. })
        ));

        let no_operand = SimpleCase::typed(ValueType::String).when(1, "one").unwrap();
        assert_eq!(
            lowerer.lower(&Expr::from(no_operand)).unwrap_err(),
            CriteriaError::IncompleteExpression {
                node: "CASE WHEN 1 THEN \"one\" END".to_string(),
                reason: "no case operand".to_string(),
            }
        );
    }

    #[test]
    fn test_predicate_in_value_position() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let e = cb.root("Employee").unwrap();

        let flag = Expr::from(cb.greater_than(cb.get(&e, "age").unwrap(), 40).unwrap());
        let value = lowerer.lower(&flag).unwrap();
        assert_eq!(value.to_string(), "condition(greaterThan(path(age), literal(40)))");
        assert_eq!(value.implicit_type, Some(ValueType::Boolean));

        let active = cb.is_true(cb.get(&e, "active").unwrap()).unwrap();
        assert_eq!(
            lowerer.lower_predicate(&active).unwrap().to_string(),
            "equal(path(active), literal(true))"
        );
    }

    #[test]
    fn test_factory_unsupported_names_innermost_node() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&PathsOnly, &model);
        let age = cb.get(&cb.root("Employee").unwrap(), "age").unwrap();

        let expr = cb.abs(cb.sqrt(&age).unwrap()).unwrap();
        assert_eq!(
            lowerer.lower(&expr).unwrap_err(),
            CriteriaError::FactoryUnsupported {
                node: "sqrt(Employee.age)".to_string(),
                source: KernelError::Unsupported {
                    operator: "sqrt".to_string(),
                },
            }
        );

        assert!(lowerer.lower(&Expr::from(&age)).is_ok());
    }

    #[test]
    fn test_relowering_yields_equal_trees() {
        let model = model();
        let cb = CriteriaBuilder::new(&model);
        let lowerer = Lowerer::new(&AstFactory, &model);
        let name = cb.get(&cb.root("Employee").unwrap(), "name").unwrap();
        let expr = cb.concat(cb.trim(&name).unwrap(), "!").unwrap();

        let mut first = lowerer.lower(&expr).unwrap();
        let second = lowerer.lower(&expr).unwrap();
        assert_eq!(first, second);

        first.set_alias("changed");
        assert_ne!(first, second);
        assert_eq!(lowerer.lower(&expr).unwrap(), second);
    }
}
