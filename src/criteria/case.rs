//! Accumulating nodes: CASE, simple CASE, COALESCE and IN.
//!
//! Each node collects its entries through fluent mutators. Entries keep
//! insertion order, and lowering emits them in that order.

use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::criteria::expr::Expr;
use crate::criteria::predicate::{Predicate, PredicateKind};
use crate::criteria::type_checker::TypeChecker;
use crate::types::{Datum, ValueType};
use std::fmt;

/// Adopt the operand's type when no result type is known yet
fn adopt_type(result_type: &mut Option<ValueType>, operand: &Expr) {
    if result_type.is_none() {
        *result_type = operand.declared_type().cloned();
    }
}

/// General CASE: `WHEN condition THEN result ... ELSE otherwise`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Case {
    whens: Vec<(Predicate, Expr)>,
    otherwise: Option<Box<Expr>>,
    result_type: Option<ValueType>,
}

impl Case {
    /// Untyped CASE; the type is taken from the first typed branch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed(result_type: ValueType) -> Self {
        Self {
            result_type: Some(result_type),
            ..Self::default()
        }
    }

    pub fn when(mut self, condition: Predicate, then: impl Into<Expr>) -> CriteriaResult<Self> {
        let then = then.into();
        TypeChecker::new("case").conforms(self.result_type.as_ref(), &then)?;
        adopt_type(&mut self.result_type, &then);
        self.whens.push((condition, then));
        Ok(self)
    }

    pub fn otherwise(mut self, otherwise: impl Into<Expr>) -> CriteriaResult<Self> {
        let otherwise = otherwise.into();
        TypeChecker::new("case").conforms(self.result_type.as_ref(), &otherwise)?;
        adopt_type(&mut self.result_type, &otherwise);
        self.otherwise = Some(Box::new(otherwise));
        Ok(self)
    }

    pub fn result_type(&self) -> Option<&ValueType> {
        self.result_type.as_ref()
    }

    pub fn whens(&self) -> &[(Predicate, Expr)] {
        &self.whens
    }

    pub fn otherwise_expr(&self) -> Option<&Expr> {
        self.otherwise.as_deref()
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE")?;
        for (condition, then) in &self.whens {
            write!(f, " WHEN {} THEN {}", condition, then)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " ELSE {}", otherwise)?;
        }
        write!(f, " END")
    }
}

/// Simple CASE: `CASE operand WHEN key THEN result ... ELSE otherwise`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimpleCase {
    operand: Option<Box<Expr>>,
    whens: Vec<(Datum, Expr)>,
    otherwise: Option<Box<Expr>>,
    result_type: Option<ValueType>,
}

impl SimpleCase {
    /// Simple CASE over the given operand
    pub fn new(operand: impl Into<Expr>) -> Self {
        Self {
            operand: Some(Box::new(operand.into())),
            ..Self::default()
        }
    }

    /// Simple CASE with a declared result type and no operand yet
    pub fn typed(result_type: ValueType) -> Self {
        Self {
            result_type: Some(result_type),
            ..Self::default()
        }
    }

    /// Set the operand, checking the keys already added against it
    pub fn operand(mut self, operand: impl Into<Expr>) -> CriteriaResult<Self> {
        let operand = operand.into();
        let checker = TypeChecker::new("simple case");
        for key_type in self.whens.iter().filter_map(|(key, _)| key.value_type()) {
            checker.conforms(Some(&key_type), &operand)?;
        }
        self.operand = Some(Box::new(operand));
        Ok(self)
    }

    pub fn when(mut self, key: impl Into<Datum>, then: impl Into<Expr>) -> CriteriaResult<Self> {
        let key = key.into();
        let then = then.into();
        let checker = TypeChecker::new("simple case");

        if let (Some(operand), Some(key_type)) = (self.operand.as_deref(), key.value_type()) {
            checker.conforms(Some(&key_type), operand)?;
        }
        checker.conforms(self.result_type.as_ref(), &then)?;
        adopt_type(&mut self.result_type, &then);

        self.whens.push((key, then));
        Ok(self)
    }

    pub fn otherwise(mut self, otherwise: impl Into<Expr>) -> CriteriaResult<Self> {
        let otherwise = otherwise.into();
        TypeChecker::new("simple case").conforms(self.result_type.as_ref(), &otherwise)?;
        adopt_type(&mut self.result_type, &otherwise);
        self.otherwise = Some(Box::new(otherwise));
        Ok(self)
    }

    pub fn result_type(&self) -> Option<&ValueType> {
        self.result_type.as_ref()
    }

    pub fn case_operand(&self) -> Option<&Expr> {
        self.operand.as_deref()
    }

    pub fn whens(&self) -> &[(Datum, Expr)] {
        &self.whens
    }

    pub fn otherwise_expr(&self) -> Option<&Expr> {
        self.otherwise.as_deref()
    }
}

impl fmt::Display for SimpleCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {}", operand)?;
        }
        for (key, then) in &self.whens {
            write!(f, " WHEN {} THEN {}", key, then)?;
        }
        if let Some(otherwise) = &self.otherwise {
            write!(f, " ELSE {}", otherwise)?;
        }
        write!(f, " END")
    }
}

/// COALESCE: first non-null of its values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coalesce {
    values: Vec<Expr>,
    result_type: Option<ValueType>,
}

impl Coalesce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed(result_type: ValueType) -> Self {
        Self {
            result_type: Some(result_type),
            values: Vec::new(),
        }
    }

    pub fn value(mut self, value: impl Into<Expr>) -> CriteriaResult<Self> {
        let value = value.into();
        TypeChecker::new("coalesce").conforms(self.result_type.as_ref(), &value)?;
        adopt_type(&mut self.result_type, &value);
        self.values.push(value);
        Ok(self)
    }

    pub fn result_type(&self) -> Option<&ValueType> {
        self.result_type.as_ref()
    }

    pub fn values(&self) -> &[Expr] {
        &self.values
    }
}

impl fmt::Display for Coalesce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coalesce(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// IN: operand equal to one of the values, and not null
#[derive(Debug, Clone, PartialEq)]
pub struct In {
    operand: Box<Expr>,
    values: Vec<Expr>,
}

impl In {
    pub fn new(operand: impl Into<Expr>) -> Self {
        Self {
            operand: Box::new(operand.into()),
            values: Vec::new(),
        }
    }

    pub fn value(mut self, value: impl Into<Expr>) -> CriteriaResult<Self> {
        let value = value.into();
        TypeChecker::new("in").compatible(&self.operand, &value)?;
        self.values.push(value);
        Ok(self)
    }

    /// Add every value of a collection
    pub fn values<T: Into<Expr>>(
        self,
        values: impl IntoIterator<Item = T>,
    ) -> CriteriaResult<Self> {
        values.into_iter().try_fold(self, |acc, value| acc.value(value))
    }

    pub fn operand(&self) -> &Expr {
        &self.operand
    }

    pub fn value_list(&self) -> &[Expr] {
        &self.values
    }
}

impl fmt::Display for In {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IN (", self.operand)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

impl From<In> for Predicate {
    fn from(in_list: In) -> Self {
        Predicate::new(PredicateKind::In(in_list))
    }
}

/// Reject a node that cannot be lowered because an accumulator is empty
pub(crate) fn require_entries<T>(
    entries: &[T],
    node: &impl fmt::Display,
    what: &str,
) -> CriteriaResult<()> {
    if entries.is_empty() {
        return Err(CriteriaError::incomplete(node, format!("no {}", what)));
    }
    Ok(())
}
