//! Criteria query composition and lowering to a kernel query description.

use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::criteria::expr::Expr;
use crate::criteria::lower::Lowerer;
use crate::criteria::options::LoweringOptions;
use crate::criteria::order::Order;
use crate::criteria::path::{Path, PathKind};
use crate::criteria::predicate::Predicate;
use crate::kernel::{Expression, ExpressionFactory, Value};
use crate::metamodel::Metamodel;
use std::fmt;

/// SELECT clause contents
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Single(Expr),
    Tuple(Vec<Expr>),
}

impl Selection {
    pub fn items(&self) -> Vec<&Expr> {
        match self {
            Selection::Single(expr) => vec![expr],
            Selection::Tuple(exprs) => exprs.iter().collect(),
        }
    }
}

/// Lowered query, ready for a planner
#[derive(Debug, Clone, PartialEq)]
pub struct KernelQuery {
    pub distinct: bool,
    pub projections: Vec<Value>,
    /// Variable bindings of every root and join, then the WHERE restrictions
    pub filter: Expression,
    pub grouping: Vec<Value>,
    pub having: Option<Expression>,
    /// Sort keys with their ascending flag
    pub ordering: Vec<(Value, bool)>,
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for KernelQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projections: ")?;
        if self.distinct {
            write!(f, "distinct ")?;
        }
        write_list(f, &self.projections)?;
        write!(f, "\nfilter: {}", self.filter)?;
        if !self.grouping.is_empty() {
            write!(f, "\ngrouping: ")?;
            write_list(f, &self.grouping)?;
        }
        if let Some(having) = &self.having {
            write!(f, "\nhaving: {}", having)?;
        }
        if !self.ordering.is_empty() {
            write!(f, "\nordering: ")?;
            for (i, (value, ascending)) in self.ordering.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} {}", value, if *ascending { "asc" } else { "desc" })?;
            }
        }
        Ok(())
    }
}

/// Query under construction: roots, joins and clauses
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaQuery {
    roots: Vec<Path>,
    joins: Vec<Path>,
    selection: Option<Selection>,
    distinct: bool,
    restrictions: Vec<Predicate>,
    grouping: Vec<Expr>,
    having: Option<Predicate>,
    orderings: Vec<Order>,
}

impl CriteriaQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root, aliasing it if it has no alias yet.
    ///
    /// Returns the registered root; paths should be navigated from it.
    pub fn from(&mut self, root: Path) -> CriteriaResult<Path> {
        if !root.is_root() {
            return Err(CriteriaError::type_mismatch(
                "from",
                &root,
                "root path",
                root.value_type().name(),
            ));
        }

        let root = self.register_alias(root, "r")?;
        self.roots.push(root.clone());
        Ok(root)
    }

    /// Register a join, aliasing it if it has no alias yet.
    ///
    /// Joins are bound in registration order, so a join over another join
    /// must be registered after it.
    pub fn join(&mut self, join: Path) -> CriteriaResult<Path> {
        if !join.is_join() {
            return Err(CriteriaError::type_mismatch(
                "join",
                &join,
                "join path",
                join.value_type().name(),
            ));
        }

        let join = self.register_alias(join, "j")?;
        self.joins.push(join.clone());
        Ok(join)
    }

    fn alias_in_use(&self, alias: &str) -> bool {
        self.roots
            .iter()
            .chain(&self.joins)
            .any(|path| path.alias() == Some(alias))
    }

    /// Reject an alias already taken by a root or join, or generate the
    /// first free `{prefix}{n}` when the path has none
    fn register_alias(&self, path: Path, prefix: &str) -> CriteriaResult<Path> {
        if let Some(alias) = path.alias() {
            if self.alias_in_use(alias) {
                return Err(CriteriaError::duplicate_alias(alias, &path));
            }
            return Ok(path);
        }

        let alias = (0..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|alias| !self.alias_in_use(alias))
            .unwrap_or_else(|| prefix.to_string());
        Ok(path.with_alias(alias))
    }

    pub fn select(&mut self, selection: impl Into<Expr>) -> &mut Self {
        self.selection = Some(Selection::Single(selection.into()));
        self
    }

    pub fn multiselect(&mut self, selections: Vec<Expr>) -> &mut Self {
        self.selection = Some(Selection::Tuple(selections));
        self
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    /// Add a WHERE restriction; restrictions are ANDed
    pub fn filter(&mut self, restriction: Predicate) -> &mut Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn group_by(&mut self, grouping: impl Into<Expr>) -> &mut Self {
        self.grouping.push(grouping.into());
        self
    }

    pub fn having(&mut self, having: Predicate) -> &mut Self {
        self.having = Some(having);
        self
    }

    pub fn order_by(&mut self, order: Order) -> &mut Self {
        self.orderings.push(order);
        self
    }

    pub fn roots(&self) -> &[Path] {
        &self.roots
    }

    pub fn joins(&self) -> &[Path] {
        &self.joins
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn restrictions(&self) -> &[Predicate] {
        &self.restrictions
    }

    pub fn grouping(&self) -> &[Expr] {
        &self.grouping
    }

    pub fn having_restriction(&self) -> Option<&Predicate> {
        self.having.as_ref()
    }

    pub fn orderings(&self) -> &[Order] {
        &self.orderings
    }

    pub fn orderings_mut(&mut self) -> &mut [Order] {
        &mut self.orderings
    }

    /// Lower every clause through the factory
    pub fn lower<F, M>(
        &self,
        factory: &F,
        model: &M,
        options: LoweringOptions,
    ) -> CriteriaResult<KernelQuery>
    where
        F: ExpressionFactory + ?Sized,
        M: Metamodel + ?Sized,
    {
        if self.roots.is_empty() {
            return Err(CriteriaError::incomplete(self, "no roots"));
        }

        let mut lowerer = Lowerer::new(factory, model).with_options(options);

        let mut conditions = Vec::with_capacity(self.roots.len() + self.joins.len());
        for path in self.roots.iter().chain(&self.joins) {
            conditions.push(lowerer.bind(path)?);
        }
        for restriction in &self.restrictions {
            conditions.push(lowerer.lower_predicate(restriction)?);
        }

        let mut filter: Option<Expression> = None;
        for condition in conditions {
            filter = Some(match filter {
                Some(left) => factory.and(left, condition)?,
                None => condition,
            });
        }
        let filter = match filter {
            Some(filter) => filter,
            None => factory.empty_expression()?,
        };

        let projections = match &self.selection {
            Some(selection) => selection
                .items()
                .into_iter()
                .map(|expr| lowerer.lower(expr))
                .collect::<CriteriaResult<Vec<_>>>()?,
            None => match self.roots.as_slice() {
                [root] => vec![lowerer.lower(&Expr::from(root))?],
                _ => {
                    return Err(CriteriaError::incomplete(
                        self,
                        "no selection over several roots",
                    ))
                }
            },
        };

        let grouping = self
            .grouping
            .iter()
            .map(|expr| lowerer.lower(expr))
            .collect::<CriteriaResult<Vec<_>>>()?;

        let having = self
            .having
            .as_ref()
            .map(|having| lowerer.lower_predicate(having))
            .transpose()?;

        let ordering = self
            .orderings
            .iter()
            .map(|order| lowerer.lower_order(order))
            .collect::<CriteriaResult<Vec<_>>>()?;

        log::debug!(
            "Lowered query with {} roots, {} joins, {} restrictions and {} orderings",
            self.roots.len(),
            self.joins.len(),
            self.restrictions.len(),
            self.orderings.len()
        );

        Ok(KernelQuery {
            distinct: self.distinct,
            projections,
            filter,
            grouping,
            having,
            ordering,
        })
    }
}

impl fmt::Display for CriteriaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        match &self.selection {
            Some(selection) => write_list(f, &selection.items())?,
            None => write!(f, "*")?,
        }

        write!(f, " FROM ")?;
        for (i, root) in self.roots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if let PathKind::Root { entity } = root.kind() {
                write!(f, "{} {}", entity, root)?;
            }
        }
        for join in &self.joins {
            if let PathKind::Join {
                parent, attribute, ..
            } = join.kind()
            {
                write!(f, " JOIN {}.{} {}", parent, attribute, join)?;
            }
        }

        if !self.restrictions.is_empty() {
            write!(f, " WHERE {}", Predicate::all(self.restrictions.clone()))?;
        }
        if !self.grouping.is_empty() {
            write!(f, " GROUP BY ")?;
            write_list(f, &self.grouping)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        if !self.orderings.is_empty() {
            write!(f, " ORDER BY ")?;
            write_list(f, &self.orderings)?;
        }
        Ok(())
    }
}
