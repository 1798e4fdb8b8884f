//! Roots, joins and attribute navigation.

use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::metamodel::{EntityType, Metamodel};
use crate::types::ValueType;
use std::fmt;

/// Join flavor; recorded on the kernel binding by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
}

/// Shape of a path node
#[derive(Debug, Clone, PartialEq)]
pub enum PathKind {
    /// Query root over an entity
    Root { entity: String },

    /// Attribute reached from the parent
    Attribute { parent: Box<Path>, attribute: String },

    /// Join over an association of the parent; binds its own variable
    Join {
        parent: Box<Path>,
        attribute: String,
        join_type: JoinType,
    },
}

/// Reference to an entity root or to an attribute navigated from one
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    kind: PathKind,
    alias: Option<String>,
    /// Declared type of the value this path denotes
    value_type: ValueType,
    /// Entity further navigation resolves attributes against
    target: Option<String>,
}

impl Path {
    /// Root over the given entity
    pub fn root(entity: &EntityType) -> Self {
        Self {
            kind: PathKind::Root {
                entity: entity.name().to_string(),
            },
            alias: None,
            value_type: entity.described_type(),
            target: Some(entity.name().to_string()),
        }
    }

    /// Navigate to an attribute
    pub fn get<M: Metamodel + ?Sized>(&self, model: &M, attribute: &str) -> CriteriaResult<Path> {
        let owner = self.navigable_entity("get", attribute)?;
        let attr = model.require_attribute(owner, attribute)?;

        Ok(Self {
            kind: PathKind::Attribute {
                parent: Box::new(self.clone()),
                attribute: attribute.to_string(),
            },
            alias: None,
            value_type: attr.value_type.clone(),
            target: attr.target_entity().map(str::to_string),
        })
    }

    /// Join over an association or element collection
    pub fn join<M: Metamodel + ?Sized>(
        &self,
        model: &M,
        attribute: &str,
        join_type: JoinType,
    ) -> CriteriaResult<Path> {
        let owner = self.navigable_entity("join", attribute)?;
        let attr = model.require_attribute(owner, attribute)?;

        Ok(Self {
            kind: PathKind::Join {
                parent: Box::new(self.clone()),
                attribute: attribute.to_string(),
                join_type,
            },
            alias: None,
            value_type: attr.join_type(),
            target: attr.target_entity().map(str::to_string),
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn kind(&self) -> &PathKind {
        &self.kind
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, PathKind::Root { .. })
    }

    pub fn is_join(&self) -> bool {
        matches!(self.kind, PathKind::Join { .. })
    }

    pub fn parent(&self) -> Option<&Path> {
        match &self.kind {
            PathKind::Root { .. } => None,
            PathKind::Attribute { parent, .. } | PathKind::Join { parent, .. } => Some(parent),
        }
    }

    /// Attribute segment, absent for roots
    pub fn segment(&self) -> Option<&str> {
        match &self.kind {
            PathKind::Root { .. } => None,
            PathKind::Attribute { attribute, .. } | PathKind::Join { attribute, .. } => {
                Some(attribute)
            }
        }
    }

    /// Root this path is navigated from
    pub fn root_path(&self) -> &Path {
        match self.parent() {
            Some(parent) => parent.root_path(),
            None => self,
        }
    }

    /// Entity whose attributes this path's segment belongs to
    pub(crate) fn owner_entity(&self) -> Option<&str> {
        self.parent().and_then(|parent| parent.target.as_deref())
    }

    pub(crate) fn target_entity(&self) -> Option<&str> {
        self.target.as_deref()
    }

    fn navigable_entity(&self, operator: &str, attribute: &str) -> CriteriaResult<&str> {
        let navigable = match &self.kind {
            // Collection-valued attributes must be joined, not dereferenced
            PathKind::Attribute { .. } => !self.value_type.is_collection(),
            _ => true,
        };

        match self.target.as_deref() {
            Some(entity) if navigable => Ok(entity),
            _ => Err(CriteriaError::type_mismatch(
                operator,
                format!("{}.{}", self, attribute),
                "entity-valued path",
                self.value_type.name(),
            )),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PathKind::Root { entity } => match &self.alias {
                Some(alias) => write!(f, "{}", alias),
                None => write!(f, "{}", entity),
            },
            PathKind::Attribute { parent, attribute } => write!(f, "{}.{}", parent, attribute),
            PathKind::Join {
                parent, attribute, ..
            } => match &self.alias {
                Some(alias) => write!(f, "{}", alias),
                None => write!(f, "join({}.{})", parent, attribute),
            },
        }
    }
}
