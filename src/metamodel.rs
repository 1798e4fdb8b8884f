//! Entity and attribute metadata consumed by path construction and lowering.

use crate::criteria::error::{CriteriaError, CriteriaResult};
use crate::types::ValueType;
use std::collections::HashMap;

/// How an attribute relates its owner to its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    /// Scalar or embedded value
    Basic,
    /// Single-valued association to the named entity
    ToOne(String),
    /// Collection of elements; `target` names the element entity, if any
    Collection {
        element: ValueType,
        target: Option<String>,
    },
}

/// Persistent attribute of an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Declared type of the attribute value
    pub value_type: ValueType,
    pub kind: AttributeKind,
}

impl Attribute {
    /// Entity reached by navigating through this attribute
    pub fn target_entity(&self) -> Option<&str> {
        match &self.kind {
            AttributeKind::Basic => None,
            AttributeKind::ToOne(target) => Some(target),
            AttributeKind::Collection { target, .. } => target.as_deref(),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, AttributeKind::Collection { .. })
    }

    /// Type a join over this attribute binds: the element type for
    /// collections, the value type otherwise
    pub fn join_type(&self) -> ValueType {
        match &self.kind {
            AttributeKind::Collection { element, .. } => element.clone(),
            _ => self.value_type.clone(),
        }
    }
}

/// Managed entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    name: String,
    attributes: Vec<Attribute>,
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add a basic attribute
    pub fn with_basic(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value_type,
            kind: AttributeKind::Basic,
        });
        self
    }

    /// Add a single-valued association
    pub fn with_to_one(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        self.attributes.push(Attribute {
            name: name.into(),
            value_type: ValueType::Entity(target.clone()),
            kind: AttributeKind::ToOne(target),
        });
        self
    }

    /// Add a collection of entities
    pub fn with_to_many(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        let element = ValueType::Entity(target.clone());
        self.attributes.push(Attribute {
            name: name.into(),
            value_type: ValueType::collection_of(element.clone()),
            kind: AttributeKind::Collection {
                element,
                target: Some(target),
            },
        });
        self
    }

    /// Add a collection of basic values
    pub fn with_element_collection(mut self, name: impl Into<String>, element: ValueType) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value_type: ValueType::collection_of(element.clone()),
            kind: AttributeKind::Collection {
                element,
                target: None,
            },
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime type instances of this entity are described by
    pub fn described_type(&self) -> ValueType {
        ValueType::Entity(self.name.clone())
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }
}

/// Resolves entity metadata by name
pub trait Metamodel {
    fn entity(&self, name: &str) -> Option<&EntityType>;

    fn require_entity(&self, name: &str) -> CriteriaResult<&EntityType> {
        self.entity(name).ok_or_else(|| CriteriaError::UnknownEntity {
            name: name.to_string(),
        })
    }

    /// Resolve an attribute of the named entity
    fn require_attribute(&self, entity: &str, attribute: &str) -> CriteriaResult<&Attribute> {
        self.require_entity(entity)?
            .attribute(attribute)
            .ok_or_else(|| CriteriaError::UnknownAttribute {
                entity: entity.to_string(),
                attribute: attribute.to_string(),
            })
    }
}

/// In-memory metamodel built up front and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct StaticMetamodel {
    entities: HashMap<String, EntityType>,
}

impl StaticMetamodel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: EntityType) -> Self {
        self.register(entity);
        self
    }

    pub fn register(&mut self, entity: EntityType) {
        self.entities.insert(entity.name().to_string(), entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Metamodel for StaticMetamodel {
    fn entity(&self, name: &str) -> Option<&EntityType> {
        self.entities.get(name)
    }
}
