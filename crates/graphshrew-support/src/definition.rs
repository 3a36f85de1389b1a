//! Static shapes of event and entity types
//!
//! A definition is an ordered list of field names, each with the kind of
//! value that field holds. Entity fields may be arrays of a kind or optional
//! (nullable) values of a kind; event parameters may be arrays of a kind or
//! fixed-arity tuples. Definitions are built once, usually into a [`Schema`]
//! kept in a process-wide static, and drive the coercion between native
//! [`Record`](crate::data::Record)s and tagged guest values.

use std::collections::BTreeMap;
use std::fmt;

use crate::entity::StoreValueKind;
use crate::error::{Error, Result};
use crate::ethereum::ValueKind;

/// Kind of an entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Value(StoreValueKind),
    Array(Box<EntityKind>),
    Optional(Box<EntityKind>),
}

impl EntityKind {
    pub fn array(kind: impl Into<EntityKind>) -> Self {
        EntityKind::Array(Box::new(kind.into()))
    }

    pub fn optional(kind: impl Into<EntityKind>) -> Self {
        EntityKind::Optional(Box::new(kind.into()))
    }
}

impl From<StoreValueKind> for EntityKind {
    fn from(kind: StoreValueKind) -> Self {
        EntityKind::Value(kind)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Value(kind) => write!(f, "{}", kind),
            EntityKind::Array(inner) => write!(f, "[{}]", inner),
            EntityKind::Optional(inner) => write!(f, "{}?", inner),
        }
    }
}

/// Kind of an event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Value(ValueKind),
    Array(Box<ParamKind>),
    Tuple(Vec<ParamKind>),
}

impl ParamKind {
    pub fn array(kind: impl Into<ParamKind>) -> Self {
        ParamKind::Array(Box::new(kind.into()))
    }

    pub fn tuple<I, K>(kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ParamKind>,
    {
        ParamKind::Tuple(kinds.into_iter().map(Into::into).collect())
    }
}

impl From<ValueKind> for ParamKind {
    fn from(kind: ValueKind) -> Self {
        ParamKind::Value(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefinition {
    pub name: String,
    pub fields: Vec<(String, EntityKind)>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        EntityDefinition {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, kind: impl Into<EntityKind>) -> Self {
        self.fields.push((field.into(), kind.into()));
        self
    }

    pub fn field(self, field: impl Into<String>, kind: StoreValueKind) -> Self {
        self.with(field, kind)
    }

    pub fn optional(self, field: impl Into<String>, kind: StoreValueKind) -> Self {
        self.with(field, EntityKind::optional(kind))
    }

    pub fn array(self, field: impl Into<String>, kind: StoreValueKind) -> Self {
        self.with(field, EntityKind::array(kind))
    }

    pub fn kind_of(&self, field: &str) -> Option<&EntityKind> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, kind)| kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    pub name: String,
    pub params: Vec<(String, ParamKind)>,
}

impl EventDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        EventDefinition {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with(mut self, param: impl Into<String>, kind: impl Into<ParamKind>) -> Self {
        self.params.push((param.into(), kind.into()));
        self
    }

    pub fn param(self, param: impl Into<String>, kind: ValueKind) -> Self {
        self.with(param, kind)
    }

    pub fn array(self, param: impl Into<String>, kind: ValueKind) -> Self {
        self.with(param, ParamKind::array(kind))
    }

    /// Name of the guest export handling this event.
    pub fn handler_name(&self) -> String {
        format!("on{}", self.name)
    }
}

/// The set of event and entity definitions a mapping module works with.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entities: BTreeMap<String, EntityDefinition>,
    events: BTreeMap<String, EventDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, definition: EntityDefinition) -> Self {
        self.entities.insert(definition.name.clone(), definition);
        self
    }

    pub fn with_event(mut self, definition: EventDefinition) -> Self {
        self.events.insert(definition.name.clone(), definition);
        self
    }

    pub fn entity(&self, name: &str) -> Result<&EntityDefinition> {
        self.entities.get(name).ok_or_else(|| Error::UnknownDefinition {
            kind: "entity",
            name: name.to_string(),
        })
    }

    pub fn event(&self, name: &str) -> Result<&EventDefinition> {
        self.events.get(name).ok_or_else(|| Error::UnknownDefinition {
            kind: "event",
            name: name.to_string(),
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.entities.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &EventDefinition> {
        self.events.values()
    }
}
