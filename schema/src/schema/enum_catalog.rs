//! Enum catalog
//!
//! Enumerations are keyed by their fully-qualified type identity. Two distinct
//! enumerations that share a short name both keep their entries; the clash is
//! recorded so the downstream maintainer can disambiguate generated names.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::EnumShape;
use crate::registry::TypeName;

/// One enumeration and its full ordered value list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    /// Fully-qualified type identity
    pub key:    TypeName,
    /// Flattened short name
    pub name:   String,
    /// Every value in declaration order
    pub values: Vec<String>,
}

impl From<&EnumShape> for EnumDefinition {
    fn from(shape: &EnumShape) -> Self {
        Self {
            key:    shape.type_name.clone(),
            name:   shape.type_name.flattened_name().to_string(),
            values: shape.values.clone(),
        }
    }
}

/// Two distinct enumerations sharing one short name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCollision {
    /// The shared short name
    pub name:     String,
    /// Identity already in the catalog
    pub existing: TypeName,
    /// Identity that arrived later
    pub incoming: TypeName,
}

/// Every enumeration encountered during a run
#[derive(Debug, Clone, Default)]
pub struct EnumCatalog {
    by_key: BTreeMap<TypeName, EnumDefinition>,
}

impl EnumCatalog {
    /// Add `definition` unless its key is already present
    ///
    /// Returns the collision when an already-catalogued enumeration with a
    /// different key has the same short name.
    pub fn insert(&mut self, definition: EnumDefinition) -> Option<EnumCollision> {
        if self.by_key.contains_key(&definition.key) {
            return None;
        }

        let collision = self
            .by_key
            .values()
            .find(|existing| existing.name == definition.name)
            .map(|existing| EnumCollision {
                name:     definition.name.clone(),
                existing: existing.key.clone(),
                incoming: definition.key.clone(),
            });

        self.by_key.insert(definition.key.clone(), definition);
        collision
    }

    /// Look up an enumeration by identity
    pub fn get(&self, key: &TypeName) -> Option<&EnumDefinition> {
        self.by_key.get(key)
    }

    /// Definitions in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &EnumDefinition> {
        self.by_key.values()
    }

    /// Number of catalogued enumerations
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no enumeration has been catalogued
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
