//! Schema entries as written to `component_schema.json`
//!
//! Each entry is the component name plus exactly one pattern, with the
//! pattern's payload flattened alongside it:
//!
//! ```json
//! { "name": "mod:box", "pattern": "array", "fieldName": "Sizes", "elementType": "32-bit-float" }
//! ```

use serde::Serialize;
use strum::Display;
use strum::EnumIter;

use super::wire_type::WireType;
use crate::registry::ComponentName;

/// Classification result for one registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    /// Registry name
    pub name:    ComponentName,
    /// Wire pattern and its payload
    #[serde(flatten)]
    pub pattern: SchemaPattern,
}

impl SchemaEntry {
    /// Create an entry
    pub fn new(name: impl Into<ComponentName>, pattern: SchemaPattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// The entry's pattern tag
    pub const fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }
}

/// Wire pattern with its pattern-specific payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "pattern", rename_all = "lowercase")]
pub enum SchemaPattern {
    /// No payload on the wire
    Empty,
    /// The value is a single wire primitive
    Embed {
        /// Label of the primitive
        #[serde(rename = "embedType")]
        embed_type: WireType,
    },
    /// Direct holder or registry key, handled by a fixed downstream codec
    EitherHolder,
    /// Single field holding a count-prefixed sequence
    Array {
        /// PascalCase name of the only field
        #[serde(rename = "fieldName")]
        field_name:   String,
        /// Label of each element
        #[serde(rename = "elementType")]
        element_type: WireType,
    },
    /// Fixed fields written back to back in declaration order
    Tuple {
        /// Fields in wire order
        fields: Vec<TupleField>,
    },
    /// Needs a hand-written codec downstream
    Custom,
}

impl SchemaPattern {
    /// The pattern tag without its payload
    pub const fn kind(&self) -> PatternKind {
        match self {
            Self::Empty => PatternKind::Empty,
            Self::Embed { .. } => PatternKind::Embed,
            Self::EitherHolder => PatternKind::EitherHolder,
            Self::Array { .. } => PatternKind::Array,
            Self::Tuple { .. } => PatternKind::Tuple,
            Self::Custom => PatternKind::Custom,
        }
    }

    /// Embed `embed_type`
    pub const fn embed(embed_type: WireType) -> Self {
        Self::Embed { embed_type }
    }
}

/// One field of a tuple pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TupleField {
    /// PascalCase field name
    pub name:      String,
    /// Field label
    #[serde(rename = "type")]
    pub wire_type: WireType,
}

/// Pattern tags, in the order the summary reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PatternKind {
    /// `empty`
    Empty,
    /// `embed`
    Embed,
    /// `eitherholder`
    EitherHolder,
    /// `array`
    Array,
    /// `tuple`
    Tuple,
    /// `custom`
    Custom,
}
