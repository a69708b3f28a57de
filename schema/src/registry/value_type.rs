//! Value-type descriptor algebra
//!
//! A closed, recursive description of the shape of a component's value as the
//! runtime collaborator sees it. Every reflective wrapper the runtime has
//! (holders, holder sets, tag keys, ...) is one variant here, so shape
//! resolution is a single match over this enum.
//!
//! Descriptors are internally tagged on `kind` in the registry dump:
//!
//! ```json
//! { "kind": "list", "element": { "kind": "float" } }
//! ```

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::type_name::TypeName;

/// Shape of a component value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValueType {
    /// Marker value with no payload
    Unit,
    /// Boolean flag
    Boolean,
    /// 32-bit integer whose wire framing may not be known statically
    Int {
        /// Framing declared by the collaborator, if it knows it
        #[serde(default)]
        encoding: IntEncoding,
    },
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// 64-bit integer
    Long,
    /// Plain text
    Text,
    /// Rich chat text with its own opaque encoding
    ChatText,
    /// Namespaced registry identifier
    Identifier,
    /// Reference to a tag of some registry
    TagKey {
        /// Registry the tag belongs to
        registry: TypeName,
    },
    /// Key of a registry element
    ResourceKey {
        /// Registry the key belongs to
        registry: TypeName,
    },
    /// Item stack (slot data)
    ItemStack,
    /// Compound NBT tag
    Nbt,
    /// Reference to a registry element ("holder")
    Holder {
        /// The referenced type
        referent: Referent,
    },
    /// Set of references to registry elements
    HolderSet {
        /// The referenced type
        referent: Referent,
    },
    /// Either a direct holder or a key into a registry
    EitherHolder {
        /// The referenced type
        referent: Referent,
    },
    /// Enumeration with its complete ordered value list
    Enum(EnumShape),
    /// Variable-length sequence
    List {
        /// Element shape
        element: Box<ValueType>,
    },
    /// Optional value
    Optional {
        /// Shape of the present value
        inner: Box<ValueType>,
    },
    /// Fixed set of named fields
    Record(RecordShape),
    /// A shape the collaborator could not describe
    Unresolvable {
        /// What the collaborator saw instead
        #[serde(default)]
        description: String,
    },
}

impl ValueType {
    /// Integer with no declared framing
    pub const fn int() -> Self {
        Self::Int {
            encoding: IntEncoding::Unspecified,
        }
    }

    /// Integer with a declared framing
    pub const fn int_with(encoding: IntEncoding) -> Self {
        Self::Int { encoding }
    }

    /// Variable-length sequence of `element`
    pub fn list(element: Self) -> Self {
        Self::List {
            element: Box::new(element),
        }
    }

    /// Optional `inner`
    pub fn optional(inner: Self) -> Self {
        Self::Optional {
            inner: Box::new(inner),
        }
    }

    /// Holder referencing `referent`
    pub const fn holder(referent: Referent) -> Self {
        Self::Holder { referent }
    }

    /// Shape the collaborator could not describe
    pub fn unresolvable(description: impl Into<String>) -> Self {
        Self::Unresolvable {
            description: description.into(),
        }
    }

    /// Whether this is a bare integer
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int { .. })
    }
}

/// Declared framing of an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntEncoding {
    /// Framing unknown from type information alone
    #[default]
    Unspecified,
    /// 7-bits-per-byte variable-length encoding
    Compact,
    /// Always four bytes
    Fixed,
}

/// The type a holder-like reference points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referent {
    /// Identity of the referenced type
    pub type_name:    TypeName,
    /// Whether the referenced type can be sent inline with a self-describing
    /// encoding instead of a bare registry id
    #[serde(default)]
    pub inline_codec: bool,
}

impl Referent {
    /// Referent that is only ever sent as a registry id
    pub fn by_id(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name:    type_name.into(),
            inline_codec: false,
        }
    }

    /// Referent that may be sent inline
    pub fn inline(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name:    type_name.into(),
            inline_codec: true,
        }
    }
}

/// An enumeration type and its full ordered value list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumShape {
    /// Identity of the enumeration type
    pub type_name: TypeName,
    /// Every symbolic value in declaration order
    pub values:    Vec<String>,
}

/// A composite of named fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordShape {
    /// Identity of the record type
    pub type_name: TypeName,
    /// Fields in declaration order
    #[serde(default)]
    pub fields:    Vec<FieldShape>,
}

/// One record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldShape {
    /// Declared field name
    pub name:       String,
    /// Field shape
    pub value_type: ValueType,
}

impl FieldShape {
    /// Create a field
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}
