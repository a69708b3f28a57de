//! Wire primitive labels
//!
//! A `WireType` is what a resolved value shape looks like on the network. Its
//! `Display` form is the label written to the schema, which the downstream
//! codec generator matches on verbatim.

use std::fmt;

use serde::{Serialize, Serializer};

/// Canonical wire encoding of a resolved value shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireType {
    /// One byte, 0 or 1
    Boolean,
    /// Big-endian 32-bit float
    Float,
    /// Big-endian 64-bit float
    Double,
    /// Big-endian 64-bit integer
    Long,
    /// 7-bits-per-byte variable-length integer
    VarInt,
    /// Big-endian 32-bit integer
    FixedInt,
    /// Length-prefixed UTF-8 string
    String,
    /// Rich chat text
    ChatMessage,
    /// Item stack
    Slot,
    /// Compound NBT tag
    Nbt,
    /// Sound reference that may carry an inline definition
    SoundEvent,
    /// Tag name or explicit id list
    IdSet,
    /// Direct holder or registry key
    EitherHolder,
    /// A record type, by its flattened short name
    Named(String),
    /// Count-prefixed sequence
    Array(Box<WireType>),
    /// Presence-flagged value
    Option(Box<WireType>),
}

impl WireType {
    /// Count-prefixed sequence of `element`
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Presence-flagged `inner`
    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("compact-boolean"),
            Self::Float => f.write_str("32-bit-float"),
            Self::Double => f.write_str("64-bit-double"),
            Self::Long => f.write_str("fixed-int64"),
            Self::VarInt => f.write_str("compact-varint"),
            Self::FixedInt => f.write_str("fixed-int32"),
            Self::String => f.write_str("string"),
            Self::ChatMessage => f.write_str("chat-message"),
            Self::Slot => f.write_str("slot"),
            Self::Nbt => f.write_str("nbt"),
            Self::SoundEvent => f.write_str("sound-event"),
            Self::IdSet => f.write_str("id-set"),
            Self::EitherHolder => f.write_str("either-holder"),
            Self::Named(name) => f.write_str(name),
            Self::Array(element) => write!(f, "array<{element}>"),
            Self::Option(inner) => write!(f, "option<{inner}>"),
        }
    }
}

impl Serialize for WireType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
