//! Record introspector
//!
//! Exposes the arity special cases of a record and builds tuple rows for the
//! general case. Field order is part of the wire contract and is preserved.

use super::entry::TupleField;
use super::resolver::Resolver;
use crate::registry::FieldShape;
use crate::registry::RecordShape;
use crate::registry::ValueType;

/// Arity-driven view of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout<'a> {
    /// No fields
    Empty,
    /// One field holding a list
    SingleList {
        /// Declared field name
        field:   &'a str,
        /// Element shape
        element: &'a ValueType,
    },
    /// One field holding a bare integer, framing unknown
    SingleInt {
        /// Declared field name
        field: &'a str,
    },
    /// One field of any other shape
    Single {
        /// Declared field name
        field:      &'a str,
        /// Field shape
        value_type: &'a ValueType,
    },
    /// Two or more fields in declaration order
    Fields(&'a [FieldShape]),
}

/// Why a multi-field record cannot be a tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleRejection {
    /// A field has no wire mapping
    Unmappable {
        /// Declared field name
        field: String,
    },
    /// A field is a holder whose referent may be sent inline
    InlineHolder {
        /// Declared field name
        field: String,
    },
}

impl std::fmt::Display for TupleRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmappable { field } => write!(f, "field '{field}' has no wire mapping"),
            Self::InlineHolder { field } => write!(f, "field '{field}' is an inline holder"),
        }
    }
}

/// Classify `record` by arity
pub fn inspect_record(record: &RecordShape) -> RecordLayout<'_> {
    match record.fields.as_slice() {
        [] => RecordLayout::Empty,
        [only] => match &only.value_type {
            ValueType::List { element } => RecordLayout::SingleList {
                field: &only.name,
                element,
            },
            value_type if value_type.is_int() => RecordLayout::SingleInt { field: &only.name },
            value_type => RecordLayout::Single {
                field: &only.name,
                value_type,
            },
        },
        fields => RecordLayout::Fields(fields),
    }
}

/// Resolve every field of a multi-field record into a tuple row
///
/// Fails on the first field that is unmappable or an inline holder whose
/// referent is not sound-like.
pub fn tuple_fields(
    resolver: &mut Resolver<'_>,
    fields: &[FieldShape],
) -> Result<Vec<TupleField>, TupleRejection> {
    fields
        .iter()
        .map(|field| {
            if let ValueType::Holder { referent } = &field.value_type
                && referent.inline_codec
                && !resolver.is_sound_like(referent)
            {
                return Err(TupleRejection::InlineHolder {
                    field: field.name.clone(),
                });
            }

            resolver
                .resolve(&field.value_type)
                .map(|wire_type| TupleField {
                    name: pascal_case(&field.name),
                    wire_type,
                })
                .ok_or_else(|| TupleRejection::Unmappable {
                    field: field.name.clone(),
                })
        })
        .collect()
}

/// Field name as written to the schema
///
/// Only the first character is upper-cased; the rest of a camelCase name,
/// acronyms included, is kept as declared.
pub fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    chars
        .next()
        .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}
