//! Declared stream codecs and the encoder that interprets them
//!
//! The runtime collaborator describes how each component is actually written to
//! the network. `StreamCodec` interprets that description against a JSON value,
//! producing the same bytes the runtime would: big-endian fixed-width numbers,
//! 7-bits-per-byte variable-length integers, length-prefixed strings and lists.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::ComponentEncoder;

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Why a value could not be encoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The codec has no network representation
    #[error("component has no network representation")]
    NotEncodable,

    /// The value's JSON type does not fit the codec
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// What the codec needed
        expected: &'static str,
        /// What the value was
        found:    String,
    },

    /// A record field was absent from the value
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A number did not fit the codec's width
    #[error("{0} is out of range")]
    OutOfRange(String),
}

/// A codec as declared by the runtime collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamCodec {
    /// Writes nothing
    Unit,
    /// One byte, 0 or 1
    Bool,
    /// Variable-length 32-bit integer
    VarInt,
    /// Big-endian 32-bit integer
    Int,
    /// Variable-length 64-bit integer
    VarLong,
    /// Big-endian 64-bit integer
    Long,
    /// Big-endian 32-bit float
    Float,
    /// Big-endian 64-bit float
    Double,
    /// Length-prefixed UTF-8
    String,
    /// Presence flag followed by the value
    Optional {
        /// Codec of the present value
        inner: Box<StreamCodec>,
    },
    /// Count-prefixed sequence
    List {
        /// Codec of each element
        element: Box<StreamCodec>,
    },
    /// Fields written back to back in order
    Record {
        /// Field codecs in wire order
        fields: Vec<CodecField>,
    },
    /// The component is never sent over the network
    Unencodable,
}

/// One field of a record codec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecField {
    /// Field name as it appears in the value object
    pub name:  String,
    /// Field codec
    pub codec: StreamCodec,
}

impl StreamCodec {
    /// Encode `value`, appending to `out`
    pub fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            Self::Unit => Ok(()),
            Self::Bool => {
                out.push(u8::from(expect_bool(value)?));
                Ok(())
            },
            Self::VarInt => {
                write_var_int(out, expect_i32(value)?);
                Ok(())
            },
            Self::Int => {
                out.extend_from_slice(&expect_i32(value)?.to_be_bytes());
                Ok(())
            },
            Self::VarLong => {
                write_var_long(out, expect_i64(value)?);
                Ok(())
            },
            Self::Long => {
                out.extend_from_slice(&expect_i64(value)?.to_be_bytes());
                Ok(())
            },
            Self::Float => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "wire format is single precision"
                )]
                let float = expect_f64(value)? as f32;
                out.extend_from_slice(&float.to_be_bytes());
                Ok(())
            },
            Self::Double => {
                out.extend_from_slice(&expect_f64(value)?.to_be_bytes());
                Ok(())
            },
            Self::String => {
                let text = value
                    .as_str()
                    .ok_or_else(|| mismatch("string", value))?;
                write_length(out, text.len())?;
                out.extend_from_slice(text.as_bytes());
                Ok(())
            },
            Self::Optional { inner } => {
                if value.is_null() {
                    out.push(0);
                    Ok(())
                } else {
                    out.push(1);
                    inner.encode(value, out)
                }
            },
            Self::List { element } => {
                let items = value.as_array().ok_or_else(|| mismatch("array", value))?;
                write_length(out, items.len())?;
                items.iter().try_for_each(|item| element.encode(item, out))
            },
            Self::Record { fields } => {
                let object = value.as_object().ok_or_else(|| mismatch("object", value))?;
                fields.iter().try_for_each(|field| {
                    let field_value = object
                        .get(&field.name)
                        .ok_or_else(|| EncodeError::MissingField(field.name.clone()))?;
                    field.codec.encode(field_value, out)
                })
            },
            Self::Unencodable => Err(EncodeError::NotEncodable),
        }
    }

    const fn is_integer(&self) -> bool {
        matches!(self, Self::VarInt | Self::Int)
    }
}

/// `ComponentEncoder` backed by a declared `StreamCodec`
#[derive(Debug, Clone, PartialEq)]
pub struct CodecEncoder {
    codec: StreamCodec,
}

impl CodecEncoder {
    /// Wrap a declared codec
    pub const fn new(codec: StreamCodec) -> Self {
        Self { codec }
    }
}

impl ComponentEncoder for CodecEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.codec.encode(value, &mut out)?;
        Ok(out)
    }

    /// Bare integers encode the number itself; single-integer records wrap
    /// it in their only field. Anything else has no integer sample.
    fn integer_sample(&self, value: i32) -> Option<Value> {
        match &self.codec {
            codec if codec.is_integer() => Some(json!(value)),
            StreamCodec::Record { fields } => match fields.as_slice() {
                [field] if field.codec.is_integer() => Some(json!({ field.name.as_str(): value })),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Write a 32-bit integer with 7 value bits per byte, low group first
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "negative values reinterpret as unsigned and use all five bytes"
)]
pub fn write_var_int(out: &mut Vec<u8>, value: i32) {
    let mut remaining = value as u32;
    while remaining & !SEGMENT_BITS != 0 {
        out.push((remaining & SEGMENT_BITS) as u8 | CONTINUE_BIT);
        remaining >>= 7;
    }
    out.push(remaining as u8);
}

/// Write a 64-bit integer with 7 value bits per byte, low group first
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "negative values reinterpret as unsigned and use all ten bytes"
)]
pub fn write_var_long(out: &mut Vec<u8>, value: i64) {
    let segment = u64::from(SEGMENT_BITS);
    let mut remaining = value as u64;
    while remaining & !segment != 0 {
        out.push((remaining & segment) as u8 | CONTINUE_BIT);
        remaining >>= 7;
    }
    out.push(remaining as u8);
}

fn write_length(out: &mut Vec<u8>, len: usize) -> Result<(), EncodeError> {
    let len = i32::try_from(len).map_err(|_| EncodeError::OutOfRange(format!("length {len}")))?;
    write_var_int(out, len);
    Ok(())
}

fn mismatch(expected: &'static str, value: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        expected,
        found: json_kind(value).to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_bool(value: &Value) -> Result<bool, EncodeError> {
    value.as_bool().ok_or_else(|| mismatch("boolean", value))
}

fn expect_i64(value: &Value) -> Result<i64, EncodeError> {
    value.as_i64().ok_or_else(|| mismatch("integer", value))
}

fn expect_i32(value: &Value) -> Result<i32, EncodeError> {
    let wide = expect_i64(value)?;
    i32::try_from(wide).map_err(|_| EncodeError::OutOfRange(wide.to_string()))
}

fn expect_f64(value: &Value) -> Result<f64, EncodeError> {
    value.as_f64().ok_or_else(|| mismatch("number", value))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests")]

    use super::*;

    fn var_int_bytes(value: i32) -> Vec<u8> {
        let mut out = Vec::new();
        write_var_int(&mut out, value);
        out
    }

    #[test]
    fn test_var_int_length_grows_at_continuation_boundaries() {
        assert_eq!(var_int_bytes(0), vec![0x00]);
        assert_eq!(var_int_bytes(127), vec![0x7F]);
        assert_eq!(var_int_bytes(128), vec![0x80, 0x01]);
        assert_eq!(var_int_bytes(25_565), vec![0xDD, 0xC7, 0x01]);
        assert_eq!(var_int_bytes(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_var_long_negative_uses_ten_bytes() {
        let mut out = Vec::new();
        write_var_long(&mut out, -1);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn test_fixed_int_is_always_four_bytes() {
        let encoder = CodecEncoder::new(StreamCodec::Int);
        assert_eq!(encoder.encode(&json!(0)).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(encoder.encode(&json!(128)).unwrap(), vec![0, 0, 0, 0x80]);
    }

    #[test]
    fn test_record_writes_fields_in_declared_order() {
        let encoder = CodecEncoder::new(StreamCodec::Record {
            fields: vec![
                CodecField {
                    name:  "label".to_string(),
                    codec: StreamCodec::String,
                },
                CodecField {
                    name:  "flag".to_string(),
                    codec: StreamCodec::Optional {
                        inner: Box::new(StreamCodec::Bool),
                    },
                },
            ],
        });

        let bytes = encoder
            .encode(&json!({ "flag": true, "label": "ab" }))
            .unwrap();
        assert_eq!(bytes, vec![2, b'a', b'b', 1, 1]);
    }

    #[test]
    fn test_list_is_count_prefixed() {
        let encoder = CodecEncoder::new(StreamCodec::List {
            element: Box::new(StreamCodec::Float),
        });
        let bytes = encoder.encode(&json!([1.0, 2.0])).unwrap();
        assert_eq!(bytes.len(), 1 + 4 + 4);
        assert_eq!(bytes[0], 2);
    }

    #[test]
    fn test_encode_errors() {
        let record = CodecEncoder::new(StreamCodec::Record {
            fields: vec![CodecField {
                name:  "value".to_string(),
                codec: StreamCodec::VarInt,
            }],
        });
        assert_eq!(
            record.encode(&json!({})),
            Err(EncodeError::MissingField("value".to_string()))
        );
        assert!(matches!(
            CodecEncoder::new(StreamCodec::Int).encode(&json!("zero")),
            Err(EncodeError::TypeMismatch { .. })
        ));
        assert!(matches!(
            CodecEncoder::new(StreamCodec::Int).encode(&json!(i64::MAX)),
            Err(EncodeError::OutOfRange(_))
        ));
        assert_eq!(
            CodecEncoder::new(StreamCodec::Unencodable).encode(&json!(null)),
            Err(EncodeError::NotEncodable)
        );
    }

    #[test]
    fn test_integer_sample_shapes() {
        assert_eq!(
            CodecEncoder::new(StreamCodec::VarInt).integer_sample(128),
            Some(json!(128))
        );

        let wrapped = CodecEncoder::new(StreamCodec::Record {
            fields: vec![CodecField {
                name:  "value".to_string(),
                codec: StreamCodec::Int,
            }],
        });
        assert_eq!(wrapped.integer_sample(7), Some(json!({ "value": 7 })));

        assert_eq!(
            CodecEncoder::new(StreamCodec::String).integer_sample(0),
            None
        );
    }
}
