//! Integer framing probe
//!
//! Static type information cannot tell a var int from a fixed four-byte int.
//! The probe encodes samples carrying 0 and 128 through the component's real
//! encoder: 128 is the smallest value a var int needs a second byte for, so
//! different lengths mean compact framing and equal lengths mean fixed.
//!
//! Any failure falls back to compact and marks the outcome unverified.

use serde_json::Value;

use super::wire_type::WireType;
use crate::registry::ComponentEncoder;

/// Sample carried by the first probe value
pub const SMALL_SAMPLE: i32 = 0;
/// Smallest value whose compact encoding needs a continuation byte
pub const LARGE_SAMPLE: i32 = 128;

/// Observed framing of an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntFraming {
    /// Length grows with magnitude
    Compact,
    /// Length is constant
    Fixed,
}

impl IntFraming {
    /// Wire primitive for this framing
    pub const fn wire_type(self) -> WireType {
        match self {
            Self::Compact => WireType::VarInt,
            Self::Fixed => WireType::FixedInt,
        }
    }
}

/// Result of probing one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Inferred framing
    pub framing:  IntFraming,
    /// Whether `framing` was observed rather than defaulted
    pub verified: bool,
    /// Encoded lengths of the small and large samples, when both encoded
    pub lengths:  Option<(usize, usize)>,
    /// Why the probe fell back, when it did
    pub failure:  Option<String>,
}

impl ProbeOutcome {
    fn observed(small: usize, large: usize) -> Self {
        let framing = if small == large {
            IntFraming::Fixed
        } else {
            IntFraming::Compact
        };
        Self {
            framing,
            verified: true,
            lengths: Some((small, large)),
            failure: None,
        }
    }

    /// Conservative compact default
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            framing:  IntFraming::Compact,
            verified: false,
            lengths:  None,
            failure:  Some(reason.into()),
        }
    }
}

/// Probe the integer framing of `encoder`
///
/// `construct` builds a value of the entry's type carrying the given integer.
pub fn probe_integer_framing(
    encoder: &dyn ComponentEncoder,
    construct: impl Fn(i32) -> Option<Value>,
) -> ProbeOutcome {
    let encoded_len = |sample: i32| -> Result<usize, String> {
        let value = construct(sample)
            .ok_or_else(|| format!("no single-integer value can be built for {sample}"))?;
        encoder
            .encode(&value)
            .map(|bytes| bytes.len())
            .map_err(|e| format!("encoding {sample} failed: {e}"))
    };

    match (encoded_len(SMALL_SAMPLE), encoded_len(LARGE_SAMPLE)) {
        (Ok(small), Ok(large)) => ProbeOutcome::observed(small, large),
        (Err(reason), _) | (_, Err(reason)) => ProbeOutcome::fallback(reason),
    }
}

/// Probe through the encoder's own sample constructor
pub fn probe_encoder(encoder: Option<&dyn ComponentEncoder>) -> ProbeOutcome {
    encoder.map_or_else(
        || ProbeOutcome::fallback("component has no encoder"),
        |encoder| probe_integer_framing(encoder, |n| encoder.integer_sample(n)),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::registry::CodecEncoder;
    use crate::registry::EncodeError;
    use crate::registry::StreamCodec;

    struct FailingEncoder;

    impl ComponentEncoder for FailingEncoder {
        fn encode(&self, _value: &Value) -> Result<Vec<u8>, EncodeError> {
            Err(EncodeError::NotEncodable)
        }

        fn integer_sample(&self, value: i32) -> Option<Value> {
            Some(json!(value))
        }
    }

    #[test]
    fn test_compact_encoder_lengths_differ() {
        let encoder = CodecEncoder::new(StreamCodec::VarInt);
        let outcome = probe_encoder(Some(&encoder));
        assert_eq!(outcome.framing, IntFraming::Compact);
        assert!(outcome.verified);
        assert_eq!(outcome.lengths, Some((1, 2)));
    }

    #[test]
    fn test_fixed_encoder_lengths_equal() {
        let encoder = CodecEncoder::new(StreamCodec::Int);
        let outcome = probe_encoder(Some(&encoder));
        assert_eq!(outcome.framing, IntFraming::Fixed);
        assert!(outcome.verified);
        assert_eq!(outcome.lengths, Some((4, 4)));
    }

    #[test]
    fn test_single_field_record_is_probed_through_its_field() {
        let encoder = CodecEncoder::new(StreamCodec::Record {
            fields: vec![crate::registry::CodecField {
                name:  "value".to_string(),
                codec: StreamCodec::Int,
            }],
        });
        assert_eq!(probe_encoder(Some(&encoder)).framing, IntFraming::Fixed);
    }

    #[test]
    fn test_encode_failure_falls_back_unverified() {
        let outcome = probe_encoder(Some(&FailingEncoder));
        assert_eq!(outcome.framing, IntFraming::Compact);
        assert!(!outcome.verified);
        assert!(outcome.failure.is_some());
    }

    #[test]
    fn test_construction_failure_falls_back_unverified() {
        let encoder = CodecEncoder::new(StreamCodec::Int);
        let outcome = probe_integer_framing(&encoder, |_| None);
        assert_eq!(outcome.framing, IntFraming::Compact);
        assert!(!outcome.verified);
        assert_eq!(outcome.lengths, None);
    }

    #[test]
    fn test_missing_encoder_falls_back_unverified() {
        let outcome = probe_encoder(None);
        assert_eq!(outcome.framing, IntFraming::Compact);
        assert!(!outcome.verified);
    }

    #[test]
    fn test_probes_are_independent_across_entries() {
        let fixed = CodecEncoder::new(StreamCodec::Int);
        let compact = CodecEncoder::new(StreamCodec::VarInt);

        let first = probe_encoder(Some(&fixed));
        let second = probe_encoder(Some(&compact));
        let again = probe_encoder(Some(&fixed));

        assert_eq!(first, again);
        assert_eq!(second.lengths, Some((1, 2)));
    }
}
