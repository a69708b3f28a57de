//! Input boundary: the registry of data components being classified
//!
//! The runtime-introspection collaborator owns the registry. The classifier only
//! sees it through `ComponentRegistry`, one `RegistryEntry` at a time, and only
//! exercises encoders through `ComponentEncoder`.

mod component_name;
mod registry_file;
mod stream_codec;
mod type_name;
mod value_type;

pub use component_name::ComponentName;
pub use registry_file::FileRegistry;
use serde_json::Value;
pub use stream_codec::{
    CodecEncoder, CodecField, EncodeError, StreamCodec, write_var_int, write_var_long,
};
pub use type_name::TypeName;
pub use value_type::{EnumShape, FieldShape, IntEncoding, RecordShape, Referent, ValueType};

/// Serializes values of one component's declared type
///
/// Every call must start from a fresh buffer: an encode never observes bytes
/// written by an earlier call.
pub trait ComponentEncoder {
    /// Encode `value` into a new byte buffer
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError>;

    /// Build a value of this component's type carrying the single integer `value`
    ///
    /// Returns `None` when the type is not a bare integer or a record whose only
    /// field is an integer.
    fn integer_sample(&self, value: i32) -> Option<Value>;
}

/// One named entry of the registry
#[derive(Clone, Copy)]
pub struct RegistryEntry<'a> {
    /// Registry name
    pub name:       &'a ComponentName,
    /// Declared value shape, `None` when the collaborator could not determine it
    pub value_type: Option<&'a ValueType>,
    /// Encoder, `None` when the component has no network representation
    pub encoder:    Option<&'a dyn ComponentEncoder>,
}

impl std::fmt::Debug for RegistryEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", self.name)
            .field("value_type", &self.value_type)
            .field("encoder", &self.encoder.map(|_| "<dyn ComponentEncoder>"))
            .finish()
    }
}

/// Read-only source of registry entries
pub trait ComponentRegistry {
    /// Visit every entry once, in registry-defined order
    fn for_each(&self, visit: &mut dyn FnMut(RegistryEntry<'_>));
}
