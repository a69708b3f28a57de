//! Registry dump loader
//!
//! The runtime-introspection collaborator writes its registry as JSON:
//!
//! ```json
//! {
//!   "version": "1.21.4",
//!   "components": [
//!     { "name": "minecraft:glider", "valueType": { "kind": "unit" }, "codec": { "kind": "unit" } }
//!   ]
//! }
//! ```
//!
//! A broken top level is fatal. A broken `valueType` only makes that one entry
//! unreadable, matching how a failed reflective lookup behaves in the live
//! collaborator.

use std::collections::HashSet;
use std::path::Path;

use error_stack::{Report, ResultExt};
use serde::Deserialize;
use serde_json::Value;

use super::component_name::ComponentName;
use super::stream_codec::{CodecEncoder, StreamCodec};
use super::value_type::ValueType;
use super::{ComponentEncoder, ComponentRegistry, RegistryEntry};
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct RawRegistry {
    #[serde(default)]
    version:    Option<String>,
    components: Vec<RawComponent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    name:       String,
    #[serde(default)]
    value_type: Option<Value>,
    #[serde(default)]
    codec:      Option<Value>,
}

struct LoadedComponent {
    name:       ComponentName,
    value_type: Option<ValueType>,
    encoder:    Option<CodecEncoder>,
}

/// Registry read from a JSON dump
pub struct FileRegistry {
    version:    Option<String>,
    components: Vec<LoadedComponent>,
}

impl FileRegistry {
    /// Load a registry dump from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Report::new(Error::io_failed("read registry", path, e)))?;
        let registry = Self::from_json_str(&contents)
            .attach(format!("Registry file: {}", path.display()))?;
        tracing::info!(
            "Loaded {} components from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a registry dump held in memory
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: RawRegistry = serde_json::from_str(contents)
            .map_err(|e| Report::new(Error::invalid_registry("registry dump", e)))?;

        let mut seen = HashSet::new();
        let mut components = Vec::with_capacity(raw.components.len());
        for component in raw.components {
            if !seen.insert(component.name.clone()) {
                tracing::warn!(
                    "Duplicate component '{}' in registry dump, keeping first occurrence",
                    component.name
                );
                continue;
            }
            components.push(load_component(component));
        }

        Ok(Self {
            version: raw.version,
            components,
        })
    }

    /// Game version recorded in the dump, if any
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Number of distinct components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the dump holds no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

fn load_component(raw: RawComponent) -> LoadedComponent {
    let value_type = match raw.value_type {
        None => {
            tracing::warn!("Component '{}' has no value type", raw.name);
            None
        },
        Some(value) => match serde_json::from_value::<ValueType>(value) {
            Ok(value_type) => Some(value_type),
            Err(e) => {
                tracing::warn!("Component '{}' has unreadable value type: {e}", raw.name);
                None
            },
        },
    };

    let encoder = raw.codec.and_then(|value| {
        serde_json::from_value::<StreamCodec>(value)
            .inspect_err(|e| {
                tracing::warn!("Component '{}' has unreadable codec: {e}", raw.name);
            })
            .ok()
            .map(CodecEncoder::new)
    });

    LoadedComponent {
        name: ComponentName::from(raw.name),
        value_type,
        encoder,
    }
}

impl ComponentRegistry for FileRegistry {
    fn for_each(&self, visit: &mut dyn FnMut(RegistryEntry<'_>)) {
        for component in &self.components {
            visit(RegistryEntry {
                name:       &component.name,
                value_type: component.value_type.as_ref(),
                encoder:    component
                    .encoder
                    .as_ref()
                    .map(|encoder| encoder as &dyn ComponentEncoder),
            });
        }
    }
}
