//! A newtype wrapper for fully-qualified value type identities
//!
//! Type names arrive from the runtime collaborator in whatever form its
//! reflection exposes (e.g. `net.minecraft.world.item.component.Tool$Rule`).
//! They identify enumerations in the enum catalog and give records the short
//! name they resolve to when nested inside other shapes.

use serde::{Deserialize, Serialize};

/// Fully-qualified identity of a value type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name with nesting flattened
    ///
    /// Strips generic parameters, package or module path and any enclosing
    /// class prefix, keeping only the innermost declared name:
    /// - `net.minecraft.world.item.component.Tool$Rule` returns `Rule`
    /// - `net.minecraft.world.item.Rarity` returns `Rarity`
    /// - `crate::module::Thing<T>` returns `Thing`
    pub fn flattened_name(&self) -> &str {
        let base = self.0.split('<').next().unwrap_or(&self.0);
        let base = base.rsplit("::").next().unwrap_or(base);
        let base = base.rsplit('.').next().unwrap_or(base);
        base.rsplit('$').next().unwrap_or(base)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self {
        type_name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
