//! Built-in knowledge about referenced types
//!
//! Most holders go over the wire as a bare registry id. A few referenced types
//! are written as an id-or-inline-definition union instead, and the resolver
//! labels those `sound-event`. The built-in set below can be extended from the
//! command line.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::registry::TypeName;

/// Referenced type of sound holders
pub const TYPE_SOUND_EVENT: &str = "net.minecraft.sounds.SoundEvent";

/// Referent types known to be sent as sound-like holders
pub static SOUND_LIKE_TYPES: LazyLock<BTreeSet<TypeName>> = LazyLock::new(|| {
    let mut set = BTreeSet::new();
    set.insert(TypeName::from(TYPE_SOUND_EVENT));
    set
});

/// Run-wide inputs to classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    sound_like: BTreeSet<TypeName>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            sound_like: SOUND_LIKE_TYPES.clone(),
        }
    }
}

impl ClassifierConfig {
    /// Built-in knowledge plus `extra` sound-like referent types
    pub fn with_sound_like<I, T>(extra: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        let mut config = Self::default();
        config.sound_like.extend(extra.into_iter().map(Into::into));
        config
    }

    /// Whether holders of `type_name` are sound-like
    pub fn is_sound_like(&self, type_name: &TypeName) -> bool {
        self.sound_like.contains(type_name)
    }
}
