//! Type-shape resolver
//!
//! Maps a value shape to the wire primitive it is written as, or to `None` when
//! the shape has no mechanical mapping. Resolution never fails: an unmappable
//! shape is an answer, and the caller decides what it means for the entry.
//!
//! Enumerations resolve to their ordinal and are collected on the resolver so
//! the caller can merge them into the catalog.

use super::enum_catalog::EnumDefinition;
use super::knowledge::ClassifierConfig;
use super::wire_type::WireType;
use crate::registry::IntEncoding;
use crate::registry::Referent;
use crate::registry::ValueType;

/// Resolves value shapes for one entry
pub struct Resolver<'a> {
    config: &'a ClassifierConfig,
    enums:  Vec<EnumDefinition>,
}

impl<'a> Resolver<'a> {
    /// Start resolving with `config`
    pub const fn new(config: &'a ClassifierConfig) -> Self {
        Self {
            config,
            enums: Vec::new(),
        }
    }

    /// Wire primitive for `value_type`, `None` if unmappable
    pub fn resolve(&mut self, value_type: &ValueType) -> Option<WireType> {
        match value_type {
            ValueType::Boolean => Some(WireType::Boolean),
            ValueType::Int { encoding } => Some(match encoding {
                IntEncoding::Fixed => WireType::FixedInt,
                IntEncoding::Compact | IntEncoding::Unspecified => WireType::VarInt,
            }),
            ValueType::Float => Some(WireType::Float),
            ValueType::Double => Some(WireType::Double),
            ValueType::Long => Some(WireType::Long),
            ValueType::Text
            | ValueType::Identifier
            | ValueType::TagKey { .. }
            | ValueType::ResourceKey { .. } => Some(WireType::String),
            ValueType::ChatText => Some(WireType::ChatMessage),
            ValueType::ItemStack => Some(WireType::Slot),
            ValueType::Nbt => Some(WireType::Nbt),
            ValueType::Holder { referent } => Some(self.resolve_holder(referent)),
            ValueType::HolderSet { .. } => Some(WireType::IdSet),
            ValueType::EitherHolder { .. } => Some(WireType::EitherHolder),
            ValueType::Enum(shape) => {
                self.enums.push(EnumDefinition::from(shape));
                Some(WireType::VarInt)
            },
            ValueType::List { element } => self.resolve(element).map(WireType::array),
            ValueType::Optional { inner } => self.resolve(inner).map(WireType::option),
            ValueType::Record(record) => Some(WireType::Named(
                record.type_name.flattened_name().to_string(),
            )),
            ValueType::Unit | ValueType::Unresolvable { .. } => None,
        }
    }

    /// By-id holders are a var int; sound-like holders carry an inline union
    pub fn resolve_holder(&self, referent: &Referent) -> WireType {
        if self.is_sound_like(referent) {
            WireType::SoundEvent
        } else {
            WireType::VarInt
        }
    }

    /// Whether `referent` is one of the configured sound-like types
    pub fn is_sound_like(&self, referent: &Referent) -> bool {
        self.config.is_sound_like(&referent.type_name)
    }

    /// Enumerations met so far, in encounter order
    pub fn into_enums(self) -> Vec<EnumDefinition> {
        self.enums
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnumShape;
    use crate::registry::FieldShape;
    use crate::registry::RecordShape;
    use crate::registry::TypeName;
    use crate::schema::knowledge::TYPE_SOUND_EVENT;

    fn resolve(value_type: &ValueType) -> Option<String> {
        let config = ClassifierConfig::default();
        Resolver::new(&config)
            .resolve(value_type)
            .map(|wire| wire.to_string())
    }

    #[test]
    fn test_primitives() {
        assert_eq!(resolve(&ValueType::Boolean).as_deref(), Some("compact-boolean"));
        assert_eq!(resolve(&ValueType::Float).as_deref(), Some("32-bit-float"));
        assert_eq!(resolve(&ValueType::Double).as_deref(), Some("64-bit-double"));
        assert_eq!(resolve(&ValueType::Long).as_deref(), Some("fixed-int64"));
        assert_eq!(resolve(&ValueType::Text).as_deref(), Some("string"));
        assert_eq!(resolve(&ValueType::int()).as_deref(), Some("compact-varint"));
        assert_eq!(
            resolve(&ValueType::int_with(IntEncoding::Fixed)).as_deref(),
            Some("fixed-int32")
        );
    }

    #[test]
    fn test_identifiers_and_tags_are_strings() {
        assert_eq!(resolve(&ValueType::Identifier).as_deref(), Some("string"));
        assert_eq!(
            resolve(&ValueType::TagKey {
                registry: TypeName::from("minecraft:block"),
            })
            .as_deref(),
            Some("string")
        );
    }

    #[test]
    fn test_holders() {
        assert_eq!(
            resolve(&ValueType::holder(Referent::by_id("game.Instrument"))).as_deref(),
            Some("compact-varint")
        );
        assert_eq!(
            resolve(&ValueType::holder(Referent::inline(TYPE_SOUND_EVENT))).as_deref(),
            Some("sound-event")
        );
        assert_eq!(
            resolve(&ValueType::HolderSet {
                referent: Referent::by_id("game.Block"),
            })
            .as_deref(),
            Some("id-set")
        );
        assert_eq!(
            resolve(&ValueType::EitherHolder {
                referent: Referent::by_id("game.JukeboxSong"),
            })
            .as_deref(),
            Some("either-holder")
        );
    }

    #[test]
    fn test_configured_sound_like_referent() {
        let config = ClassifierConfig::with_sound_like(["mod.Jingle"]);
        let wire = Resolver::new(&config).resolve(&ValueType::holder(Referent::by_id("mod.Jingle")));
        assert_eq!(wire, Some(WireType::SoundEvent));
    }

    #[test]
    fn test_containers_propagate_unmappable() {
        assert_eq!(
            resolve(&ValueType::list(ValueType::optional(ValueType::Float))).as_deref(),
            Some("array<option<32-bit-float>>")
        );
        assert_eq!(
            resolve(&ValueType::list(ValueType::unresolvable("Function"))),
            None
        );
        assert_eq!(
            resolve(&ValueType::optional(ValueType::list(ValueType::Unit))),
            None
        );
    }

    #[test]
    fn test_record_resolves_to_flattened_name() {
        let record = ValueType::Record(RecordShape {
            type_name: TypeName::from("net.minecraft.world.item.component.Tool$Rule"),
            fields:    vec![FieldShape::new("speed", ValueType::Float)],
        });
        assert_eq!(resolve(&record).as_deref(), Some("Rule"));
    }

    #[test]
    fn test_enum_resolves_to_ordinal_and_is_collected() {
        let config = ClassifierConfig::default();
        let mut resolver = Resolver::new(&config);
        let shape = EnumShape {
            type_name: TypeName::from("game.Rarity"),
            values:    vec!["COMMON".to_string(), "RARE".to_string()],
        };

        let wire = resolver.resolve(&ValueType::list(ValueType::Enum(shape)));
        assert_eq!(wire, Some(WireType::array(WireType::VarInt)));

        let enums = resolver.into_enums();
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].name, "Rarity");
        assert_eq!(enums[0].values, vec!["COMMON", "RARE"]);
    }
}
