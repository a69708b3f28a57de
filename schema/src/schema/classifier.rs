//! Per-entry classification
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! | # | Value shape                 | Pattern                               |
//! |---|-----------------------------|---------------------------------------|
//! | 1 | unit                        | `empty`                               |
//! | 2 | bare integer                | `embed`, framing probed               |
//! | 3 | float, boolean              | `embed`                               |
//! | 4 | identifier, tag key         | `embed` string                        |
//! | 5 | chat text                   | `custom`                              |
//! | 6 | either holder               | `eitherholder`                        |
//! | 7 | holder                      | `embed` by id, or sound event         |
//! | 8 | enumeration                 | `embed` by ordinal, catalogued        |
//! | 9 | record                      | by arity, see the record introspector |
//! |10 | top-level list              | `custom`                              |
//! |11 | anything else               | `custom`                              |
//!
//! `classify` is a pure function of one entry. Enumerations it meets and the
//! probe it ran are returned alongside the entry for the run to merge.

use super::entry::PatternKind;
use super::entry::SchemaEntry;
use super::entry::SchemaPattern;
use super::enum_catalog::EnumDefinition;
use super::knowledge::ClassifierConfig;
use super::probe::ProbeOutcome;
use super::probe::probe_encoder;
use super::record::RecordLayout;
use super::record::inspect_record;
use super::record::pascal_case;
use super::record::tuple_fields;
use super::resolver::Resolver;
use super::wire_type::WireType;
use crate::registry::ComponentEncoder;
use crate::registry::RecordShape;
use crate::registry::RegistryEntry;
use crate::registry::ValueType;

/// Everything classification learned about one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The schema entry
    pub entry:      SchemaEntry,
    /// Integer framing probe, when one ran
    pub probe:      Option<ProbeOutcome>,
    /// Enumerations met while resolving, in encounter order
    pub enums:      Vec<EnumDefinition>,
    /// The entry's value shape could not be read
    pub unreadable: bool,
}

impl Classification {
    /// Pattern tag of the entry
    pub const fn kind(&self) -> PatternKind {
        self.entry.kind()
    }
}

/// Classify one registry entry
pub fn classify(entry: RegistryEntry<'_>, config: &ClassifierConfig) -> Classification {
    let Some(value_type) = entry.value_type else {
        tracing::warn!("Component '{}' has no readable value type, marking custom", entry.name);
        return Classification {
            entry:      SchemaEntry::new(entry.name.clone(), SchemaPattern::Custom),
            probe:      None,
            enums:      Vec::new(),
            unreadable: true,
        };
    };

    let mut resolver = Resolver::new(config);
    let mut probe = None;
    let pattern = classify_value(value_type, entry.encoder, &mut resolver, &mut probe);

    if let Some(outcome) = probe.as_ref().filter(|outcome| !outcome.verified) {
        tracing::warn!(
            "Component '{}' framing probe fell back to compact: {}",
            entry.name,
            outcome.failure.as_deref().unwrap_or("unknown failure")
        );
    }
    tracing::debug!(
        "Component '{}' ({}) classified as {}",
        entry.name,
        value_type,
        pattern.kind()
    );

    Classification {
        entry: SchemaEntry::new(entry.name.clone(), pattern),
        probe,
        enums: resolver.into_enums(),
        unreadable: false,
    }
}

fn classify_value(
    value_type: &ValueType,
    encoder: Option<&dyn ComponentEncoder>,
    resolver: &mut Resolver<'_>,
    probe: &mut Option<ProbeOutcome>,
) -> SchemaPattern {
    match value_type {
        ValueType::Unit => SchemaPattern::Empty,
        ValueType::Int { .. } => embed_probed(encoder, probe),
        ValueType::Float => SchemaPattern::embed(WireType::Float),
        ValueType::Boolean => SchemaPattern::embed(WireType::Boolean),
        ValueType::Identifier | ValueType::TagKey { .. } => SchemaPattern::embed(WireType::String),
        ValueType::EitherHolder { .. } => SchemaPattern::EitherHolder,
        ValueType::Holder { referent } => SchemaPattern::embed(resolver.resolve_holder(referent)),
        ValueType::Enum(_) => resolver
            .resolve(value_type)
            .map_or(SchemaPattern::Custom, SchemaPattern::embed),
        ValueType::Record(record) => classify_record(record, encoder, resolver, probe),
        ValueType::ChatText
        | ValueType::List { .. }
        | ValueType::Double
        | ValueType::Long
        | ValueType::Text
        | ValueType::ResourceKey { .. }
        | ValueType::ItemStack
        | ValueType::Nbt
        | ValueType::HolderSet { .. }
        | ValueType::Optional { .. }
        | ValueType::Unresolvable { .. } => SchemaPattern::Custom,
    }
}

fn classify_record(
    record: &RecordShape,
    encoder: Option<&dyn ComponentEncoder>,
    resolver: &mut Resolver<'_>,
    probe: &mut Option<ProbeOutcome>,
) -> SchemaPattern {
    match inspect_record(record) {
        RecordLayout::Empty => SchemaPattern::Empty,
        RecordLayout::SingleList { field, element } => resolver.resolve(element).map_or(
            SchemaPattern::Custom,
            |element_type| SchemaPattern::Array {
                field_name: pascal_case(field),
                element_type,
            },
        ),
        RecordLayout::SingleInt { .. } => embed_probed(encoder, probe),
        RecordLayout::Single { value_type, .. } => resolver
            .resolve(value_type)
            .map_or(SchemaPattern::Custom, SchemaPattern::embed),
        RecordLayout::Fields(fields) => match tuple_fields(resolver, fields) {
            Ok(fields) => SchemaPattern::Tuple { fields },
            Err(rejection) => {
                tracing::debug!(
                    "Record {} is not a tuple: {rejection}",
                    record.type_name
                );
                SchemaPattern::Custom
            },
        },
    }
}

fn embed_probed(
    encoder: Option<&dyn ComponentEncoder>,
    probe: &mut Option<ProbeOutcome>,
) -> SchemaPattern {
    let outcome = probe_encoder(encoder);
    let pattern = SchemaPattern::embed(outcome.framing.wire_type());
    *probe = Some(outcome);
    pattern
}
