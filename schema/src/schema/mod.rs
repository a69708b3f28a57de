//! Component classification core
//!
//! Resolves value shapes to wire primitives, inspects records, probes integer
//! framing and decides one schema pattern per registry entry.

mod classifier;
mod entry;
mod enum_catalog;
mod knowledge;
mod probe;
mod record;
mod resolver;
mod run;
mod summary;
mod wire_type;

pub use classifier::Classification;
pub use classifier::classify;
pub use entry::PatternKind;
pub use entry::SchemaEntry;
pub use entry::SchemaPattern;
pub use entry::TupleField;
pub use enum_catalog::EnumCatalog;
pub use enum_catalog::EnumCollision;
pub use enum_catalog::EnumDefinition;
pub use knowledge::ClassifierConfig;
pub use knowledge::SOUND_LIKE_TYPES;
pub use knowledge::TYPE_SOUND_EVENT;
pub use probe::IntFraming;
pub use probe::LARGE_SAMPLE;
pub use probe::ProbeOutcome;
pub use probe::SMALL_SAMPLE;
pub use probe::probe_encoder;
pub use probe::probe_integer_framing;
pub use record::RecordLayout;
pub use record::TupleRejection;
pub use record::inspect_record;
pub use record::tuple_fields;
pub use resolver::Resolver;
pub use run::SchemaRun;
pub use run::classify_registry;
pub use summary::RunSummary;
pub use summary::UnverifiedProbe;
pub use wire_type::WireType;
