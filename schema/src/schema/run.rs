//! Batch classification of a whole registry
//!
//! Entries are classified independently, then merged at one point in name
//! order: schema entries are collected, enumerations go into the catalog and
//! the summary is updated. Merging in name order makes the catalog and the
//! summary independent of registry iteration order.

use itertools::Itertools;

use super::classifier::Classification;
use super::classifier::classify;
use super::entry::SchemaEntry;
use super::enum_catalog::EnumCatalog;
use super::knowledge::ClassifierConfig;
use super::summary::RunSummary;
use crate::registry::ComponentRegistry;

/// Everything one run produces
#[derive(Debug, Clone, Default)]
pub struct SchemaRun {
    /// Schema entries, strictly ascending by name
    pub entries: Vec<SchemaEntry>,
    /// Every enumeration met
    pub catalog: EnumCatalog,
    /// Counts and review lists
    pub summary: RunSummary,
}

/// Classify every entry of `registry`
pub fn classify_registry(
    registry: &dyn ComponentRegistry,
    config: &ClassifierConfig,
) -> SchemaRun {
    let mut classifications = Vec::new();
    registry.for_each(&mut |entry| classifications.push(classify(entry, config)));
    tracing::info!("Classified {} components", classifications.len());
    merge(classifications)
}

fn merge(classifications: Vec<Classification>) -> SchemaRun {
    let classifications = classifications
        .into_iter()
        .sorted_by(|a, b| a.entry.name.cmp(&b.entry.name))
        .coalesce(|earlier, later| {
            if later.entry.name == earlier.entry.name {
                tracing::warn!(
                    "Registry yielded '{}' more than once, keeping first",
                    later.entry.name
                );
                Ok(earlier)
            } else {
                Err((earlier, later))
            }
        });

    let mut run = SchemaRun::default();
    for classification in classifications {
        run.summary.record(&classification);
        for definition in classification.enums {
            if let Some(collision) = run.catalog.insert(definition) {
                tracing::warn!(
                    "Enums {} and {} share the short name '{}'",
                    collision.existing,
                    collision.incoming,
                    collision.name
                );
                run.summary.enum_collisions.push(collision);
            }
        }
        run.entries.push(classification.entry);
    }

    run.summary.enums = run.catalog.len();
    run.summary.finish();
    run
}
