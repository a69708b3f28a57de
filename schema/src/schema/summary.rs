//! Run summary report
//!
//! Counts per pattern plus the entries a maintainer must look at by hand:
//! custom entries need a hand-written codec, unverified probes were defaulted
//! to compact framing, unreadable entries had no usable value shape.

use std::collections::BTreeMap;
use std::fmt;

use strum::IntoEnumIterator;

use super::classifier::Classification;
use super::entry::PatternKind;
use super::enum_catalog::EnumCollision;
use super::probe::IntFraming;
use crate::registry::ComponentName;

/// An entry whose framing probe fell back to the compact default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedProbe {
    /// Registry name
    pub name:   ComponentName,
    /// Why the probe fell back
    pub reason: String,
}

/// Counters and review lists for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries classified
    pub total:           usize,
    /// Entries per pattern
    pub by_pattern:      BTreeMap<PatternKind, usize>,
    /// Integers observed to be compact
    pub probed_compact:  usize,
    /// Integers observed to be fixed width
    pub probed_fixed:    usize,
    /// Probes that fell back to compact without observing it
    pub unverified:      Vec<UnverifiedProbe>,
    /// Entries classified `custom`
    pub custom:          Vec<ComponentName>,
    /// Entries whose value shape could not be read
    pub unreadable:      Vec<ComponentName>,
    /// Enumerations catalogued
    pub enums:           usize,
    /// Distinct enumerations sharing a short name
    pub enum_collisions: Vec<EnumCollision>,
}

impl RunSummary {
    /// Count one classified entry
    pub fn record(&mut self, classification: &Classification) {
        let name = &classification.entry.name;
        self.total += 1;
        *self.by_pattern.entry(classification.kind()).or_default() += 1;

        if let Some(probe) = &classification.probe {
            match (probe.verified, probe.framing) {
                (true, IntFraming::Compact) => self.probed_compact += 1,
                (true, IntFraming::Fixed) => self.probed_fixed += 1,
                (false, _) => self.unverified.push(UnverifiedProbe {
                    name:   name.clone(),
                    reason: probe.failure.clone().unwrap_or_default(),
                }),
            }
        }

        if classification.kind() == PatternKind::Custom {
            self.custom.push(name.clone());
        }
        if classification.unreadable {
            self.unreadable.push(name.clone());
        }
    }

    /// Entries with pattern `kind`
    pub fn count(&self, kind: PatternKind) -> usize {
        self.by_pattern.get(&kind).copied().unwrap_or_default()
    }

    /// Sort review lists so the report is stable
    pub fn finish(&mut self) {
        self.unverified.sort_by(|a, b| a.name.cmp(&b.name));
        self.custom.sort();
        self.unreadable.sort();
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total:        {}", self.total)?;
        for kind in PatternKind::iter() {
            let label = format!("{kind}:");
            write!(f, "  {label:<14}{}", self.count(kind))?;
            if kind == PatternKind::Embed {
                write!(
                    f,
                    " (probed compact: {}, probed fixed: {}, unverified: {})",
                    self.probed_compact,
                    self.probed_fixed,
                    self.unverified.len()
                )?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  Enums:        {}", self.enums)?;

        if !self.unverified.is_empty() {
            writeln!(f, "  Unverified probes (defaulted to compact, review):")?;
            for probe in &self.unverified {
                writeln!(f, "    - {}: {}", probe.name, probe.reason)?;
            }
        }
        if !self.custom.is_empty() {
            writeln!(f, "  Custom components (need overrides):")?;
            for name in &self.custom {
                writeln!(f, "    - {name}")?;
            }
        }
        if !self.unreadable.is_empty() {
            writeln!(f, "  Unreadable components:")?;
            for name in &self.unreadable {
                writeln!(f, "    - {name}")?;
            }
        }
        if !self.enum_collisions.is_empty() {
            writeln!(f, "  Enum short-name collisions:")?;
            for collision in &self.enum_collisions {
                writeln!(
                    f,
                    "    - {}: {} and {}",
                    collision.name, collision.existing, collision.incoming
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeName;
    use crate::schema::entry::SchemaEntry;
    use crate::schema::entry::SchemaPattern;
    use crate::schema::probe::ProbeOutcome;
    use crate::schema::wire_type::WireType;

    fn classification(name: &str, pattern: SchemaPattern) -> Classification {
        Classification {
            entry:      SchemaEntry::new(name, pattern),
            probe:      None,
            enums:      Vec::new(),
            unreadable: false,
        }
    }

    #[test]
    fn test_counts_and_review_lists() {
        let mut summary = RunSummary::default();

        let mut compact = classification("mod:count", SchemaPattern::embed(WireType::VarInt));
        compact.probe = Some(ProbeOutcome {
            framing:  IntFraming::Compact,
            verified: true,
            lengths:  Some((1, 2)),
            failure:  None,
        });
        summary.record(&compact);

        let mut fallback = classification("mod:hidden", SchemaPattern::embed(WireType::VarInt));
        fallback.probe = Some(ProbeOutcome::fallback("no encoder"));
        summary.record(&fallback);

        let mut unreadable = classification("mod:broken", SchemaPattern::Custom);
        unreadable.unreadable = true;
        summary.record(&unreadable);
        summary.record(&classification("mod:chat", SchemaPattern::Custom));
        summary.finish();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(PatternKind::Embed), 2);
        assert_eq!(summary.count(PatternKind::Custom), 2);
        assert_eq!(summary.count(PatternKind::Tuple), 0);
        assert_eq!(summary.probed_compact, 1);
        assert_eq!(summary.probed_fixed, 0);
        assert_eq!(summary.unverified.len(), 1);
        assert_eq!(
            summary.custom,
            vec![ComponentName::from("mod:broken"), ComponentName::from("mod:chat")]
        );
        assert_eq!(summary.unreadable, vec![ComponentName::from("mod:broken")]);
    }

    #[test]
    fn test_display_lists_every_pattern_and_review_section() {
        let mut summary = RunSummary::default();
        summary.record(&classification("mod:weird", SchemaPattern::Custom));
        summary.enum_collisions.push(EnumCollision {
            name:     "Mode".to_string(),
            existing: TypeName::from("a.Mode"),
            incoming: TypeName::from("b.Mode"),
        });

        let report = summary.to_string();
        assert!(report.starts_with("  Total:        1\n"));
        assert!(report.contains("  empty:        0\n"));
        assert!(report.contains("  eitherholder: 0\n"));
        assert!(report.contains("  custom:       1\n"));
        assert!(report.contains("(probed compact: 0, probed fixed: 0, unverified: 0)"));
        assert!(report.contains("  Custom components (need overrides):\n    - mod:weird\n"));
        assert!(report.contains("    - Mode: a.Mode and b.Mode\n"));
        assert!(!report.contains("Unreadable"));
    }
}
