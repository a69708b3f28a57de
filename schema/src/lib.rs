//! # Component Schema
//!
//! Classifies the wire encoding of every data component in a registry and
//! emits a machine-readable schema for a downstream protocol codec generator.
//!
//! Each component is given one pattern (`empty`, `embed`, `eitherholder`,
//! `array`, `tuple` or `custom`). Integers whose framing cannot be told from
//! their type are probed by encoding 0 and 128 through the component's real
//! encoder and comparing the lengths.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use component_schema::emit::write_outputs;
//! use component_schema::registry::FileRegistry;
//! use component_schema::schema::{ClassifierConfig, classify_registry};
//!
//! # fn main() -> component_schema::error::Result<()> {
//! let registry = FileRegistry::load(Path::new("registry.json"))?;
//! let run = classify_registry(&registry, &ClassifierConfig::default());
//! write_outputs(&run, Path::new("."))?;
//! print!("{}", run.summary);
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod error;
pub mod registry;
pub mod schema;
/// Shared support: tracing setup
pub mod support;
