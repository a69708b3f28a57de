//! Schema emitter
//!
//! Writes `component_schema.json` and `component_enums.json` into the output
//! directory. Both documents are rendered in full before anything touches the
//! disk, and each file is written to a temporary file in the same directory and
//! renamed into place, so a published file is always complete.

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use error_stack::Report;
use error_stack::ResultExt;
use json_pretty_compact::PrettyCompactFormatter;
use serde::Serialize;
use serde_json::Serializer;
use tempfile::NamedTempFile;

use crate::error::Error;
use crate::error::Result;
use crate::schema::SchemaRun;

/// File name of the schema document
pub const SCHEMA_FILE: &str = "component_schema.json";
/// File name of the enum catalog document
pub const ENUMS_FILE: &str = "component_enums.json";

/// Paths of the published documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFiles {
    /// The schema document
    pub schema: PathBuf,
    /// The enum catalog document
    pub enums:  PathBuf,
}

/// Render a value as pretty-compact JSON with a trailing newline
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyCompactFormatter::new();
    let mut ser = Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut ser)
        .map_err(|e| Report::new(Error::serialization_failed(what, e)))?;

    buf.push(b'\n');
    Ok(buf)
}

/// Publish both documents for `run` into `output_dir`
pub fn write_outputs(run: &SchemaRun, output_dir: &Path) -> Result<EmittedFiles> {
    let schema = to_json_bytes(&run.entries, SCHEMA_FILE)?;
    let enums = to_json_bytes(&run.catalog.iter().collect::<Vec<_>>(), ENUMS_FILE)?;

    let schema_temp = write_temp(output_dir, &schema)?;
    let enums_temp = write_temp(output_dir, &enums)?;

    let files = EmittedFiles {
        schema: output_dir.join(SCHEMA_FILE),
        enums:  output_dir.join(ENUMS_FILE),
    };
    // Schema last: it is never published without its enum catalog.
    persist(enums_temp, &files.enums)?;
    if let Err(report) = persist(schema_temp, &files.schema) {
        if let Err(e) = std::fs::remove_file(&files.enums) {
            tracing::warn!("Failed to withdraw {}: {e}", files.enums.display());
        }
        return Err(report);
    }

    tracing::info!(
        "Wrote {} entries to {} and {} enums to {}",
        run.entries.len(),
        files.schema.display(),
        run.catalog.len(),
        files.enums.display()
    );
    Ok(files)
}

fn write_temp(dir: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| Report::new(Error::io_failed("create temporary file in", dir, e)))?;
    file.write_all(contents)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| Report::new(Error::io_failed("write", file.path(), e)))?;
    Ok(file)
}

fn persist(file: NamedTempFile, target: &Path) -> Result<()> {
    file.persist(target)
        .map_err(|e| Report::new(Error::io_failed("publish", target, e.error)))
        .attach(format!("Output file: {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

    use serde_json::Value;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::registry::FileRegistry;
    use crate::schema::ClassifierConfig;
    use crate::schema::classify_registry;

    const SAMPLE_REGISTRY: &str = include_str!("../../fixtures/sample_registry.json");

    fn sample_run() -> SchemaRun {
        let registry = FileRegistry::from_json_str(SAMPLE_REGISTRY).unwrap();
        classify_registry(&registry, &ClassifierConfig::default())
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_writes_sorted_schema_and_enums() {
        let dir = TempDir::new().unwrap();
        let files = write_outputs(&sample_run(), dir.path()).unwrap();

        let schema: Value =
            serde_json::from_str(&std::fs::read_to_string(&files.schema).unwrap()).unwrap();
        let names: Vec<&str> = schema
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let enums: Value =
            serde_json::from_str(&std::fs::read_to_string(&files.enums).unwrap()).unwrap();
        assert_eq!(
            enums,
            json!([{
                "key": "net.minecraft.world.item.Rarity",
                "name": "Rarity",
                "values": ["common", "uncommon", "rare", "epic"]
            }])
        );
    }

    #[test]
    fn test_output_is_byte_identical_across_runs() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_outputs(&sample_run(), first.path()).unwrap();
        write_outputs(&sample_run(), second.path()).unwrap();

        for file in [SCHEMA_FILE, ENUMS_FILE] {
            let a = std::fs::read(first.path().join(file)).unwrap();
            let b = std::fs::read(second.path().join(file)).unwrap();
            assert_eq!(a, b, "{file} differs between runs");
            assert_eq!(a.last(), Some(&b'\n'));
        }
    }

    #[test]
    fn test_no_temporary_files_left_behind() {
        let dir = TempDir::new().unwrap();
        write_outputs(&sample_run(), dir.path()).unwrap();
        assert_eq!(dir_entries(dir.path()), vec![ENUMS_FILE, SCHEMA_FILE]);
    }

    #[test]
    fn test_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SCHEMA_FILE), "stale").unwrap();
        write_outputs(&sample_run(), dir.path()).unwrap();

        let contents = std::fs::read_to_string(dir.path().join(SCHEMA_FILE)).unwrap();
        assert!(contents.starts_with('['));
    }

    #[test]
    fn test_missing_output_dir_fails_without_publishing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");

        let error = write_outputs(&sample_run(), &missing)
            .err()
            .expect("writing into a missing directory must fail");
        assert!(matches!(error.current_context(), Error::FileOperation(_)));
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_blocked_enums_target_does_not_publish_schema() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join(ENUMS_FILE);
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let error = write_outputs(&sample_run(), dir.path())
            .err()
            .expect("a blocked enums target must fail the run");
        assert!(matches!(error.current_context(), Error::FileOperation(_)));
        assert!(!dir.path().join(SCHEMA_FILE).exists());
        assert!(blocker.join("keep").exists());
        assert_eq!(dir_entries(dir.path()), vec![ENUMS_FILE]);
    }

    #[test]
    fn test_blocked_schema_target_withdraws_enums() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join(SCHEMA_FILE);
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let error = write_outputs(&sample_run(), dir.path())
            .err()
            .expect("a blocked schema target must fail the run");
        assert!(matches!(error.current_context(), Error::FileOperation(_)));
        assert!(!dir.path().join(ENUMS_FILE).exists());
        assert!(blocker.is_dir());
        assert_eq!(dir_entries(dir.path()), vec![SCHEMA_FILE]);
    }
}
