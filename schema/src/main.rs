//! # component-schema
//!
//! Reads a registry dump, classifies every data component and writes
//! `component_schema.json` and `component_enums.json`.
//!
//! ```bash
//! component-schema --registry registry.json --output-dir generated
//! component-schema --registry registry.json --sound-like mod.sounds.Jingle --log-level debug
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use component_schema::emit::EmittedFiles;
use component_schema::emit::write_outputs;
use component_schema::error::Result;
use component_schema::registry::FileRegistry;
use component_schema::schema::ClassifierConfig;
use component_schema::schema::RunSummary;
use component_schema::schema::classify_registry;
use component_schema::support::tracing::TracingLevel;
use component_schema::support::tracing::init_file_tracing;
use component_schema::support::tracing::trace_log_path;

#[derive(Parser, Debug)]
#[command(name = "component-schema")]
#[command(about = "Classify data component wire encodings and emit their schema", long_about = None)]
struct Args {
    /// Registry dump written by the runtime introspection step
    #[arg(short, long)]
    registry: PathBuf,

    /// Directory receiving component_schema.json and component_enums.json
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Extra referent type treated as sound-like (repeatable)
    #[arg(long = "sound-like", value_name = "TYPE")]
    sound_like: Vec<String>,

    /// Trace log level: error, warn, info, debug, trace
    #[arg(long, default_value_t = TracingLevel::Warn)]
    log_level: TracingLevel,

    /// Directory for the trace log (defaults to the system temp directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_dir = args.log_dir.clone().unwrap_or_else(std::env::temp_dir);
    let _guard = match init_file_tracing(&log_dir, args.log_level) {
        Ok(guard) => guard,
        Err(report) => {
            eprintln!("component-schema: {report:?}");
            return ExitCode::FAILURE;
        },
    };

    match generate(&args) {
        Ok((files, summary)) => {
            println!(
                "component-schema: wrote {} and {}",
                files.schema.display(),
                files.enums.display()
            );
            print!("{summary}");
            ExitCode::SUCCESS
        },
        Err(report) => {
            tracing::error!("Run failed: {report:?}");
            eprintln!("component-schema: {report:?}");
            eprintln!("Trace log: {}", trace_log_path(&log_dir).display());
            ExitCode::FAILURE
        },
    }
}

fn generate(args: &Args) -> Result<(EmittedFiles, RunSummary)> {
    let registry = FileRegistry::load(&args.registry)?;
    if let Some(version) = registry.version() {
        tracing::info!("Registry dump for version {version}");
    }

    let config = ClassifierConfig::with_sound_like(args.sound_like.iter().map(String::as_str));
    let run = classify_registry(&registry, &config);
    let files = write_outputs(&run, &args.output_dir)?;
    Ok((files, run.summary))
}
