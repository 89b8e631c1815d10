//! Load a physics document, optionally apply a property-update batch, and
//! print the resulting properties.
//!
//! ```text
//! physics-check --config world_physics.yaml --update update.yaml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sdf_param::logger::init_logger;
use sdf_param::prelude::*;
use tracing::error;

#[derive(Debug, Parser)]
#[command(version, about = "Validate physics parameters and property updates")]
struct Args {
    /// YAML physics document
    #[arg(short, long)]
    config: PathBuf,

    /// YAML or JSON property-update batch to apply after loading
    #[arg(short, long)]
    update: Option<PathBuf>,

    /// Fail when a required parameter is not set
    #[arg(long)]
    strict: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.json, args.debug);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether everything loaded and applied without diagnostics.
fn run(args: &Args) -> Result<bool> {
    let loader = DocumentLoader::builder()
        .schema(physics_schema())
        .fail_on_unmet_requirement(args.strict)
        .build()?;
    let outcome = loader.load_file(&args.config)?;
    let mut clean = outcome.report.diagnostics.is_empty();

    let host = PhysicsConfig::from_element(outcome.element)?.into_host();

    if let Some(path) = &args.update {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let batch: WireParamBatch = serde_yaml::from_str(&content)?;
        let report = host.apply_wire(&batch);
        clean &= report.is_clean();
    }

    host.with_state(|physics| {
        for param in physics.element().params() {
            let param = param.read();
            println!(
                "{} ({}) = {}",
                param.key(),
                param.type_name(),
                param.get_as_string()
            );
        }
        println!("update_period = {}", physics.update_period());
    });

    Ok(clean)
}
