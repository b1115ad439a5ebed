use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use contractkit_observability::LogFormat;

#[derive(Parser)]
#[command(name = "contractkit-codegen")]
#[command(about = "Generate Rust data models from an OpenAPI 3.x spec")]
struct Cli {
    /// Log output format (json or pretty).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the model directory from the spec.
    Generate {
        /// OpenAPI YAML file.
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory; removed and recreated on every run.
        #[arg(short, long)]
        out: PathBuf,

        /// Compare with the files on disk instead of writing.
        #[arg(long)]
        check: bool,
    },
    /// Validate the spec without generating anything.
    Validate {
        /// OpenAPI YAML file.
        #[arg(short, long)]
        spec: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    contractkit_observability::init(cli.log_format);

    match cli.command {
        Command::Generate { spec, out, check: false } => {
            let report = contractkit_codegen::generate(&spec, &out)
                .with_context(|| format!("generating models from {}", spec.display()))?;
            for file in &report.files {
                tracing::info!(file = %report.out_dir.join(file).display(), "written");
            }
        }
        Command::Generate { spec, out, check: true } => {
            let drift = contractkit_codegen::check_generated(&spec, &out)
                .with_context(|| format!("checking models generated from {}", spec.display()))?;
            if !drift.is_empty() {
                for d in &drift {
                    tracing::error!(%d, "generated output is out of date");
                }
                bail!(
                    "{} is out of date with {} ({} file(s)); rerun `make generate`",
                    out.display(),
                    spec.display(),
                    drift.len()
                );
            }
            tracing::info!(out_dir = %out.display(), "generated models are up to date");
        }
        Command::Validate { spec } => {
            contractkit_codegen::check_spec(&spec)
                .with_context(|| format!("validating {}", spec.display()))?;
        }
    }

    Ok(())
}
