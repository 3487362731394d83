use clap::{Parser, Subcommand};
use cli::{format_report, format_summary, run_detect, run_evaluate, schemas, DetectOptions};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and classify shapes in one image
    Detect {
        /// Path to the input image
        #[arg(short, long)]
        input: PathBuf,
        /// Detector configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fixed global threshold instead of Otsu's method
        #[arg(short, long)]
        threshold: Option<u8>,
        /// Write the detection result as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a copy of the image with bounding boxes drawn
        #[arg(short, long)]
        annotate: Option<PathBuf>,
    },
    /// Measure classification accuracy over a labelled image set
    Evaluate {
        /// Manifest listing image paths and expected shapes (.toml or .json)
        #[arg(short, long)]
        manifest: PathBuf,
        /// Detector configuration (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the JSON schemas of the config file and detector commands
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            input,
            config,
            threshold,
            output,
            annotate,
        } => {
            let options = DetectOptions {
                input,
                config,
                threshold,
                output,
                annotate,
            };
            let result = run_detect(&options)?;
            print!("{}", format_summary(&result));
            info!("✅ Detection completed!");
        }
        Commands::Evaluate { manifest, config } => {
            let report = run_evaluate(&manifest, config.as_deref())?;
            print!("{}", format_report(&report));
        }
        Commands::Schema => {
            println!("{}", schemas()?);
        }
    }

    Ok(())
}
