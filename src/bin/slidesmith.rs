//! slidesmith CLI - compile markup templates into a PowerPoint deck

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use slidesmith::assets::{self, AssetSpec};
use slidesmith::compose::OverflowPolicy;
use slidesmith::deck::{Deck, DeckSpec, demo};

#[derive(Parser)]
#[command(name = "slidesmith")]
#[command(version)]
#[command(about = "Compile markup templates, tables and generated diagrams into .pptx decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the built-in gradient and flowchart images
    Assets {
        /// Directory for the PNG files
        #[arg(short, long, value_name = "DIR", default_value = "slides")]
        out_dir: PathBuf,
    },

    /// Build a deck from a YAML manifest
    Build {
        /// Manifest file
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Override the manifest's output path
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail when a step stack is taller than its placeholder
        #[arg(long)]
        strict: bool,
    },

    /// Build the built-in demo deck
    Demo {
        /// Directory holding the demo templates
        #[arg(long, value_name = "DIR", default_value = "slides")]
        slides_dir: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = demo::DEMO_OUTPUT)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assets { out_dir } => cmd_assets(&out_dir),
        Commands::Build {
            manifest,
            output,
            strict,
        } => cmd_build(&manifest, output, strict).await,
        Commands::Demo {
            slides_dir,
            output,
        } => cmd_demo(&slides_dir, output).await,
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn cmd_assets(out_dir: &Path) -> slidesmith::Result<()> {
    let generated = assets::generate_all(&AssetSpec::builtin(out_dir))?;
    for asset in &generated {
        println!(
            "{} ({}x{}, {} bytes)",
            asset.path.display(),
            asset.width,
            asset.height,
            asset.byte_len
        );
    }
    Ok(())
}

async fn cmd_build(manifest: &Path, output: Option<PathBuf>, strict: bool) -> slidesmith::Result<()> {
    let mut spec = DeckSpec::load(manifest)?;
    if let Some(output) = output {
        spec.output = output;
    }
    if strict {
        spec.overflow = OverflowPolicy::Reject;
    }
    run(&spec).await
}

async fn cmd_demo(slides_dir: &Path, output: PathBuf) -> slidesmith::Result<()> {
    run(&demo::demo_deck(slides_dir, output)).await
}

async fn run(spec: &DeckSpec) -> slidesmith::Result<()> {
    let report = Deck::new().build(spec).await?;
    println!(
        "{}: {} slides, {} bytes",
        report.output.display(),
        report.slides,
        report.bytes
    );
    for page in report.pages.iter().filter(|p| p.overflow.is_some()) {
        println!("  slide {}: step stack overflows its placeholder", page.slide_index + 1);
    }
    Ok(())
}
