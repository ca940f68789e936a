//! Systolic-array test-vector generator CLI.
//!
//! This binary provides a single entry point for producing verification vectors. It performs:
//! 1. **Generate:** Build the run configuration (defaults, optional JSON file, flag
//!    overrides), assemble the bundle, and write the memory images (default command).
//! 2. **Show config:** Print the effective configuration as JSON without generating anything.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sysvec_core::config::Config;
use sysvec_core::fixed::SaturationMode;
use sysvec_core::image::writer;
use sysvec_core::payload;
use sysvec_core::{Result, VectorError};

#[derive(Parser, Debug)]
#[command(
    name = "sysvec",
    author,
    version,
    about = "Fixed-point test vectors for a 4-wide systolic array",
    long_about = "Generate operand, instruction, and expected-output memory images for the systolic \
array testbench.\n\nWith no subcommand, `generate` runs with default settings.\n\nExamples:\n  \
sysvec\n  sysvec generate --sizes 4,8,16 --frac 12 --out build\n  \
sysvec generate --unsigned --saturation final --value-range 255\n  \
sysvec show-config --config vectors.json"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the memory images and metadata.
    Generate(GenerateArgs),

    /// Print the effective configuration as JSON.
    ShowConfig(GenerateArgs),
}

/// Overrides applied on top of the defaults or the configuration file.
#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block sizes, comma-separated; each a positive multiple of 4.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    sizes: Option<Vec<usize>>,

    /// Number of fractional bits.
    #[arg(long = "frac", alias = "frac-width")]
    frac_bits: Option<u32>,

    /// Operand bound R; derived from --frac when omitted.
    #[arg(long)]
    value_range: Option<i64>,

    /// PRNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory (created if absent).
    #[arg(short, long = "out")]
    output_dir: Option<PathBuf>,

    /// Use unsigned 16-bit words instead of signed.
    #[arg(long)]
    unsigned: bool,

    /// Accumulator saturation discipline: per-step or final.
    #[arg(long)]
    saturation: Option<SaturationMode>,

    /// Skip vectors_meta.json.
    #[arg(long)]
    no_metadata: bool,

    /// Print generation statistics after writing.
    #[arg(long)]
    stats: bool,
}

impl GenerateArgs {
    /// Builds the effective configuration: file (or defaults), then flag overrides.
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(sizes) = &self.sizes {
            config.sizes.clone_from(sizes);
        }
        if let Some(frac_bits) = self.frac_bits {
            config.frac_bits = frac_bits;
        }
        if let Some(range) = self.value_range {
            config.value_range = Some(range);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if self.unsigned {
            config.signed = false;
        }
        if let Some(mode) = self.saturation {
            config.saturation = mode;
        }
        if self.no_metadata {
            config.emit_metadata = false;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Generate(args)) => cmd_generate(&args),
        Some(Commands::ShowConfig(args)) => cmd_show_config(&args),
        None => cmd_generate(&GenerateArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Assembles the bundle, writes it, and prints the one-line summary.
///
/// Nothing is written unless assembly succeeds.
fn cmd_generate(args: &GenerateArgs) -> Result<()> {
    let config = args.resolve()?;
    info!(
        sizes = ?config.sizes,
        frac_bits = config.frac_bits,
        seed = config.seed,
        out = %config.output_dir.display(),
        "resolved configuration"
    );
    let bundle = payload::build_bundle(&config)?;
    let written = writer::write_bundle(&config.output_dir, &bundle, config.emit_metadata)?;
    for path in &written.paths {
        debug!(path = %path.display(), "wrote");
    }

    println!("{}", bundle.stats().summary_line(&config.output_dir));
    if args.stats {
        bundle.stats().print();
    }
    Ok(())
}

/// Prints the validated effective configuration.
fn cmd_show_config(args: &GenerateArgs) -> Result<()> {
    let config = args.resolve()?;
    config.validate()?;
    let json = serde_json::to_string_pretty(&config).map_err(VectorError::from)?;
    println!("{json}");
    Ok(())
}
