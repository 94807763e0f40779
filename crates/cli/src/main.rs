//! Floating-point conversion CLI.
//!
//! This binary exposes the conversion kernel on the command line:
//! 1. **Convert:** Re-encode raw bit patterns from one format into another and
//!    report the raised IEEE 754 exception flags.
//! 2. **Formats:** List the format catalogue with its layouts.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod pattern;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fptrunc_core::config::{ConvertConfig, FormatSpec};
use fptrunc_core::fpu::nan_handling::NanPolicy;
use fptrunc_core::{FormatKind, NarrowingConverter, RoundingMode};

#[derive(Parser, Debug)]
#[command(
    name = "fptrunc",
    author,
    version,
    about = "Bit-exact floating-point format conversions",
    long_about = "Convert raw floating-point bit patterns between formats.\n\nExamples:\n  fptrunc convert --from single --to half 0x3f800000\n  fptrunc convert --from double --to bf16 --rounding rtz 0x400921fb54442d18\n  fptrunc convert --config conv.json 0x7f800001\n  fptrunc formats"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one or more bit patterns.
    Convert {
        /// Source format (overrides the config file).
        #[arg(long)]
        from: Option<FormatKind>,

        /// Destination format (overrides the config file).
        #[arg(long)]
        to: Option<FormatKind>,

        /// Rounding mode: rne, rtz, rdn, rup, or rmm (overrides the config file).
        #[arg(short, long)]
        rounding: Option<RoundingMode>,

        /// Replace every NaN result with the default quiet NaN.
        #[arg(long)]
        canonical_nan: bool,

        /// JSON conversion config.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bit patterns (hex `0x..`, binary `0b..`, or decimal).
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// List the supported formats.
    Formats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            from,
            to,
            rounding,
            canonical_nan,
            config,
            values,
        }) => {
            let mut settings = match config {
                Some(path) => match ConvertConfig::from_file(&path) {
                    Ok(settings) => settings,
                    Err(e) => fail(&format!("{}: {e}", path.display())),
                },
                None => ConvertConfig::default(),
            };
            if let Some(kind) = from {
                settings.source = FormatSpec::Named(kind);
            }
            if let Some(kind) = to {
                settings.destination = FormatSpec::Named(kind);
            }
            if let Some(rm) = rounding {
                settings.rounding = rm;
            }
            if canonical_nan {
                settings.nan_policy = NanPolicy::Canonical;
            }
            match settings.build() {
                Ok(converter) => cmd_convert(&converter, &values),
                Err(e) => fail(&e.to_string()),
            }
        }
        Some(Commands::Formats) => cmd_formats(),
        None => {
            eprintln!("fptrunc: pass a subcommand");
            eprintln!();
            eprintln!("  fptrunc convert --from <fmt> --to <fmt> <bits>...");
            eprintln!("  fptrunc formats");
            eprintln!();
            eprintln!("  fptrunc --help  for full options");
            process::exit(1);
        }
    }
}

/// Converts every pattern and prints `input -> output  flags`, one per line.
///
/// Parsing stops at the first malformed pattern, which exits with code 1.
fn cmd_convert(converter: &NarrowingConverter, values: &[String]) {
    let source = converter.source();
    let destination = converter.destination();
    debug!(%source, %destination, rounding = %converter.rounding(), "converting {} values", values.len());

    for text in values {
        let bits = match pattern::parse(text, &source) {
            Ok(bits) => bits,
            Err(e) => fail(&e.to_string()),
        };
        let (result, flags) = converter.convert_full(bits);
        println!(
            "{} -> {}  {}",
            pattern::render(bits, &source),
            pattern::render(result, &destination),
            flags
        );
    }
}

/// Prints the catalogue as a table.
fn cmd_formats() {
    println!("{:<10} {:>5} {:>8} {:>8} {:>6}  leading bit", "name", "width", "exponent", "mantissa", "bias");
    for kind in FormatKind::ALL {
        let format = kind.format();
        println!(
            "{:<10} {:>5} {:>8} {:>8} {:>6}  {}",
            kind.name(),
            format.width(),
            format.exponent_bits(),
            format.mantissa_bits(),
            format.bias(),
            if format.explicit_leading_bit() { "explicit" } else { "implicit" }
        );
    }
}

fn fail(message: &str) -> ! {
    eprintln!("fptrunc: {message}");
    process::exit(1);
}
