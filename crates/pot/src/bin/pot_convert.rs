//! `.pot` conversion CLI.
//!
//! - `pot-convert decode` - Decode files and print a summary or JSON
//! - `pot-convert export` - Decode files and write one text file per class
//! - `pot-convert load` - Reload class files and print per-class counts

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use casia_pot::label::decode_label;
use casia_pot::sample::label_hex;
use casia_pot::text::parse_label_hex;
use casia_pot::{decode_parallel, ClassStore, Config, Dataset, Decoded, StreamDecoder};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

/// Decode CASIA online handwriting `.pot` files.
#[derive(Parser)]
#[command(name = "pot-convert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode files and print what they contain.
    Decode(DecodeArgs),

    /// Decode files, bucket samples by class and write one text file per class.
    ///
    /// Settings come from `--config` when given, then command-line flags.
    Export(ExportArgs),

    /// Reload a class file directory.
    Load(LoadArgs),
}

#[derive(Args)]
struct DecodeArgs {
    /// `.pot` files to decode.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print every sample as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Decode records on all cores.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct ExportArgs {
    /// `.pot` files to decode; replaces the configured inputs.
    files: Vec<PathBuf>,

    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for class files.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rewrite class files even if the directory is populated.
    #[arg(long)]
    overwrite: bool,

    /// Decode records on all cores.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct LoadArgs {
    /// Class file directory.
    dir: PathBuf,

    /// Only load these classes (hex, e.g. `0xb0a1`). Repeatable.
    #[arg(long = "class", value_parser = parse_class)]
    classes: Vec<u16>,
}

fn parse_class(text: &str) -> Result<u16, String> {
    parse_label_hex(&text.to_ascii_lowercase()).ok_or_else(|| format!("`{text}` is not a 0x-prefixed u16"))
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    decoded: &'a Decoded,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON output.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => decode(args),
        Commands::Export(args) => export(args),
        Commands::Load(args) => load(args),
    }
}

fn decode_file(path: &Path, parallel: bool) -> Result<Decoded> {
    if parallel {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return Ok(decode_parallel(&data));
    }
    match StreamDecoder::new().decode_file(path) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            warn!(
                path = %path.display(),
                samples = err.decoded.samples.len(),
                "discarding partial decode"
            );
            Err(err).with_context(|| format!("decoding {}", path.display()))
        }
    }
}

fn decode(args: DecodeArgs) -> Result<()> {
    let mut results = Vec::with_capacity(args.files.len());
    for path in &args.files {
        results.push((path, decode_file(path, args.parallel)?));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let reports: Vec<FileReport<'_>> = results
            .iter()
            .map(|(path, decoded)| FileReport {
                path: path.as_path(),
                decoded,
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &reports)?;
        writeln!(out)?;
        return Ok(());
    }
    for (path, decoded) in &results {
        let classes = Dataset::from_samples(decoded.samples.iter().cloned()).len();
        writeln!(
            out,
            "{}: {} samples, {} classes, {} skipped{}",
            path.display(),
            decoded.samples.len(),
            classes,
            decoded.skipped,
            if decoded.truncated { ", truncated" } else { "" }
        )?;
    }
    Ok(())
}

fn export(args: ExportArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if !args.files.is_empty() {
        config.inputs = args.files;
    }
    if let Some(out) = args.out {
        config.output_dir = out;
    }
    config.overwrite |= args.overwrite;
    config.parallel |= args.parallel;
    if config.inputs.is_empty() {
        bail!("no input files");
    }

    let mut dataset = Dataset::new();
    for path in &config.inputs {
        let part = Dataset::from_samples(decode_file(path, config.parallel)?);
        info!(path = %path.display(), classes = part.len(), "bucketed file");
        dataset.merge(part);
    }
    info!(
        classes = dataset.len(),
        samples = dataset.sample_count(),
        "bucketed samples"
    );

    let store = ClassStore::new(&config.output_dir);
    let report = store.write(&dataset, config.write_mode())?;
    if report.skipped_populated {
        println!(
            "{} already holds class files; pass --overwrite to replace them",
            store.dir().display()
        );
    } else {
        println!(
            "wrote {} classes to {}",
            report.classes_written,
            store.dir().display()
        );
    }
    Ok(())
}

fn load(args: LoadArgs) -> Result<()> {
    let store = ClassStore::new(&args.dir);
    let dataset = if args.classes.is_empty() {
        store.load_all()?
    } else {
        store.load_selected(&args.classes)?
    };
    if dataset.is_empty() {
        warn!(dir = %args.dir.display(), "no class files found");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (code, samples) in dataset.classes() {
        let glyph = decode_label(code).map(String::from).unwrap_or_else(|_| "?".into());
        writeln!(out, "{}\t{}\t{}", label_hex(code), glyph, samples.len())?;
    }
    Ok(())
}
