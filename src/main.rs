use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use unlocode2openclimate::logging::init_logging;
use unlocode2openclimate::{run, CoordinatePolicy, InputEncoding, RunConfig};

#[derive(Parser)]
#[command(name = "unlocode2openclimate")]
#[command(about = "Convert UN/LOCODE code lists to OpenClimate CSV tables")]
#[command(version)]
struct Cli {
    /// TOML file overriding the built-in 2022-1 settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the code list parts
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory the tables are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long, value_enum)]
    encoding: Option<InputEncoding>,

    /// Skip Territory rows with unreadable coordinates instead of failing
    #[arg(long)]
    lenient_coordinates: bool,

    /// Log every skipped row
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // 1. Settings: defaults, then file, then flags
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }
    if cli.lenient_coordinates {
        config.coordinates = CoordinatePolicy::Lenient;
    }

    // 2. Convert
    let summary = run(&config).context("conversion failed")?;

    println!("Rows read:          {}", summary.rows_read);
    println!("Skipped (no code):  {}", summary.skipped_no_location);
    println!("Skipped (function): {}", summary.skipped_function);
    println!("Actor rows:         {}", summary.actors);
    println!("ActorName rows:     {}", summary.actor_names);
    println!("Territory rows:     {}", summary.territories);
    println!("Output directory:   {}", config.output_dir.display());

    Ok(())
}
