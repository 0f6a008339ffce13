use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use exif_scrub::{config, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "exif-scrub",
    version,
    about = "Batch EXIF reporter and metadata stripper — dump every embedded tag to a text report and rebuild a metadata-free copy of each image"
)]
struct Cli {
    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Folder scanned for input images (overrides config)
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Folder receiving the metadata-free copies (overrides config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Folder receiving the per-image metadata reports (overrides config)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config, then apply CLI folder overrides
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }

    // Directory setup failures are fatal; per-file failures are not
    pipeline::ensure_dirs(&config)?;

    log::info!("Scanning folder: {}", config.input_dir.display());
    let files = pipeline::collect_files(&config.input_dir)?;
    log::info!("Found {} file(s) to process", files.len());

    // Process each file sequentially
    let mut results = Vec::new();
    let total = files.len();

    for (i, path) in files.iter().enumerate() {
        log::info!("[{}/{}] Processing: {}", i + 1, total, path.display());

        let result = pipeline::process_file(path, &config);

        if let Some(ref err) = result.error {
            log::error!("  Could not process {}: {err}", path.display());
        } else {
            if result.tags_found {
                log::info!(
                    "  Metadata found! Report saved to {}",
                    config.log_dir.display()
                );
            } else {
                log::info!("  No metadata found.");
            }
            if let Some(ref clean) = result.clean_path {
                log::info!("  Clean image saved to: {}", clean.display());
            }
        }

        results.push(result);
    }

    // JSON output
    if cli.json {
        let json_results: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "path": r.path.display().to_string(),
                    "tags_found": r.tags_found,
                    "report_path": r.report_path.as_ref().map(|p| p.display().to_string()),
                    "clean_path": r.clean_path.as_ref().map(|p| p.display().to_string()),
                    "error": r.error.as_ref().map(|e| e.to_string()),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    // Summary; per-file failures do not change the exit code
    let success = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    log::info!("Done: {success} processed, {failed} failed out of {total} files");

    Ok(())
}
