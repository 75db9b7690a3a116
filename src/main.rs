use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polypatch::config::FileConfig;
use polypatch::input::build_patches;
use polypatch::render::{RenderOptions, patches_to_document, save_document};
use polypatch::Style;

/// Plot the polygons of a GeoJSON file as SVG path patches
///
/// Examples:
///   # Plot every polygon of a feature collection with the default style
///   polypatch parcels.geojson
///
///   # Custom output and style
///   polypatch lakes.geojson -o lakes.svg -s fill=#3377cc -s fill-opacity=0.8
///
///   # Keep SVG's y-down orientation
///   polypatch shapes.geojson --no-flip
#[derive(Parser, Debug)]
#[command(name = "polypatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// GeoJSON input (geometry, Feature or FeatureCollection)
    input: PathBuf,

    /// Path to config file (optional, auto-searches polypatch.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG file path (defaults to {input}.svg)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Style attribute as key=value, repeatable; overrides the config style
    #[arg(short = 's', long = "style", value_parser = Style::parse_assignment)]
    style: Vec<(String, Value)>,

    /// Padding around the drawing as a fraction of its size
    #[arg(long)]
    margin: Option<f64>,

    /// Do not mirror the y axis
    #[arg(long)]
    no_flip: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let (file_config, rejected) = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        (FileConfig::from_file(config_path)?, Vec::new())
    } else {
        let search = FileConfig::load();
        (search.config.unwrap_or_default(), search.rejected)
    };

    let verbose = args.verbose || file_config.verbose;
    init_logger(verbose);
    for (path, reason) in &rejected {
        warn!("Ignoring config file {}: {}", path.display(), reason);
    }

    let style = file_config
        .style
        .clone()
        .merge(&args.style.iter().cloned().collect());
    let options = RenderOptions {
        margin: args.margin.unwrap_or(file_config.margin),
        flip_y: file_config.flip_y && !args.no_flip,
    };
    let output_path = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| args.input.with_extension("svg"));

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", args.input.display());
        println!("  Output: {}", output_path.display());
        println!("  Margin: {}", options.margin);
        println!("  Flip y: {}", options.flip_y);
        println!("  Style: {} attributes", style.len());
        println!();
    }

    let document = read_geojson(&args.input)?;
    let patches = build_patches(&document, &style).context("Failed to build patches")?;
    if patches.is_empty() {
        bail!("No drawable polygons found in {}", args.input.display());
    }

    let svg = patches_to_document(&patches, &options);
    save_document(&output_path, &svg)
        .with_context(|| format!("Failed to write SVG file: {}", output_path.display()))?;

    info!("svg written to {}", output_path.display());
    println!(
        "Wrote {} patches to {} [{:.2}s]",
        patches.len(),
        output_path.display(),
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_geojson(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&contents).context("Failed to parse GeoJSON input")
}
