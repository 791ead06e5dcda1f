pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod files;
pub mod series;
pub mod services;
pub mod stats;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::{AppConfig, path_from_env};
use crate::services::filtering::FilterService;
use crate::services::heatmap::{HeatmapOptions, HeatmapService};
use crate::services::preparation::PreparationService;

const DEFAULT_REVIEWS_PATH: &str = "data/filt-500-n-inf_yelp_academic_dataset_reviews.json";
const DEFAULT_OUTPUT_PATH: &str = "data/prepared_reviews.json";

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_prepare(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    sm_cutoff: Option<usize>,
    meta_cutoff: Option<usize>,
) -> Result<()> {
    let input = input.unwrap_or_else(|| path_from_env("REVIEWS_PATH", DEFAULT_REVIEWS_PATH).into());
    let output = output.unwrap_or_else(|| path_from_env("OUTPUT_PATH", DEFAULT_OUTPUT_PATH).into());

    let config = AppConfig::new().with_cutoffs(sm_cutoff, meta_cutoff);
    let service = PreparationService::new(config);
    let summary = service.run(&input, &output)?;

    println!(
        "{} {} businesses, {} reviews (longest series: {})",
        "Prepared".green().bold(),
        summary.businesses.to_string().bold(),
        summary.reviews.to_string().bold(),
        summary.max_length
    );
    if summary.rejected > 0 {
        println!("{} {} malformed reviews", "Rejected".yellow().bold(), summary.rejected);
    }
    println!("{} {}", "Output:".dimmed(), output.display());
    Ok(())
}

pub fn handle_filter(
    businesses: PathBuf,
    reviews: PathBuf,
    min_reviews: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = AppConfig::new();
    config.filter.min_reviews = min_reviews;

    let service = FilterService::new(config.filter);
    let summary = service.run(&businesses, &reviews, output)?;

    println!(
        "{} {}/{} businesses met n >= {} criteria",
        "Filtered".green().bold(),
        summary.businesses_kept,
        summary.businesses_total,
        min_reviews
    );
    println!(
        "{} {}/{} reviews written to {}",
        "Kept".green().bold(),
        summary.reviews_kept,
        summary.reviews_total,
        summary.output.display()
    );
    Ok(())
}

pub fn handle_heatmap(
    businesses: PathBuf,
    outbase: String,
    n_bins: usize,
    rating_bins: usize,
    options: HeatmapOptions,
) -> Result<()> {
    let mut config = AppConfig::new();
    config.heatmap.n_bins = n_bins;
    config.heatmap.rating_bins = rating_bins;

    let kind = if options.scatter { "Scatter" } else { "2D histogram" };
    let service = HeatmapService::new(config.heatmap);
    let summary = service.run(&businesses, &outbase, &options)?;

    println!(
        "{} data made at \n{}",
        kind.green().bold(),
        summary.output.display()
    );
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
