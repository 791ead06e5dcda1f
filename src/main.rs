use anyhow::Result;

use ratings_over_n::cli::Command;
use ratings_over_n::services::heatmap::HeatmapOptions;
use ratings_over_n::{handle_completions, handle_filter, handle_heatmap, handle_prepare, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Prepare {
            input,
            output,
            sm_cutoff,
            meta_cutoff,
        } => handle_prepare(input, output, sm_cutoff, meta_cutoff),
        Command::Filter {
            businesses,
            reviews,
            min_reviews,
            output,
        } => handle_filter(businesses, reviews, min_reviews, output),
        Command::Heatmap {
            businesses,
            outbase,
            scatter,
            n_bins,
            rating_bins,
            cutoff,
            log,
        } => {
            let options = HeatmapOptions {
                scatter,
                log_scale: log,
                cutoff,
            };
            handle_heatmap(businesses, outbase, n_bins, rating_bins, options)
        }
        Command::Completions { shell } => handle_completions(shell),
    }
}
