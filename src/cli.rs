use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Yelp ratings over changing n")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build per-business series and the meta overlay data set from reviews
    Prepare {
        /// JSON array of reviews (defaults to $REVIEWS_PATH)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Where to write the prepared data set (defaults to $OUTPUT_PATH)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Shared x-domain for all small multiples (each fits its own n if omitted)
        #[arg(long)]
        sm_cutoff: Option<usize>,
        /// Truncate overlay lines to this many reviews (display only)
        #[arg(long)]
        meta_cutoff: Option<usize>,
    },
    /// Keep only reviews of businesses with at least n reviews
    Filter {
        /// Yelp business file (JSON lines) with review counts and IDs
        businesses: PathBuf,
        /// Yelp review file (JSON lines) to be filtered
        reviews: PathBuf,
        /// Minimum number of reviews a business must have
        #[arg(short = 'n', default_value_t = 20)]
        min_reviews: u64,
        /// Output file (defaults to filt-<n>_<reviews> next to the reviews)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Bin businesses by review count and average rating
    Heatmap {
        /// JSON array of businesses with review_count and stars
        businesses: PathBuf,
        /// Base name (including directory) of the output file
        outbase: String,
        /// Emit raw points instead of a 2D histogram
        #[arg(short, long)]
        scatter: bool,
        /// Number of bins for n values
        #[arg(long, default_value_t = 15, value_parser = bin_count)]
        n_bins: usize,
        /// Number of bins for rating values
        #[arg(long, default_value_t = 10, value_parser = bin_count)]
        rating_bins: usize,
        /// Mark a cutoff at this n
        #[arg(short = 'n')]
        cutoff: Option<u64>,
        /// Use a log scale for n in the scatter output
        #[arg(short, long)]
        log: bool,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn bin_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("number of bins must be at least 1".to_string()),
        Ok(bins) => Ok(bins),
        Err(e) => Err(e.to_string()),
    }
}
