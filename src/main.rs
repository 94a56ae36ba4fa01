mod error;
mod pipeline;
mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use pipeline::compare::Baseline;
use pipeline::rank::RankOptions;

#[derive(Parser)]
#[command(name = "deal_finder", about = "Best Buy laptop deal finder for saved HTML pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Saved HTML file (Save Page As on a Best Buy listing/search page)
    #[arg(long)]
    html: PathBuf,
    /// Your current RAM in GB
    #[arg(long, default_value = "16")]
    ram: u32,
    /// Your current storage in GB
    #[arg(long, default_value = "512")]
    storage: u32,
    /// Your current CPU generation
    #[arg(long = "cpu-gen", default_value = "10")]
    cpu_gen: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank deals against your specs and print a table
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Include listings that are not upgrades
        #[arg(long)]
        all: bool,
        /// Max deals to display
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Emit the ranked deals as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the top deals as an HTML wishlist page
    Wishlist {
        #[command(flatten)]
        input: InputArgs,
        /// How many deals to include
        #[arg(short = 'n', long, default_value = "3")]
        top: usize,
        /// Output file
        #[arg(short, long, default_value = "wishlist.html")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, all, limit, json } => {
            let html = read_page(&input)?;
            let baseline = baseline_from(&input);
            let opts = RankOptions { include_all: all, top: limit };
            let deals = pipeline::analyze(&html, &baseline, &opts)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deals)?);
            } else {
                report::print_table(&deals, &baseline);
            }
            Ok(())
        }
        Commands::Wishlist { input, top, output } => {
            let html = read_page(&input)?;
            let baseline = baseline_from(&input);
            let opts = RankOptions { include_all: false, top: Some(top) };
            let deals = pipeline::analyze(&html, &baseline, &opts)?;
            if deals.is_empty() {
                println!("No upgrades found; wishlist not written.");
                return Ok(());
            }
            let page = report::render_wishlist(&deals);
            fs::write(&output, page)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("wrote {} deals to {}", deals.len(), output.display());
            println!("Wishlist with {} deals written to {}", deals.len(), output.display());
            Ok(())
        }
    }
}

fn read_page(input: &InputArgs) -> anyhow::Result<String> {
    let html = fs::read_to_string(&input.html)
        .with_context(|| format!("failed to read {}", input.html.display()))?;
    Ok(html)
}

fn baseline_from(input: &InputArgs) -> Baseline {
    Baseline {
        cpu_gen: input.cpu_gen,
        ram_gb: input.ram,
        storage_gb: input.storage,
    }
}
