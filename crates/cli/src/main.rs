//! Shelf Life CLI - product lists, expiry alerts and weekly reports.
//!
//! # Usage
//!
//! ```bash
//! # Second page of products expiring soon, sorted by name
//! shelf-cli list inventory.json --status expiring-soon --sort name --page 2
//!
//! # Search by expiry date
//! shelf-cli list inventory.yaml --search 03/15/2025
//!
//! # Batch rollup for one product
//! shelf-cli show inventory.json prod_42
//!
//! # Daily alert email body for a fixed day
//! shelf-cli digest daily inventory.json --today 2025-06-02 --format html
//!
//! # Weekly report data
//! shelf-cli digest weekly inventory.json --format json
//! ```
//!
//! # Commands
//!
//! - `list` - Filter, sort and page products (JSON page plus badge counts)
//! - `show` - Aggregate view of one product (JSON)
//! - `digest daily|weekly` - Render the alert and report emails
//!
//! Thresholds, page size and business name come from `SHELF_*` environment
//! variables (see [`config`]). Logs go to stderr and honour `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shelf_life_core::reference_day;

mod commands;
mod config;
mod email;
mod error;
mod input;

use commands::digest::DigestFormat;
use commands::list::ListArgs;
use config::CliConfig;
use error::CliError;

#[derive(Parser)]
#[command(name = "shelf-cli")]
#[command(author, version, about = "Shelf Life inventory expiry tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with filters, sorting and pagination
    List {
        /// Product snapshot (.json, .yaml or .yml)
        file: PathBuf,

        /// Text to match, or an expiry date (2025-03-15, 03/15/2025, March 15, 2025)
        #[arg(short, long)]
        search: Option<String>,

        /// Status filter (`all`, `expired`, `expiring-soon`, `good`)
        #[arg(long)]
        status: Option<String>,

        /// Earliest expiry on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Earliest expiry on or before this date
        #[arg(long)]
        to: Option<String>,

        /// Sort field (`name`, `category`, `expiry_date`, `status`, `quantity`)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction (`asc`, `desc`)
        #[arg(long)]
        dir: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Products per page (defaults to `SHELF_PAGE_SIZE`)
        #[arg(long)]
        page_size: Option<usize>,

        /// Reference date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show one product with its batch rollup
    Show {
        /// Product snapshot (.json, .yaml or .yml)
        file: PathBuf,

        /// Product ID
        product_id: String,

        /// Reference date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Render the scheduled emails
    Digest {
        #[command(subcommand)]
        kind: DigestKind,
    },
}

#[derive(Subcommand)]
enum DigestKind {
    /// Batches that are expired or expire within the warning window
    Daily {
        /// Product snapshot (.json, .yaml or .yml)
        file: PathBuf,

        /// Reference date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: DigestFormat,
    },
    /// Inventory summary with the coming week's expiries
    Weekly {
        /// Product snapshot (.json, .yaml or .yml)
        file: PathBuf,

        /// Reference date (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: DigestFormat,
    },
}

fn main() {
    // Initialize tracing on stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => emit(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| reference_day(&chrono::Local::now()))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::List {
            file,
            search,
            status,
            from,
            to,
            sort,
            dir,
            page,
            page_size,
            today,
        } => {
            let products = input::load_products(&file)?;
            let args = ListArgs {
                search,
                status,
                from,
                to,
                sort,
                dir,
                page,
                page_size,
            };
            commands::list::run(&products, &args, resolve_today(today), &config)
        }
        Commands::Show {
            file,
            product_id,
            today,
        } => {
            let products = input::load_products(&file)?;
            commands::show::run(&products, &product_id, resolve_today(today), &config)
        }
        Commands::Digest { kind } => match kind {
            DigestKind::Daily {
                file,
                today,
                format,
            } => {
                let products = input::load_products(&file)?;
                commands::digest::daily(&products, resolve_today(today), &config, format)
            }
            DigestKind::Weekly {
                file,
                today,
                format,
            } => {
                let products = input::load_products(&file)?;
                commands::digest::weekly(&products, resolve_today(today), &config, format)
            }
        },
    }
}
