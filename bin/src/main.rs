//! quarry CLI - Eastmoney A-share screener.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use quarry_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Screen Eastmoney A-share quotes with moving-average and MACD rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    api: ApiArgs,
}

/// Request pacing shared by every command.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct ApiArgs {
    /// Minimum spacing between requests, in milliseconds
    #[arg(long, env = "QUARRY_API_DELAY_MS", default_value_t = 200, global = true)]
    api_delay_ms: u64,

    /// Upper bound of the random jitter added to the spacing, in milliseconds
    #[arg(long, env = "QUARRY_API_JITTER_MS", default_value_t = 150, global = true)]
    api_jitter_ms: u64,

    /// Maximum requests in flight (capped at 20)
    #[arg(long, env = "QUARRY_API_MAX_CONCURRENT", default_value_t = 4, global = true)]
    api_max_concurrent: usize,
}

impl ApiArgs {
    pub(crate) fn client_config(self) -> ClientConfig {
        ClientConfig {
            request_gap: Duration::from_millis(self.api_delay_ms),
            jitter_max: Duration::from_millis(self.api_jitter_ms),
            max_in_flight: self.api_max_concurrent,
            ..ClientConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one screening pass over the main board
    Screen {
        /// Strategy applied after enrichment
        #[arg(short, long, default_value = "trend-momentum")]
        strategy: Strategy,

        /// Number of records kept, ranked by change percent
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,

        /// Number of enrichment workers
        #[arg(short, long, env = "QUARRY_CONCURRENCY", default_value_t = 10)]
        workers: usize,

        /// Daily bars fetched per candidate
        #[arg(long, default_value_t = 80)]
        bars: usize,

        /// Cancel the run after this many seconds
        #[arg(long, default_value_t = 600)]
        timeout: u64,

        /// Output file path. Prints a table when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for --output
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// List every listed security (code and name)
    List {
        /// Only show codes or names containing this pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show recent daily bars for one or more codes
    Bars {
        /// Security codes (e.g., 600519 000001)
        #[arg(required = true)]
        codes: Vec<String>,

        /// Number of bars per code (max 1000, default 30)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output directory. Files named <code>.<format>; prints when omitted.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format for --output-dir
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Show the headline market indices
    Indices,

    /// List available strategies
    Strategies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Screen {
            strategy,
            top,
            workers,
            bars,
            timeout,
            output,
            format,
        } => {
            let options = commands::screen::ScreenOptions {
                strategy,
                top,
                pool: PoolConfig {
                    workers,
                    bar_count: bars,
                    ..PoolConfig::default()
                },
                timeout: Duration::from_secs(timeout),
                output,
                format,
            };
            commands::screen::screen(cli.api, options, cli.quiet).await
        }
        Commands::List { search } => commands::list::list_universe(cli.api, search.as_deref()).await,
        Commands::Bars {
            codes,
            count,
            output_dir,
            format,
        } => commands::bars::show_bars(cli.api, codes, count, output_dir, format).await,
        Commands::Indices => commands::indices::show_indices(cli.api).await,
        Commands::Strategies => {
            display::print_strategies();
            Ok(())
        }
    }
}
