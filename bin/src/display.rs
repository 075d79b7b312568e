//! Display utilities and output formatting for the quarry CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use quarry_lib::prelude::*;
use quarry_lib::{ScreenReport, Strategy};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for written files.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl Format {
    pub(crate) const fn output(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Tsv => OutputFormat::Tsv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
        }
    }

    /// Returns the file extension for this format.
    pub(crate) const fn extension(self) -> &'static str {
        self.output().extension()
    }
}

/// Write screen results to a file in the specified format.
pub(crate) fn write_results(records: &[EnrichedRecord], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    format.output().write_results(records, BufWriter::new(file))?;
    Ok(())
}

/// Write a bar series to a file in the specified format.
pub(crate) fn write_bars(bars: &[Bar], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    format.output().write_bars(bars, BufWriter::new(file))?;
    Ok(())
}

pub(crate) fn print_results(report: &ScreenReport, strategy: Strategy) {
    let stats = &report.stats;
    let records = &report.selected;
    println!("Strategy: {strategy} ({})", strategy.description());
    println!(
        "Fetched {} quotes, {} passed the pre-filter",
        report.fetched, report.candidates
    );
    println!(
        "Screened {} candidates: {} selected, {} rejected, {} short history, {} failed",
        stats.processed, stats.accepted, stats.rejected, stats.insufficient, stats.failed
    );
    println!();

    if records.is_empty() {
        println!("No stocks selected.");
        return;
    }

    println!(
        "{:<4} {:<8} {:<12} {:>9} {:>8} {:>9} {:>9} {:>10} {:>6}",
        "#", "CODE", "NAME", "PRICE", "CHG%", "MA20", "MA60", "MACD", "CROSS"
    );
    println!("{}", "-".repeat(82));

    for (rank, record) in records.iter().enumerate() {
        let i = &record.indicators;
        println!(
            "{:<4} {:<8} {:<12} {:>9.2} {:>8.2} {:>9.2} {:>9.2} {:>10.4} {:>6}",
            rank + 1,
            record.code(),
            record.name(),
            record.price(),
            record.change_pct(),
            i.ma20,
            i.ma60,
            i.macd_histogram,
            if i.macd_golden_cross { "yes" } else { "" }
        );
    }
}

pub(crate) fn print_bars(code: &str, bars: &[Bar]) {
    println!("{code}");
    println!("{:<12} {:>10} {:>10} {:>8} {:>12}", "DATE", "OPEN", "CLOSE", "CHG%", "VOLUME");
    for bar in bars {
        println!(
            "{:<12} {:>10.2} {:>10.2} {:>8.2} {:>12}",
            bar.date.format("%Y-%m-%d"),
            bar.open,
            bar.close,
            bar.body_pct(),
            bar.volume
        );
    }
    println!();
}

pub(crate) fn print_indices(indices: &[IndexQuote]) {
    println!("{:<8} {:<12} {:>10} {:>8}", "CODE", "NAME", "VALUE", "CHG%");
    println!("{}", "-".repeat(41));
    for index in indices {
        println!(
            "{:<8} {:<12} {:>10.2} {:>8.2}",
            index.code, index.name, index.price, index.change_pct
        );
    }
}

pub(crate) fn print_strategies() {
    println!("{:<18} DESCRIPTION", "NAME");
    println!("{}", "-".repeat(60));
    for strategy in Strategy::ALL {
        println!("{:<18} {}", strategy.as_str(), strategy.description());
    }
}
