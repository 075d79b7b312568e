//! List command implementation.
//!
//! This module handles listing the full security universe with optional filtering.

use crate::ApiArgs;
use anyhow::{Context, Result};
use quarry_lib::prelude::*;

/// List every listed security, optionally filtered by a code or name pattern.
pub(crate) async fn list_universe(api: ApiArgs, search: Option<&str>) -> Result<()> {
    let client = ApiClient::new(api.client_config()).context("failed to build HTTP client")?;
    let cancel = CancellationToken::new();

    let universe = client
        .universe(&cancel)
        .await
        .context("failed to fetch security list")?;

    let matches: Vec<&BriefRecord> = match search {
        Some(pattern) => universe
            .iter()
            .filter(|b| b.code.contains(pattern) || b.name.contains(pattern))
            .collect(),
        None => universe.iter().collect(),
    };

    if matches.is_empty() {
        println!("No securities found.");
        return Ok(());
    }

    println!("{:<10} {:<20}", "CODE", "NAME");
    println!("{}", "-".repeat(30));

    for brief in &matches {
        println!("{:<10} {:<20}", brief.code, brief.name);
    }

    println!("\nTotal: {} securities", matches.len());
    Ok(())
}
