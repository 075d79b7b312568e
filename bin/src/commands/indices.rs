//! Indices command implementation.

use crate::ApiArgs;
use crate::display::print_indices;
use anyhow::{Context, Result};
use quarry_lib::prelude::*;

/// Show the headline market indices.
pub(crate) async fn show_indices(api: ApiArgs) -> Result<()> {
    let client = ApiClient::new(api.client_config()).context("failed to build HTTP client")?;
    let indices = client
        .index_quotes(&CancellationToken::new())
        .await
        .context("failed to fetch index quotes")?;
    print_indices(&indices);
    Ok(())
}
