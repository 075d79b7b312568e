//! CLI command implementations.

pub(crate) mod bars;
pub(crate) mod indices;
pub(crate) mod list;
pub(crate) mod screen;

use quarry_lib::CancellationToken;
use std::time::Duration;
use tracing::warn;

/// Returns a token cancelled on Ctrl-C or once `timeout` elapses.
pub(crate) fn cancel_on_signal(timeout: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let watcher = token.clone();
    tokio::spawn(async move {
        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        tokio::select! {
            () = watcher.cancelled() => return,
            () = interrupted => warn!("interrupted, cancelling"),
            () = tokio::time::sleep(timeout) => {
                warn!(timeout_secs = timeout.as_secs(), "run timeout reached, cancelling");
            }
        }
        watcher.cancel();
    });
    token
}
