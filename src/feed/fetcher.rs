//! Periodic polling refresh for the article list.

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use super::controller::ArticleList;
use super::types::Article;
use crate::TARGET_WEB_REQUEST;

/// Poll the read endpoint forever, publishing a filtered snapshot after
/// each successful refresh.
///
/// The first refresh happens immediately, then one every `interval`.
/// Failures are logged and the previous collection keeps being served.
/// Flipping `cancel_rx` stops the schedule; an in-flight request is not
/// cancelled, only no further one is issued.
pub async fn refresh_loop(
    mut list: ArticleList,
    interval: Duration,
    mut cancel_rx: watch::Receiver<bool>,
    snapshots: mpsc::Sender<Vec<Article>>,
) {
    loop {
        match list.refresh().await {
            Ok(count) => {
                info!(target: TARGET_WEB_REQUEST, "Poll refresh complete: {} articles", count);
                let snapshot: Vec<Article> = list.filtered().into_iter().cloned().collect();
                if snapshots.send(snapshot).await.is_err() {
                    debug!(target: TARGET_WEB_REQUEST, "Snapshot receiver dropped, stopping poll loop");
                    return;
                }
            }
            Err(err) => {
                error!(target: TARGET_WEB_REQUEST, "Poll refresh failed: {}", err);
            }
        }

        tokio::select! {
            _ = cancel_rx.changed() => {
                info!(target: TARGET_WEB_REQUEST, "Poll loop cancelled");
                return;
            }
            _ = sleep(interval) => {}
        }
    }
}
