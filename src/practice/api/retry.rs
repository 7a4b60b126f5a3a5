use crate::config::retry::{RETRY_COUNT, RETRY_DELAY};
use log::debug;
use reqwest::Response;
use std::future::Future;
use tokio::time::sleep;

fn transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Repeats `fun` while it fails for reasons a retry can fix: the backend is
/// unreachable, times out or answers 5xx. The last attempt is returned as is,
/// so a final 5xx still carries its body. Only for idempotent requests.
pub(super) async fn async_retry<F, U>(fun: F) -> reqwest::Result<Response>
where
    F: Fn() -> U,
    U: Future<Output = reqwest::Result<Response>>,
{
    for attempt in 1..RETRY_COUNT {
        match fun().await {
            Ok(r) if r.status().is_server_error() => {
                debug!("Attempt {} answered {}", attempt, r.status());
            }
            Err(e) if transient(&e) => {
                debug!("Attempt {} failed: {}", attempt, e);
            }
            result => return result,
        }
        sleep(RETRY_DELAY).await;
    }
    fun().await
}
