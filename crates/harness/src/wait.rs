// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Bounded polling for page conditions
//
// Waits poll a check until it reports true or the timeout elapses. The timeout is
// the only cancellation mechanism: once it passes the wait is abandoned and a
// WaitTimeout is returned to the caller.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::{Duration, Instant};

/// Default polling interval (100ms, matching Playwright's expect polling)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls `check` until it returns `Ok(true)`.
///
/// Probe errors end the wait immediately.
pub async fn poll_until<F, Fut>(what: &str, timeout: Duration, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        if check().await? {
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(timeout_error(what, timeout));
        }

        tokio::time::sleep(DEFAULT_POLL_INTERVAL.min(timeout - elapsed)).await;
    }
}

/// Like [`poll_until`], but check errors count as "not yet".
///
/// Used while a navigation may be in flight, when evaluating in the old
/// document can fail because its execution context was torn down.
pub async fn poll_until_settled<F, Fut>(what: &str, timeout: Duration, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        match check().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => tracing::debug!("Probe for {} failed, retrying: {}", what, e),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(timeout_error(what, timeout));
        }

        tokio::time::sleep(DEFAULT_POLL_INTERVAL.min(timeout - elapsed)).await;
    }
}

/// Runs `future` to completion unless `timeout` elapses first.
///
/// On expiry the future is dropped and a WaitTimeout naming `what` is returned.
pub async fn within<T, F>(what: &str, timeout: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(timeout_error(what, timeout)),
    }
}

fn timeout_error(what: &str, timeout: Duration) -> Error {
    Error::WaitTimeout {
        what: what.to_string(),
        timeout_ms: timeout.as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_returns_once_check_passes() {
        let calls = AtomicU32::new(0);
        poll_until("third call", Duration::from_secs(2), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, Error>(n >= 3) }
        })
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out() {
        let err = poll_until("never", Duration::from_millis(150), || async { Ok::<_, Error>(false) })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::WaitTimeout { ref what, timeout_ms: 150 } if what == "never"
        ));
    }

    #[tokio::test]
    async fn test_check_error_is_fatal_for_poll_until() {
        let err = poll_until("broken", Duration::from_secs(1), || async {
            Err::<bool, _>(Error::ElementNotFound("#gone".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, Error::ElementNotFound(_)));
    }

    #[tokio::test]
    async fn test_check_error_is_retried_while_settling() {
        let calls = AtomicU32::new(0);
        poll_until_settled("navigation", Duration::from_secs(2), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(Error::ElementNotFound("context destroyed".to_string()))
                } else {
                    Ok::<_, Error>(true)
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_within_passes_result_through() {
        let value = within("quick", Duration::from_secs(1), async { Ok::<_, Error>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_within_times_out() {
        let err = within("slow step", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, Error>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, Error::WaitTimeout { timeout_ms: 50, .. }));
        assert!(err.to_string().contains("slow step"));
    }
}
