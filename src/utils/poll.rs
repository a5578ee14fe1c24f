//! Interval/deadline polling primitive.
//!
//! Blocking external confirmations (a VPN relay switch, for now) are waited
//! on with the same shape: try, sleep, try again, give up at a deadline.
//! `poll_until` expresses that shape once, parameterized by interval and
//! deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

/// Polls `attempt` on a fixed `interval` until it yields a value or the
/// overall `deadline` elapses.
///
/// The first attempt runs immediately. Returns `None` on deadline expiry.
/// The caller blocks for the whole wait; this is intentional for operations
/// that gate every subsequent step.
pub async fn poll_until<T, F, Fut>(interval: Duration, deadline: Duration, mut attempt: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let poll_loop = async {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Some(value) = attempt().await {
                return value;
            }
        }
    };

    tokio::time::timeout(deadline, poll_loop).await.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_immediate_success() {
        let result = poll_until(Duration::from_secs(1), Duration::from_secs(60), || async {
            Some(42)
        })
        .await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_succeeds_after_attempts() {
        let attempts = AtomicUsize::new(0);
        let result = poll_until(Duration::from_secs(1), Duration::from_secs(60), || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n >= 3 {
                    Some("confirmed")
                } else {
                    None
                }
            }
        })
        .await;
        assert_eq!(result, Some("confirmed"));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_deadline_expires() {
        let result: Option<()> =
            poll_until(Duration::from_secs(1), Duration::from_secs(60), || async {
                None
            })
            .await;
        assert_eq!(result, None);
    }
}
