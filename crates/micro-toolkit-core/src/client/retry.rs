//! Retry policy for transient transport failures

use std::future::Future;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::logging::Logger;

/// Fixed-delay retry policy.
///
/// Only errors for which [`GatewayError::is_transient`] holds are retried.
/// Everything else (HTTP statuses, bad arguments, bad payloads) is returned
/// from the first attempt.
///
/// [`GatewayError::is_transient`]: crate::error::GatewayError::is_transient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.retry_count(), config.retry_delay())
    }

    /// Total attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out
    pub async fn run<T, F, Fut>(&self, logger: &dyn Logger, label: &str, mut op: F) -> GatewayResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let mut retries = 0u32;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    logger.warn(&format!(
                        "[GatewayClient] {} failed (attempt {}/{}): {}; retrying in {:?}",
                        label,
                        retries,
                        self.max_attempts(),
                        error,
                        self.delay
                    ));
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(error) => {
                    if retries > 0 {
                        logger.error(&format!(
                            "[GatewayClient] {} failed after {} attempts: {}",
                            label,
                            retries + 1,
                            error
                        ));
                    }
                    return Err(error);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RETRY_COUNT, crate::config::DEFAULT_RETRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::logging::NoOpLogger;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let attempts = &AtomicU32::new(0);
        let result = fast(3)
            .run(&NoOpLogger, "GET /mcp/tools", move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok::<_, GatewayError>(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_exhaust_retries() {
        let attempts = &AtomicU32::new(0);
        let result: GatewayResult<()> = fast(3)
            .run(&NoOpLogger, "GET /mcp/tools", move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::connect("http://gw/mcp/tools", "connection refused"))
            })
            .await;

        assert!(result.unwrap_err().is_connection());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let attempts = &AtomicU32::new(0);
        let result = fast(2)
            .run(&NoOpLogger, "POST /mcp/call", move || async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    Err(GatewayError::timeout("http://gw/mcp/call", "deadline elapsed"))
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_failures_not_retried() {
        for error in [
            GatewayError::Unauthorized,
            GatewayError::Forbidden,
            GatewayError::status(500, "boom"),
            GatewayError::ToolFailed("bad".into()),
        ] {
            let attempts = &AtomicU32::new(0);
            let error = &std::sync::Mutex::new(Some(error));
            let result: GatewayResult<()> = fast(5)
                .run(&NoOpLogger, "POST /mcp/call", move || async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(error.lock().unwrap().take().unwrap())
                })
                .await;

            assert!(result.is_err());
            assert_eq!(attempts.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_zero_retries() {
        let attempts = &AtomicU32::new(0);
        let result: GatewayResult<()> = RetryPolicy::none()
            .run(&NoOpLogger, "GET /health", move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::connect("http://gw/health", "reset"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_spaced_by_delay() {
        let started = tokio::time::Instant::now();
        let offsets = &parking_lot::Mutex::new(Vec::new());
        let result: GatewayResult<()> = RetryPolicy::new(2, Duration::from_millis(250))
            .run(&NoOpLogger, "GET /mcp/tools", move || async move {
                offsets.lock().push(started.elapsed());
                Err(GatewayError::connect("http://gw/mcp/tools", "connection refused"))
            })
            .await;

        assert!(result.is_err());
        let offsets = offsets.lock();
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], Duration::ZERO);
        for pair in offsets.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap >= Duration::from_millis(250), "gap {:?} shorter than delay", gap);
            assert!(gap < Duration::from_millis(300), "gap {:?} longer than delay", gap);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_skips_delay() {
        let started = tokio::time::Instant::now();
        let result: GatewayResult<()> = RetryPolicy::new(3, Duration::from_secs(10))
            .run(&NoOpLogger, "POST /mcp/call", || async { Err(GatewayError::Forbidden) })
            .await;

        assert!(result.is_err());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_from_config() {
        let config = GatewayConfig::new("http://localhost")
            .with_retry_count(5)
            .with_retry_delay(Duration::from_millis(200));
        let policy = RetryPolicy::from_config(&config);

        assert_eq!(policy, RetryPolicy::new(5, Duration::from_millis(200)));
        assert_eq!(policy.max_attempts(), 6);
        assert_eq!(RetryPolicy::default(), RetryPolicy::new(3, Duration::from_secs(1)));
    }
}
