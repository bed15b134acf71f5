use crate::backends::llm_error::LlmError;
use crate::console::console;
use std::time::Duration;
use tokio::time::sleep;

pub struct RetryResult<T> {
    pub result: Result<T, LlmError>,
    pub attempts: u32,
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries have been spent. The delay doubles after every retry
/// unless a rate limit supplies its own `retry_after`.
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    max_retries: u32,
    initial_delay: Duration,
    operation_name: &str,
) -> RetryResult<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, LlmError>>,
{
    let mut attempts = 0;
    let mut delay = initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempts > 0 {
                    console().verbose(&format!(
                        "{} succeeded after {} attempts",
                        operation_name,
                        attempts + 1
                    ));
                }
                return RetryResult {
                    result: Ok(result),
                    attempts: attempts + 1,
                };
            }
            Err(e) if e.is_retryable() && attempts < max_retries => {
                attempts += 1;

                let actual_delay = if let LlmError::RateLimit {
                    retry_after: Some(seconds),
                    ..
                } = &e
                {
                    Duration::from_secs(*seconds)
                } else {
                    delay
                };

                console().verbose(&format!(
                    "⏳ {} attempt {}/{} failed: {}. Retrying in {:?}...",
                    operation_name,
                    attempts,
                    max_retries + 1,
                    e.short_message(),
                    actual_delay
                ));

                sleep(actual_delay).await;
                delay *= 2;
            }
            Err(e) => {
                return RetryResult {
                    result: Err(e),
                    attempts: attempts + 1,
                };
            }
        }
    }
}
