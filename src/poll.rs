//! Waiting on long-running remote operations.

use std::time::Duration;

use crate::config::VideoSettings;
use crate::error::ContentError;
use crate::ports::genai_client::{GenAiClient, Operation};
use crate::ports::{Clock, Sleeper};

/// How often to re-check an operation, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay before each re-fetch.
    pub interval: Duration,
    /// Overall deadline. `None` waits until the service reports completion.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { interval: Duration::from_secs(10), timeout: None }
    }
}

impl From<&VideoSettings> for PollPolicy {
    fn from(settings: &VideoSettings) -> Self {
        Self { interval: settings.poll_interval(), timeout: settings.poll_timeout() }
    }
}

/// Re-fetch `operation` every `policy.interval` until it reports done.
///
/// # Errors
///
/// Returns the client's error if a re-fetch fails, or
/// [`ContentError::Timeout`] once the deadline has passed.
pub async fn wait_for_operation(
    client: &dyn GenAiClient,
    mut operation: Operation,
    policy: &PollPolicy,
    clock: &dyn Clock,
    sleeper: &dyn Sleeper,
) -> Result<Operation, ContentError> {
    let started = clock.now();
    let mut polls = 0u32;

    while !operation.done {
        if let Some(timeout) = policy.timeout {
            let waited = (clock.now() - started).to_std().unwrap_or_default();
            if waited >= timeout {
                return Err(ContentError::Timeout {
                    operation: operation.name,
                    waited_secs: waited.as_secs(),
                });
            }
        }

        sleeper.sleep(policy.interval).await;
        operation = client.get_operation(&operation.name).await?;
        polls += 1;
        tracing::debug!(operation = %operation.name, polls, done = operation.done, "polled operation");
    }

    Ok(operation)
}
