use std::time::Duration;

use crate::application::AppError;

/// How the block poller waits between failed attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
    pub delay: Duration,
    /// Used instead of `delay` when the node says the block is not there yet.
    pub unavailable_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::from_secs(1),
            unavailable_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
            unavailable_delay: delay,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_unavailable_delay(mut self, delay: Duration) -> Self {
        self.unavailable_delay = delay;
        self
    }

    /// `attempt` is 1-indexed and counts attempts already made.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max)
    }

    pub fn delay_for(&self, err: &AppError) -> Duration {
        match err {
            AppError::BlockUnavailable { .. } => self.unavailable_delay,
            _ => self.delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_never_exhausts() {
        let policy = RetryPolicy::default();
        assert!(!policy.is_exhausted(u32::MAX));
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[test]
    fn bounded_policy_exhausts_at_limit() {
        let policy = RetryPolicy::default().with_max_attempts(3);
        assert!(!policy.is_exhausted(2));
        assert!(policy.is_exhausted(3));
    }

    #[test]
    fn unavailable_blocks_use_short_delay() {
        let policy = RetryPolicy::unbounded(Duration::from_secs(2))
            .with_unavailable_delay(Duration::from_millis(100));
        let unavailable = AppError::BlockUnavailable {
            slot: 5,
            reason: "skipped".into(),
        };
        assert_eq!(policy.delay_for(&unavailable), Duration::from_millis(100));
        assert_eq!(
            policy.delay_for(&AppError::RpcError("timeout".into())),
            Duration::from_secs(2)
        );
    }
}
