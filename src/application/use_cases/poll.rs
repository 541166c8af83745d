use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use crate::{
    application::{AppError, AppResult, BlockGateway, RetryPolicy},
    domain::Block,
};

/// Turns an unreliable gateway into "the next block".
pub struct BlockPoller {
    gateway: Arc<dyn BlockGateway>,
    policy: RetryPolicy,
}

impl BlockPoller {
    pub fn new(gateway: Arc<dyn BlockGateway>, policy: RetryPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches the latest slot and its block, retrying the pair until both succeed.
    ///
    /// Returns `Ok(None)` once `shutdown` is cancelled. A call already in flight is
    /// allowed to finish; cancellation is only observed between attempts and while waiting.
    /// Errors other than transient ones, and exhaustion of a bounded policy, are returned.
    pub async fn next_block(&self, shutdown: &CancellationToken) -> AppResult<Option<Block>> {
        let mut attempt: u32 = 0;

        loop {
            if shutdown.is_cancelled() {
                return Ok(None);
            }
            attempt += 1;

            let err = match self.fetch_pair().await {
                Ok(block) => {
                    if attempt > 1 {
                        tracing::info!(slot = block.slot, attempt, "Block fetched after retries");
                    }
                    return Ok(Some(block));
                }
                Err(err) => err,
            };

            if !err.is_transient() {
                return Err(err);
            }
            if self.policy.is_exhausted(attempt) {
                return Err(AppError::RetryExhausted {
                    attempts: attempt,
                    last_error: err.to_string(),
                });
            }

            let delay = self.policy.delay_for(&err);
            tracing::warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Block fetch failed, retrying"
            );

            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.cancelled() => return Ok(None),
            }
        }
    }

    async fn fetch_pair(&self) -> AppResult<Block> {
        let slot = self.gateway.latest_slot().await?;
        self.gateway.block(slot).await
    }
}
