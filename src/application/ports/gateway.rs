use async_trait::async_trait;
use crate::{application::AppResult, domain::Block};

/// Read side of the RPC node.
#[async_trait]
pub trait BlockGateway: Send + Sync {
    /// Most recent slot at the gateway's commitment level.
    async fn latest_slot(&self) -> AppResult<u64>;
    /// Full jsonParsed block for `slot`.
    async fn block(&self, slot: u64) -> AppResult<Block>;
}
