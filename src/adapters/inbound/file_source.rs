use std::{collections::VecDeque, path::Path};
use async_trait::async_trait;
use serde::Deserialize;
use solana_transaction_status::UiConfirmedBlock;
use tokio::sync::Mutex;
use crate::{
    adapters::inbound::block_mapper::map_block,
    application::{AppError, AppResult, BlockGateway},
    domain::Block,
};

/// One recorded `getBlock` response and the slot it was requested for.
#[derive(Debug, Deserialize)]
pub struct ReplayEntry {
    pub slot: u64,
    pub block: UiConfirmedBlock,
}

/// Replays recorded blocks in file order, one per `latest_slot` / `block` pair.
pub struct FileSourceAdaptor {
    blocks: Mutex<VecDeque<Block>>,
}

impl FileSourceAdaptor {
    pub fn new(entries: Vec<ReplayEntry>) -> Self {
        let blocks = entries
            .into_iter()
            .map(|entry| map_block(entry.slot, entry.block))
            .collect();
        Self {
            blocks: Mutex::new(blocks),
        }
    }

    /// Loads a JSON array of `{ "slot": .., "block": <getBlock result> }` objects.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::InvalidSource(format!("cannot read {}: {e}", path.display()))
        })?;
        let entries: Vec<ReplayEntry> = serde_json::from_str(&raw).map_err(|e| {
            AppError::InvalidSource(format!("cannot decode {}: {e}", path.display()))
        })?;
        tracing::info!(blocks = entries.len(), path = %path.display(), "Loaded replay file");
        Ok(Self::new(entries))
    }

    pub async fn remaining(&self) -> usize {
        self.blocks.lock().await.len()
    }
}

#[async_trait]
impl BlockGateway for FileSourceAdaptor {
    async fn latest_slot(&self) -> AppResult<u64> {
        self.blocks
            .lock()
            .await
            .front()
            .map(|block| block.slot)
            .ok_or(AppError::SourceExhausted)
    }

    async fn block(&self, slot: u64) -> AppResult<Block> {
        let mut blocks = self.blocks.lock().await;
        match blocks.front() {
            Some(block) if block.slot == slot => blocks.pop_front().ok_or(AppError::SourceExhausted),
            Some(_) => Err(AppError::BlockUnavailable {
                slot,
                reason: "not the next recorded block".to_string(),
            }),
            None => Err(AppError::SourceExhausted),
        }
    }
}
