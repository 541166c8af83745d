use std::time::Duration;
use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcBlockConfig,
    rpc_request::RpcError,
};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_transaction_status::{TransactionDetails, UiTransactionEncoding};
use crate::{
    adapters::inbound::block_mapper::map_block,
    application::{AppError, AppResult, BlockGateway},
    domain::Block,
};

/// JSON-RPC error codes the node uses when a block is not (yet) retrievable.
const BLOCK_NOT_AVAILABLE: i64 = -32004;
const SLOT_SKIPPED: i64 = -32007;
const LONG_TERM_STORAGE_SLOT_SKIPPED: i64 = -32009;

pub struct SolanaRpcGateway {
    client: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpcGateway {
    pub fn new(rpc_url: String, timeout: Duration, commitment: CommitmentConfig) -> Self {
        tracing::info!("Connecting to RPC endpoint: {}", rpc_url);
        Self {
            client: RpcClient::new_with_timeout_and_commitment(rpc_url, timeout, commitment),
            commitment,
        }
    }

    /// The filter chain reads parsed instruction bodies, so the encoding and version
    /// are fixed.
    fn block_config(&self) -> RpcBlockConfig {
        RpcBlockConfig {
            encoding: Some(UiTransactionEncoding::JsonParsed),
            transaction_details: Some(TransactionDetails::Full),
            rewards: Some(false),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        }
    }
}

#[async_trait]
impl BlockGateway for SolanaRpcGateway {
    async fn latest_slot(&self) -> AppResult<u64> {
        self.client
            .get_slot_with_commitment(self.commitment)
            .await
            .map_err(|e| AppError::RpcError(format!("getSlot failed: {e}")))
    }

    async fn block(&self, slot: u64) -> AppResult<Block> {
        let ui_block = self
            .client
            .get_block_with_config(slot, self.block_config())
            .await
            .map_err(|e| classify_block_error(slot, e))?;

        let block = map_block(slot, ui_block);
        tracing::debug!(slot, transactions = block.transactions.len(), "Fetched block");
        Ok(block)
    }
}

fn classify_block_error(slot: u64, err: ClientError) -> AppError {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) = err.kind()
    {
        if matches!(
            *code,
            BLOCK_NOT_AVAILABLE | SLOT_SKIPPED | LONG_TERM_STORAGE_SLOT_SKIPPED
        ) {
            return AppError::BlockUnavailable {
                slot,
                reason: message.clone(),
            };
        }
    }
    AppError::RpcError(format!("getBlock({slot}) failed: {err}"))
}
