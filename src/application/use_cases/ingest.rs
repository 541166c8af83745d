use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use crate::{
    application::{AppError, AppResult, BlockPoller, RecordSink, TransactionParser},
    domain::{Block, TransferRecord},
};

/// How many matches a single block may deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Deliver every qualifying transaction, then move on to the next block.
    #[default]
    AllMatches,
    /// Stop scanning a block after its first delivered record.
    FirstMatch,
}

#[derive(Debug)]
pub struct DeliveryFailure {
    pub signature: String,
    pub error: AppError,
}

/// Outcome of scanning one block.
#[derive(Debug, Default)]
pub struct BlockReport {
    pub slot: u64,
    pub scanned: usize,
    pub delivered: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl BlockReport {
    pub fn matched(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

pub struct IngestionPipeline {
    poller: BlockPoller,
    parsers: Vec<Arc<dyn TransactionParser>>,
    sink: Arc<dyn RecordSink>,
    scan_policy: ScanPolicy,
}

impl IngestionPipeline {
    pub fn new(
        poller: BlockPoller,
        parsers: Vec<Arc<dyn TransactionParser>>,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        Self {
            poller,
            parsers,
            sink,
            scan_policy: ScanPolicy::default(),
        }
    }

    pub fn with_scan_policy(mut self, scan_policy: ScanPolicy) -> Self {
        self.scan_policy = scan_policy;
        self
    }

    /// Polls and scans blocks until `shutdown` is cancelled.
    ///
    /// A block whose slot is not newer than the last scanned one is skipped, so polling
    /// faster than the chain advances does not deliver the same records twice.
    pub async fn run(&self, shutdown: CancellationToken) -> AppResult<()> {
        let mut last_slot: Option<u64> = None;

        loop {
            let block = match self.poller.next_block(&shutdown).await {
                Ok(Some(block)) => block,
                Ok(None) => break,
                Err(AppError::SourceExhausted) => {
                    tracing::info!("Source reached end of stream.");
                    break;
                }
                Err(err) => return Err(err),
            };

            if last_slot.is_some_and(|last| block.slot <= last) {
                tracing::debug!(slot = block.slot, "Slot already scanned, waiting");
                tokio::select! {
                    _ = sleep(self.poller.policy().delay) => {}
                    _ = shutdown.cancelled() => break,
                }
                continue;
            }
            last_slot = Some(block.slot);

            let report = self.process_block(&block).await;
            for failure in &report.failures {
                tracing::error!(
                    slot = report.slot,
                    signature = %failure.signature,
                    sink = self.sink.name(),
                    error = %failure.error,
                    "Dropping record after sink failure"
                );
            }
            tracing::info!(
                slot = report.slot,
                scanned = report.scanned,
                matched = report.matched(),
                delivered = report.delivered,
                "Block processed"
            );
        }

        tracing::info!("Ingestion pipeline stopped");
        Ok(())
    }

    /// Runs every transaction of `block` through the parsers and appends matches to the
    /// sink. A failed append is recorded in the report and scanning continues.
    pub async fn process_block(&self, block: &Block) -> BlockReport {
        let mut report = BlockReport {
            slot: block.slot,
            ..Default::default()
        };

        'transactions: for txn in &block.transactions {
            report.scanned += 1;

            for parser in &self.parsers {
                let Some(details) = parser.parse(txn) else {
                    continue;
                };
                tracing::debug!(
                    parser = parser.name(),
                    signature = %details.signature,
                    "Matched transfer"
                );

                let record = TransferRecord::new(details, block);
                match self.sink.append(&record).await {
                    Ok(()) => report.delivered += 1,
                    Err(error) => report.failures.push(DeliveryFailure {
                        signature: record.details.signature.clone(),
                        error,
                    }),
                }

                if self.scan_policy == ScanPolicy::FirstMatch && report.delivered > 0 {
                    break 'transactions;
                }
            }
        }

        report
    }
}
