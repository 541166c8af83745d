use crate::{
    adapters::parsers::{extract_transfer, FilterChain, MintPair},
    application::ports::parser::TransactionParser,
    domain::{Transaction, TransferDetails},
};

/// Two-hop SPL token transfer between an allowed source mint and the destination mint.
pub struct SplTransferParser {
    filters: FilterChain,
}

impl SplTransferParser {
    pub fn new(mints: MintPair) -> Self {
        Self {
            filters: FilterChain::new(mints),
        }
    }
}

impl Default for SplTransferParser {
    fn default() -> Self {
        Self::new(MintPair::default())
    }
}

impl TransactionParser for SplTransferParser {
    fn name(&self) -> &str {
        "SplTransferParser"
    }

    fn parse(&self, txn: &Transaction) -> Option<TransferDetails> {
        if !self.filters.accepts(txn) {
            return None;
        }
        extract_transfer(txn)
    }
}
