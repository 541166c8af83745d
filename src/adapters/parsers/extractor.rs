use super::instruction_pair::InstructionPair;
use crate::domain::{Transaction, TransferDetails};

/// Projects the resolved parsed instruction pair into transfer details.
///
/// Only call this for transactions the filter chain accepted. Any missing piece
/// (parsed body, amount, account, signature) yields `None`.
pub fn extract_transfer(txn: &Transaction) -> Option<TransferDetails> {
    let pair = InstructionPair::by_parsed(txn)?;
    let first = pair.first.parsed()?;
    let last = pair.last.parsed()?;

    Some(TransferDetails {
        source_amount: first.amount()?,
        destination_amount: last.amount()?,
        source_account: first.source()?,
        destination_account: last.destination()?,
        transaction_fee: txn.fee,
        signature: txn.signature()?.to_string(),
    })
}
