//! Predicates a transaction must satisfy before a transfer record is extracted.
//!
//! Every predicate treats missing or oddly shaped data as a plain `false`.

use super::instruction_pair::InstructionPair;
use crate::domain::{
    Instruction, Transaction, TransactionStatus, SPL_TOKEN_PROGRAM, TRANSFER_INSTRUCTION, USDC_MINT,
    WRAPPED_BTC_MINT, WRAPPED_SOL_MINT,
};

/// Allowed mints on each side of the swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintPair {
    pub source_mints: Vec<String>,
    pub destination_mint: String,
}

impl Default for MintPair {
    fn default() -> Self {
        Self {
            source_mints: vec![USDC_MINT.to_string(), WRAPPED_BTC_MINT.to_string()],
            destination_mint: WRAPPED_SOL_MINT.to_string(),
        }
    }
}

/// Both resolved instructions belong to the SPL token program.
pub fn is_token_program_pair(txn: &Transaction) -> bool {
    InstructionPair::by_program(txn).is_some_and(|pair| {
        pair.first.program() == Some(SPL_TOKEN_PROGRAM)
            && pair.last.program() == Some(SPL_TOKEN_PROGRAM)
    })
}

/// Both resolved instructions are parsed `transfer`s.
pub fn is_transfer_pair(txn: &Transaction) -> bool {
    let is_transfer = |ix: &Instruction| {
        ix.parsed()
            .and_then(|parsed| parsed.instruction_type.as_deref())
            == Some(TRANSFER_INSTRUCTION)
    };
    InstructionPair::by_parsed(txn)
        .is_some_and(|pair| is_transfer(pair.first) && is_transfer(pair.last))
}

pub fn is_allowed_mint_pair(txn: &Transaction, mints: &MintPair) -> bool {
    let (Some(source), Some(destination)) =
        (txn.pre_token_balances.first(), txn.pre_token_balances.last())
    else {
        return false;
    };
    mints.source_mints.iter().any(|mint| *mint == source.mint)
        && destination.mint == mints.destination_mint
}

/// No error and an explicit `Ok` status. An absent status counts as unclean.
pub fn executed_cleanly(txn: &Transaction) -> bool {
    txn.err.is_none() && txn.status == Some(TransactionStatus::Ok)
}

#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    mints: MintPair,
}

impl FilterChain {
    pub fn new(mints: MintPair) -> Self {
        Self { mints }
    }

    /// Cheapest checks first; stops at the first failing predicate.
    pub fn accepts(&self, txn: &Transaction) -> bool {
        is_token_program_pair(txn)
            && is_transfer_pair(txn)
            && is_allowed_mint_pair(txn, &self.mints)
            && executed_cleanly(txn)
    }
}
