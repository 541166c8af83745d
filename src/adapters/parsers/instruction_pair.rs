use crate::domain::{Instruction, Transaction};

/// First and last instruction of a transaction's first inner-instruction group.
#[derive(Debug, Clone, Copy)]
pub struct InstructionPair<'a> {
    pub first: &'a Instruction,
    pub last: &'a Instruction,
}

impl<'a> InstructionPair<'a> {
    /// Resolves the pair for instructions carrying the form `has_form` checks for.
    ///
    /// Some streams open with an administrative instruction that lacks that form, so the
    /// first slot falls back to index 1. The last slot is always the group's final element,
    /// whatever its form.
    pub fn resolve(txn: &'a Transaction, has_form: impl Fn(&Instruction) -> bool) -> Option<Self> {
        let group = txn.first_inner_group()?;
        let first = group.iter().take(2).find(|&ix| has_form(ix))?;
        let last = group.last()?;
        Some(Self { first, last })
    }

    pub fn by_program(txn: &'a Transaction) -> Option<Self> {
        Self::resolve(txn, |ix| ix.program().is_some())
    }

    pub fn by_parsed(txn: &'a Transaction) -> Option<Self> {
        Self::resolve(txn, |ix| ix.parsed().is_some())
    }
}
