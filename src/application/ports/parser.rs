use crate::domain::{Transaction, TransferDetails};

pub trait TransactionParser: Send + Sync {
    fn parse(&self, txn: &Transaction) -> Option<TransferDetails>;
    fn name(&self) -> &str;
}
