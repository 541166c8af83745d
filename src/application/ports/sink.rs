use async_trait::async_trait;
use crate::{application::AppResult, domain::TransferRecord};

#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn append(&self, record: &TransferRecord) -> AppResult<()>;
    fn name(&self) -> &str;
}
