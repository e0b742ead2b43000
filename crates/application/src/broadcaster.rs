use async_trait::async_trait;
use domain::{DocId, EditMessage};
use thiserror::Error;

/// 投递到某个文档频道的一次广播。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EditBroadcast {
    pub doc_id: DocId,
    pub message: EditMessage,
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("broadcast failed: {0}")]
    Failed(String),
}

impl BroadcastError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 发布/订阅底座的发布端能力接口。
///
/// 具体实现可以是进程内的 broadcast 通道，也可以是 Redis 频道，
/// 中继逻辑不感知差别。
#[async_trait]
pub trait EditBroadcaster: Send + Sync {
    async fn publish(&self, payload: EditBroadcast) -> Result<(), BroadcastError>;
}
