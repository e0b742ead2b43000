//! Redis 发布/订阅桥。
//!
//! 多实例部署时的跨进程底座：发布端把广播写入
//! `documents/{docId}` 频道，订阅任务把收到的消息回灌进本地
//! 广播器，本实例的 WebSocket 会话仍然只订阅本地通道。

use std::sync::Arc;

use application::{broadcaster::BroadcastError, EditBroadcast, EditBroadcaster};
use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use thiserror::Error;

use crate::broadcast::LocalEditBroadcaster;

const SUBSCRIBE_PATTERN: &str = "documents/*";

#[derive(Debug, Error)]
pub enum RedisBridgeError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub struct RedisEditBroadcaster {
    publisher: redis::aio::ConnectionManager,
}

impl RedisEditBroadcaster {
    /// 建立发布连接并启动订阅任务。
    pub async fn connect(
        url: &str,
        local: Arc<LocalEditBroadcaster>,
    ) -> Result<Self, RedisBridgeError> {
        let client = redis::Client::open(url)?;
        let publisher = client.get_connection_manager().await?;

        let mut pubsub = client.get_async_pubsub().await?;
        pubsub.psubscribe(SUBSCRIBE_PATTERN).await?;

        tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(err) => {
                        tracing::warn!(error = %err, "读取 redis 消息失败");
                        continue;
                    }
                };
                match serde_json::from_str::<EditBroadcast>(&payload) {
                    Ok(broadcast) => {
                        if let Err(err) = local.publish(broadcast).await {
                            tracing::warn!(error = %err, "转发 redis 广播到本地失败");
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "反序列化 redis 广播失败");
                    }
                }
            }
            tracing::info!("redis 订阅流已结束");
        });

        Ok(Self { publisher })
    }
}

#[async_trait]
impl EditBroadcaster for RedisEditBroadcaster {
    async fn publish(&self, payload: EditBroadcast) -> Result<(), BroadcastError> {
        let channel = domain::broadcast_channel(&payload.doc_id);
        let body = serde_json::to_string(&payload)
            .map_err(|err| BroadcastError::failed(err.to_string()))?;

        let mut conn = self.publisher.clone();
        let _receivers: i64 = conn
            .publish(&channel, body)
            .await
            .map_err(|err| BroadcastError::failed(err.to_string()))?;
        Ok(())
    }
}
