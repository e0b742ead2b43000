//! 进程内编辑广播。
//!
//! 单实例部署下的发布/订阅底座：一个有界 broadcast 通道承载全部
//! 文档频道，订阅端按 doc_id 过滤。慢消费者按通道语义丢消息，
//! 与"除到达顺序外无投递保证"的约定一致。

use application::{broadcaster::BroadcastError, EditBroadcast, EditBroadcaster};
use async_trait::async_trait;
use domain::DocId;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct LocalEditBroadcaster {
    sender: broadcast::Sender<EditBroadcast>,
}

impl LocalEditBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self, doc_id: DocId) -> EditStream {
        EditStream {
            receiver: self.sender.subscribe(),
            doc_id,
        }
    }
}

#[async_trait]
impl EditBroadcaster for LocalEditBroadcaster {
    async fn publish(&self, payload: EditBroadcast) -> Result<(), BroadcastError> {
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(payload)
            .map_err(|err| BroadcastError::failed(err.to_string()))?;
        Ok(())
    }
}

/// 某一个文档频道的订阅流。
pub struct EditStream {
    receiver: broadcast::Receiver<EditBroadcast>,
    doc_id: DocId,
}

impl EditStream {
    pub async fn recv(&mut self) -> Option<EditBroadcast> {
        loop {
            match self.receiver.recv().await {
                Ok(payload) => {
                    if payload.doc_id == self.doc_id {
                        return Some(payload);
                    }
                }
                // 滞后就跳过被挤掉的消息继续收
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
