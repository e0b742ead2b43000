use std::sync::Arc;

use domain::{DocId, EditMessage};

use crate::{
    broadcaster::{EditBroadcast, EditBroadcaster},
    clock::Clock,
    error::ApplicationError,
};

/// 发到某个文档编辑频道的一条原始编辑。
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub doc_id: DocId,
    pub content: String,
    pub sender: String,
}

pub struct CollaborationRelayDependencies {
    pub clock: Arc<dyn Clock>,
    pub broadcaster: Arc<dyn EditBroadcaster>,
}

/// 编辑中继：收什么转什么，只换时间戳。
///
/// 内容按整篇替换处理，不做任何合并，也不在广播路径上落库，
/// 持久化走独立的文档更新接口。发送者自己也会收到回显，
/// 客户端以此确认送达。
pub struct CollaborationRelay {
    deps: CollaborationRelayDependencies,
}

impl CollaborationRelay {
    pub fn new(deps: CollaborationRelayDependencies) -> Self {
        Self { deps }
    }

    /// 盖上服务端当前时间后原样转发，返回盖章后的消息。
    pub async fn handle_edit(&self, request: EditRequest) -> Result<EditMessage, ApplicationError> {
        let message = EditMessage::new(
            request.doc_id.clone(),
            request.content,
            request.sender,
            self.deps.clock.now(),
        );

        if let Err(broadcast_error) = self
            .deps
            .broadcaster
            .publish(EditBroadcast {
                doc_id: request.doc_id,
                message: message.clone(),
            })
            .await
        {
            tracing::error!(
                doc_id = %message.doc_id,
                error = %broadcast_error,
                "编辑消息广播失败"
            );
            return Err(broadcast_error.into());
        }

        Ok(message)
    }
}
