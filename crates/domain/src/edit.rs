use crate::value_objects::{DocId, Timestamp};

/// 一次编辑广播：携带整篇正文，时间戳由服务端在转发时盖上。
///
/// 中继从不持久化该消息，内容落库只走显式的文档更新接口。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditMessage {
    pub doc_id: DocId,
    pub content: String,
    pub sender: String, // 用户标识或显示名
    pub timestamp: Timestamp,
}

impl EditMessage {
    pub fn new(
        doc_id: DocId,
        content: impl Into<String>,
        sender: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            doc_id,
            content: content.into(),
            sender: sender.into(),
            timestamp,
        }
    }
}

/// 客户端接收广播的频道。
pub fn broadcast_channel(doc_id: &DocId) -> String {
    format!("documents/{doc_id}")
}

/// 客户端发送编辑的频道。
pub fn edit_channel(doc_id: &DocId) -> String {
    format!("documents/{doc_id}/edit")
}
