use crate::value_objects::{DocId, Timestamp};

/// 协同文档实体。
///
/// `content` 始终是完整正文，每次更新整体覆盖，不保留历史版本。
/// `owner_id` 与 `collaborators` 是客户端给出的不透明用户标识，
/// 不与用户表做引用校验。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    pub title: String,
    pub owner_id: String,
    pub content: String,
    pub collaborators: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub const DEFAULT_TITLE: &str = "Untitled Document";

impl Document {
    /// 创建新文档：内容为空，协作者列表以所有者起始。
    pub fn create(
        doc_id: DocId,
        title: Option<String>,
        owner_id: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        let owner_id = owner_id.into();
        Self {
            doc_id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            owner_id: owner_id.clone(),
            content: String::new(),
            collaborators: vec![owner_id],
            created_at: now,
            updated_at: now,
        }
    }

    /// 部分更新：仅覆盖给出的字段，`updated_at` 无条件刷新。
    pub fn apply_update(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        now: Timestamp,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = now;
    }
}
