//! 对外 JSON 投影。
//!
//! 字段名保持 camelCase，与前端约定一致；广播消息的时间戳
//! 以 Unix 毫秒表示。

use domain::{Document, EditMessage, Timestamp, User};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.into(),
            username: user.username.to_string(),
            email: user.email.to_string(),
        }
    }
}

/// 创建接口只回最小投影。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreatedDto {
    pub doc_id: String,
    pub title: String,
}

impl From<&Document> for DocumentCreatedDto {
    fn from(document: &Document) -> Self {
        Self {
            doc_id: document.doc_id.to_string(),
            title: document.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
    pub doc_id: String,
    pub title: String,
    pub owner_id: String,
    pub content: String,
    pub collaborators: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: Timestamp,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: Timestamp,
}

impl From<&Document> for DocumentDto {
    fn from(document: &Document) -> Self {
        Self {
            doc_id: document.doc_id.to_string(),
            title: document.title.clone(),
            owner_id: document.owner_id.clone(),
            content: document.content.clone(),
            collaborators: document.collaborators.clone(),
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageDto {
    pub doc_id: String,
    pub content: String,
    pub sender: String,
    /// Unix 毫秒。
    pub timestamp: i64,
}

impl From<&EditMessage> for EditMessageDto {
    fn from(message: &EditMessage) -> Self {
        Self {
            doc_id: message.doc_id.to_string(),
            content: message.content.clone(),
            sender: message.sender.clone(),
            timestamp: unix_millis(message.timestamp),
        }
    }
}

pub fn unix_millis(timestamp: Timestamp) -> i64 {
    (timestamp.unix_timestamp_nanos() / 1_000_000) as i64
}
