//! 协同文档系统核心领域模型
//!
//! 包含用户、文档、编辑消息等核心实体，以及标识符等值对象。

pub mod document;
pub mod edit;
pub mod errors;
pub mod user;
pub mod value_objects;

pub use document::Document;
pub use edit::{broadcast_channel, edit_channel, EditMessage};
pub use errors::{DomainError, RepositoryError};
pub use user::User;
pub use value_objects::{
    DocId, PasswordHash, Timestamp, UserEmail, UserId, Username, DOC_ID_ALPHABET, DOC_ID_LEN,
};
