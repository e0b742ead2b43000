//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、
//! 以及对外部适配器（密码哈希、编辑广播、存储）的抽象。

pub mod broadcaster;
pub mod clock;
pub mod doc_id;
pub mod dto;
pub mod error;
pub mod password;
pub mod repository;
pub mod services;

pub use broadcaster::{BroadcastError, EditBroadcast, EditBroadcaster};
pub use clock::{Clock, SystemClock};
pub use doc_id::{DocIdGenerator, RandomDocIdGenerator};
pub use dto::{DocumentCreatedDto, DocumentDto, EditMessageDto, UserDto};
pub use error::ApplicationError;
pub use password::{PasswordHasher, PasswordHasherError};
pub use repository::{DocumentRepository, UserRepository};
pub use services::{
    AuthenticateUserRequest, CollaborationRelay, CollaborationRelayDependencies,
    CreateDocumentRequest, DocumentService, DocumentServiceDependencies, EditRequest,
    RegisterUserRequest, UpdateDocumentRequest, UserService, UserServiceDependencies,
};
