//! 基础设施层实现。
//!
//! 提供数据库仓储、密码哈希、编辑广播等适配器，实现应用层定义的接口。

pub mod broadcast;
pub mod builder;
pub mod migrations;
pub mod password;
pub mod redis_bridge;
pub mod repository;

pub use broadcast::{EditStream, LocalEditBroadcaster};
pub use builder::{Infrastructure, InfrastructureConfig, InfrastructureError};
pub use migrations::MIGRATOR;
pub use password::BcryptPasswordHasher;
pub use redis_bridge::{RedisBridgeError, RedisEditBroadcaster};
pub use repository::{create_pg_pool, PgDocumentRepository, PgUserRepository};
