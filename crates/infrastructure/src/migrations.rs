//! 编译期内嵌的数据库迁移。

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
