//! 主应用程序入口
//!
//! 启动 Axum Web API 服务。

use std::sync::Arc;

use anyhow::Context;
use application::{
    Clock, CollaborationRelay, CollaborationRelayDependencies, DocumentService,
    DocumentServiceDependencies, PasswordHasher, RandomDocIdGenerator, SystemClock, UserRepository,
    UserService, UserServiceDependencies,
};
use axum::http::HeaderValue;
use infrastructure::{Infrastructure, InfrastructureConfig};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = config::AppConfig::from_env_with_defaults();
    config.validate()?;

    tracing::info!(
        "连接数据库: {}",
        config.database.url.split('@').last().unwrap_or("unknown")
    );

    let infra = Infrastructure::connect(InfrastructureConfig {
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        bcrypt_cost: config.server.bcrypt_cost,
        broadcast_capacity: config.broadcast.capacity,
        redis_url: config.broadcast.redis_url.clone(),
    })
    .await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher: Arc<dyn PasswordHasher> = infra.password_hasher.clone();
    let user_repository: Arc<dyn UserRepository> = infra.user_repository.clone();

    let user_service = UserService::new(UserServiceDependencies {
        user_repository,
        password_hasher,
        clock: clock.clone(),
    });

    let document_service = DocumentService::new(DocumentServiceDependencies {
        document_repository: infra.document_repository.clone(),
        doc_id_generator: Arc::new(RandomDocIdGenerator),
        clock: clock.clone(),
    });

    let relay = CollaborationRelay::new(CollaborationRelayDependencies {
        clock,
        broadcaster: infra.broadcaster.clone(),
    });

    let allowed_origin = config
        .server
        .allowed_origin
        .as_deref()
        .map(|origin| origin.parse::<HeaderValue>())
        .transpose()
        .context("invalid ALLOWED_ORIGIN")?;

    let state = AppState::new(
        Arc::new(user_service),
        Arc::new(document_service),
        Arc::new(relay),
        infra.local_broadcaster.clone(),
        allowed_origin,
    );

    let app = router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("协同文档服务器启动在 http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
