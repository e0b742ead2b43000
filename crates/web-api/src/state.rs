use std::sync::Arc;

use application::{CollaborationRelay, DocumentService, UserService};
use axum::http::HeaderValue;
use infrastructure::LocalEditBroadcaster;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub document_service: Arc<DocumentService>,
    pub relay: Arc<CollaborationRelay>,
    /// WebSocket 会话从这里订阅各自文档的广播流。
    pub broadcaster: Arc<LocalEditBroadcaster>,
    pub allowed_origin: Option<HeaderValue>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        document_service: Arc<DocumentService>,
        relay: Arc<CollaborationRelay>,
        broadcaster: Arc<LocalEditBroadcaster>,
        allowed_origin: Option<HeaderValue>,
    ) -> Self {
        Self {
            user_service,
            document_service,
            relay,
            broadcaster,
            allowed_origin,
        }
    }
}
