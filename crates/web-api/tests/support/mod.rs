//! 集成测试支撑：内存仓储 + 明文哈希，拼出完整路由。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::Router;
use tokio::sync::RwLock;
use uuid::Uuid;

use application::{
    CollaborationRelay, CollaborationRelayDependencies, DocumentService,
    DocumentServiceDependencies, PasswordHasher, PasswordHasherError, RandomDocIdGenerator,
    SystemClock, UserService, UserServiceDependencies,
};
use domain::{
    DocId, Document, PasswordHash, RepositoryError, User, UserEmail, UserId,
};
use infrastructure::LocalEditBroadcaster;
use web_api::{router, AppState};

#[derive(Default)]
pub struct InMemoryUserRepository {
    data: Arc<RwLock<HashMap<Uuid, User>>>,
}

#[async_trait]
impl application::UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.data.write().await;
        // 邮箱唯一键约束
        if guard
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(RepositoryError::Conflict);
        }
        let stored = user.clone();
        guard.insert(Uuid::from(user.id), user);
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.data.read().await;
        Ok(guard.get(&Uuid::from(id)).cloned())
    }

    async fn find_by_email(&self, email: UserEmail) -> Result<Option<User>, RepositoryError> {
        let guard = self.data.read().await;
        Ok(guard
            .values()
            .find(|u| u.email.as_str() == email.as_str())
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    data: Arc<RwLock<HashMap<String, Document>>>,
}

#[async_trait]
impl application::DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: Document) -> Result<Document, RepositoryError> {
        let mut guard = self.data.write().await;
        if guard.contains_key(document.doc_id.as_str()) {
            return Err(RepositoryError::Conflict);
        }
        let stored = document.clone();
        guard.insert(document.doc_id.to_string(), document);
        Ok(stored)
    }

    async fn update(&self, document: Document) -> Result<Document, RepositoryError> {
        let mut guard = self.data.write().await;
        if !guard.contains_key(document.doc_id.as_str()) {
            return Err(RepositoryError::NotFound);
        }
        let stored = document.clone();
        guard.insert(document.doc_id.to_string(), document);
        Ok(stored)
    }

    async fn find_by_doc_id(&self, doc_id: DocId) -> Result<Option<Document>, RepositoryError> {
        let guard = self.data.read().await;
        Ok(guard.get(doc_id.as_str()).cloned())
    }
}

pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(plaintext.to_owned())
            .map_err(|err| PasswordHasherError::hash_error(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &str,
        hashed: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(hashed.as_str() == plaintext)
    }
}

pub fn test_router() -> Router {
    let user_repo = Arc::new(InMemoryUserRepository::default());
    let document_repo = Arc::new(InMemoryDocumentRepository::default());
    let clock = Arc::new(SystemClock);
    let password_hasher = Arc::new(PlainPasswordHasher);
    let broadcaster = Arc::new(LocalEditBroadcaster::new(64));

    let user_service = Arc::new(UserService::new(UserServiceDependencies {
        user_repository: user_repo,
        password_hasher,
        clock: clock.clone(),
    }));

    let document_service = Arc::new(DocumentService::new(DocumentServiceDependencies {
        document_repository: document_repo,
        doc_id_generator: Arc::new(RandomDocIdGenerator),
        clock: clock.clone(),
    }));

    let relay = Arc::new(CollaborationRelay::new(CollaborationRelayDependencies {
        clock,
        broadcaster: broadcaster.clone(),
    }));

    let state = AppState::new(user_service, document_service, relay, broadcaster, None);
    router(state)
}
