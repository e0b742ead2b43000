//! 单元测试公用的内存假件。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use domain::{
    DocId, Document, PasswordHash, RepositoryError, Timestamp, User, UserEmail, UserId,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    broadcaster::{BroadcastError, EditBroadcast, EditBroadcaster},
    clock::Clock,
    password::{PasswordHasher, PasswordHasherError},
    repository::{DocumentRepository, UserRepository},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    data: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.data.write().await;
        // 与真实存储一致：邮箱唯一键冲突
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

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, document: Document) {
        self.data
            .write()
            .await
            .insert(document.doc_id.to_string(), document);
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
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

/// 明文"哈希"，只用于测试。
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

/// 每次读取前进一毫秒的测试时钟，保证时间戳严格可比。
pub struct SteppingClock {
    current: StdMutex<Timestamp>,
}

impl SteppingClock {
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            current: StdMutex::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Timestamp {
        let mut guard = self.current.lock().expect("clock poisoned");
        *guard += time::Duration::milliseconds(1);
        *guard
    }
}

/// 记录所有发布内容的广播假件。
#[derive(Default)]
pub struct CapturingBroadcaster {
    published: StdMutex<Vec<EditBroadcast>>,
}

impl CapturingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<EditBroadcast> {
        self.published.lock().expect("broadcast log poisoned").clone()
    }
}

#[async_trait]
impl EditBroadcaster for CapturingBroadcaster {
    async fn publish(&self, payload: EditBroadcast) -> Result<(), BroadcastError> {
        self.published
            .lock()
            .expect("broadcast log poisoned")
            .push(payload);
        Ok(())
    }
}

/// 永远失败的广播假件。
pub struct FailingBroadcaster;

#[async_trait]
impl EditBroadcaster for FailingBroadcaster {
    async fn publish(&self, _payload: EditBroadcast) -> Result<(), BroadcastError> {
        Err(BroadcastError::failed("substrate down"))
    }
}
