use async_trait::async_trait;
use domain::{DocId, Document, RepositoryError, User, UserEmail, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: UserEmail) -> Result<Option<User>, RepositoryError>;
}

/// 文档存储被视为按标识寻址的黑盒：保存与查找，别无其他。
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: Document) -> Result<Document, RepositoryError>;
    async fn update(&self, document: Document) -> Result<Document, RepositoryError>;
    async fn find_by_doc_id(&self, doc_id: DocId) -> Result<Option<Document>, RepositoryError>;
}
