//! PostgreSQL 仓储实现。
//!
//! 行记录与领域实体分离，经 `TryFrom` 转换；唯一键冲突统一映射为
//! `RepositoryError::Conflict`，由上层决定语义。

use application::{DocumentRepository, UserRepository};
use async_trait::async_trait;
use domain::{DocId, Document, RepositoryError, User, UserEmail, UserId};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

pub async fn create_pg_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Conflict,
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        _ => RepositoryError::storage(err.to_string()),
    }
}

fn invalid_data(message: impl Into<String>) -> RepositoryError {
    RepositoryError::storage(message)
}

#[derive(Debug, FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRecord> for User {
    type Error = RepositoryError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        let username =
            domain::Username::parse(value.username).map_err(|err| invalid_data(err.to_string()))?;
        let email =
            domain::UserEmail::parse(value.email).map_err(|err| invalid_data(err.to_string()))?;
        let password = domain::PasswordHash::new(value.password_hash)
            .map_err(|err| invalid_data(err.to_string()))?;

        Ok(User {
            id: UserId::from(value.id),
            username,
            email,
            password,
            created_at: value.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct DocumentRecord {
    doc_id: String,
    title: String,
    owner_id: String,
    content: String,
    collaborators: Vec<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = RepositoryError;

    fn try_from(value: DocumentRecord) -> Result<Self, Self::Error> {
        let doc_id =
            DocId::parse(value.doc_id).map_err(|err| invalid_data(err.to_string()))?;

        Ok(Document {
            doc_id,
            title: value.title,
            owner_id: value.owner_id,
            content: value.content,
            collaborators: value.collaborators,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::from(user.id))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        User::try_from(record)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        record.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: UserEmail) -> Result<Option<User>, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1"#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        record.map(User::try_from).transpose()
    }
}

#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, document: Document) -> Result<Document, RepositoryError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            INSERT INTO documents (doc_id, title, owner_id, content, collaborators, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING doc_id, title, owner_id, content, collaborators, created_at, updated_at
            "#,
        )
        .bind(document.doc_id.as_str())
        .bind(&document.title)
        .bind(&document.owner_id)
        .bind(&document.content)
        .bind(&document.collaborators)
        .bind(document.created_at)
        .bind(document.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Document::try_from(record)
    }

    async fn update(&self, document: Document) -> Result<Document, RepositoryError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"
            UPDATE documents
            SET title = $2, content = $3, collaborators = $4, updated_at = $5
            WHERE doc_id = $1
            RETURNING doc_id, title, owner_id, content, collaborators, created_at, updated_at
            "#,
        )
        .bind(document.doc_id.as_str())
        .bind(&document.title)
        .bind(&document.content)
        .bind(&document.collaborators)
        .bind(document.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Document::try_from(record)
    }

    async fn find_by_doc_id(&self, doc_id: DocId) -> Result<Option<Document>, RepositoryError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"SELECT doc_id, title, owner_id, content, collaborators, created_at, updated_at FROM documents WHERE doc_id = $1"#,
        )
        .bind(doc_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        record.map(Document::try_from).transpose()
    }
}
