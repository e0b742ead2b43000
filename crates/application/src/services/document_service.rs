use std::sync::Arc;

use domain::{DocId, Document, DomainError, RepositoryError};

use crate::{
    clock::Clock, doc_id::DocIdGenerator, error::ApplicationError,
    repository::DocumentRepository,
};

/// 标识冲突时的重新生成上限。36^6 的空间下几乎用不到第二次。
const MAX_CREATE_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub title: Option<String>,
    pub owner_id: String,
}

#[derive(Debug, Clone)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct DocumentServiceDependencies {
    pub document_repository: Arc<dyn DocumentRepository>,
    pub doc_id_generator: Arc<dyn DocIdGenerator>,
    pub clock: Arc<dyn Clock>,
}

pub struct DocumentService {
    deps: DocumentServiceDependencies,
}

impl DocumentService {
    pub fn new(deps: DocumentServiceDependencies) -> Self {
        Self { deps }
    }

    /// 创建文档：生成标识、空内容、协作者以所有者起始。
    ///
    /// 不校验 owner_id 是否对应已注册用户，按原样接受。
    pub async fn create(
        &self,
        request: CreateDocumentRequest,
    ) -> Result<Document, ApplicationError> {
        let mut attempts = 0;
        loop {
            let doc_id = self.deps.doc_id_generator.generate();
            let now = self.deps.clock.now();
            let document =
                Document::create(doc_id, request.title.clone(), request.owner_id.clone(), now);

            match self.deps.document_repository.create(document).await {
                Ok(stored) => return Ok(stored),
                // 标识撞车：换一个再试
                Err(RepositoryError::Conflict) if attempts + 1 < MAX_CREATE_ATTEMPTS => {
                    attempts += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn get(&self, doc_id: DocId) -> Result<Document, ApplicationError> {
        self.deps
            .document_repository
            .find_by_doc_id(doc_id)
            .await?
            .ok_or(DomainError::DocumentNotFound.into())
    }

    /// 部分更新：只覆盖给出的字段，updated_at 总是刷新。
    ///
    /// 没有乐观并发控制，并发更新按到达顺序落库，后写覆盖先写。
    pub async fn update(
        &self,
        doc_id: DocId,
        request: UpdateDocumentRequest,
    ) -> Result<Document, ApplicationError> {
        let mut document = self
            .deps
            .document_repository
            .find_by_doc_id(doc_id)
            .await?
            .ok_or(DomainError::DocumentNotFound)?;

        document.apply_update(request.title, request.content, self.deps.clock.now());

        let stored = self.deps.document_repository.update(document).await?;
        Ok(stored)
    }
}
