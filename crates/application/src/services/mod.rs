mod document_service;
mod relay;
mod user_service;

pub use document_service::{
    CreateDocumentRequest, DocumentService, DocumentServiceDependencies, UpdateDocumentRequest,
};
pub use relay::{CollaborationRelay, CollaborationRelayDependencies, EditRequest};
pub use user_service::{
    AuthenticateUserRequest, RegisterUserRequest, UserService, UserServiceDependencies,
};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod relay_tests;
