//! Database access layer

pub mod document_repo;
pub mod quiz_repo;
pub mod user_repo;

pub use document_repo::DocumentRepository;
pub use quiz_repo::QuizRepository;
pub use user_repo::UserRepository;
