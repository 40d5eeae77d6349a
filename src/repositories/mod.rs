pub mod completion_repository;
pub mod subject_repository;

pub use completion_repository::{CompletionRepository, MongoCompletionRepository};
pub use subject_repository::{MongoSubjectRepository, SubjectRepository};
