pub mod completion_record;
pub mod generation_request;
pub mod quiz_question;
pub mod subject;
pub use completion_record::{CompletionRecord, CompletionStats};
pub use generation_request::{Difficulty, GenerationRequest};
pub use quiz_question::{QuizQuestion, QuizSet};
pub use subject::Subject;
