pub mod quiz_handler;

pub use quiz_handler::{
    completion_stats, generate_quiz, generate_subject_quiz, health_check, record_completion,
};
