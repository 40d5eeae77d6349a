#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::domain::{QuizQuestion, QuizSet, Subject};

    /// Creates a standard test monument
    pub fn test_subject() -> Subject {
        Subject {
            id: "monument-1".to_string(),
            title: "Hampi".to_string(),
            description: "Ruins of the Vijayanagara capital".to_string(),
            era: "14th century".to_string(),
            location: "Karnataka".to_string(),
        }
    }

    /// Creates a valid question whose correct option is `correct`
    pub fn test_question(prompt: &str, correct: usize) -> QuizQuestion {
        QuizQuestion::new(
            prompt,
            ["Option A", "Option B", "Option C", "Option D"].map(String::from),
            correct,
            format!("Option {} is correct", correct),
        )
        .expect("fixture question should be valid")
    }

    /// Creates a quiz set with one question per entry in `correct_answers`
    pub fn test_quiz_set(correct_answers: &[usize]) -> QuizSet {
        QuizSet::new(
            correct_answers
                .iter()
                .enumerate()
                .map(|(i, correct)| test_question(&format!("Question {}", i + 1), *correct))
                .collect(),
        )
    }

    /// One generator item in the wire shape
    pub fn raw_question_json(prompt: &str, correct: usize) -> Value {
        json!({
            "question": prompt,
            "options": ["A", "B", "C", "D"],
            "correctAnswer": correct,
            "explanation": format!("{} explained", prompt)
        })
    }

    /// A bare JSON array of generator items
    pub fn raw_questions_array(items: &[(&str, usize)]) -> String {
        Value::Array(
            items
                .iter()
                .map(|(prompt, correct)| raw_question_json(prompt, *correct))
                .collect(),
        )
        .to_string()
    }
}

#[cfg(test)]
pub mod stubs {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::{CompletionRecord, Subject},
        repositories::{CompletionRepository, SubjectRepository},
    };

    pub struct StubSubjectRepository {
        subject: Option<Subject>,
        fail: bool,
    }

    impl StubSubjectRepository {
        pub fn with(subject: Subject) -> Self {
            Self {
                subject: Some(subject),
                fail: false,
            }
        }

        pub fn empty() -> Self {
            Self {
                subject: None,
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                subject: None,
                fail: true,
            }
        }
    }

    #[async_trait]
    impl SubjectRepository for StubSubjectRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<Subject>> {
            if self.fail {
                return Err(AppError::DatabaseError("connection refused".to_string()));
            }
            Ok(self.subject.clone().filter(|s| s.id == id))
        }
    }

    #[derive(Default)]
    pub struct StubCompletionRepository {
        records: Arc<RwLock<Vec<CompletionRecord>>>,
        fail: bool,
    }

    impl StubCompletionRepository {
        pub fn failing() -> Self {
            Self {
                records: Arc::default(),
                fail: true,
            }
        }

        pub async fn records(&self) -> Vec<CompletionRecord> {
            self.records.read().await.clone()
        }
    }

    #[async_trait]
    impl CompletionRepository for StubCompletionRepository {
        async fn create(&self, record: CompletionRecord) -> AppResult<CompletionRecord> {
            if self.fail {
                return Err(AppError::DatabaseError("write rejected".to_string()));
            }
            self.records.write().await.push(record.clone());
            Ok(record)
        }

        async fn list_all(&self) -> AppResult<Vec<CompletionRecord>> {
            Ok(self.records.read().await.clone())
        }

        async fn list_by_subject(&self, subject_id: &str) -> AppResult<Vec<CompletionRecord>> {
            Ok(self
                .records
                .read()
                .await
                .iter()
                .filter(|r| r.subject_id == subject_id)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_subject() {
        let subject = test_subject();
        assert_eq!(subject.id, "monument-1");
        assert_eq!(subject.title, "Hampi");
    }

    #[test]
    fn test_fixtures_quiz_set() {
        let set = test_quiz_set(&[3, 0]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).map(|q| q.correct_index()), Some(3));
        assert_eq!(set.get(1).map(|q| q.prompt()), Some("Question 2"));
    }

    #[test]
    fn test_fixtures_raw_array_is_json_array() {
        let raw = raw_questions_array(&[("Q", 1)]);
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value[0]["correctAnswer"], 1);
    }
}
