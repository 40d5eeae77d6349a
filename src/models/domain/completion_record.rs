use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a finished quiz session, written once to the persistence collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompletionRecord {
    pub id: String,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub score: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletionRecord {
    pub fn new(subject_id: &str, user_id: Option<&str>, score: u32, total_questions: u32) -> Self {
        CompletionRecord {
            id: Uuid::new_v4().to_string(),
            subject_id: subject_id.to_string(),
            user_id: user_id.map(str::to_string),
            score,
            total_questions,
            completed_at: Utc::now(),
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }
}

/// Aggregate over stored completions, as shown on the analytics dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total_completions: usize,
    pub average_score_percent: u32,
}

impl CompletionStats {
    pub fn from_records(records: &[CompletionRecord]) -> Self {
        if records.is_empty() {
            return CompletionStats {
                total_completions: 0,
                average_score_percent: 0,
            };
        }

        let sum: f64 = records.iter().map(CompletionRecord::percentage).sum();
        let average = sum / records.len() as f64;

        CompletionStats {
            total_completions: records.len(),
            average_score_percent: average.round() as u32,
        }
    }
}
