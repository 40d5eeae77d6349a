use crate::models::domain::Difficulty;

const QUESTION_COUNT_SLOT: &str = "{question_count}";
const DIFFICULTY_SLOT: &str = "{difficulty}";

/// System instruction sent with every generation request. The whitespace is part of
/// the wire contract with the gateway and must not be reformatted.
pub const QUIZ_SYSTEM_PROMPT_TEMPLATE: &str = concat!(
    "You are a quiz generator for cultural heritage education. Generate {question_count} multiple choice questions about the monument described below. \n",
    "    \n",
    "    Difficulty: {difficulty}\n",
    "    \n",
    "    Format your response as a JSON array of questions. Each question should have:\n",
    "    - question: the question text\n",
    "    - options: array of 4 options\n",
    "    - correctAnswer: index of correct option (0-3)\n",
    "    - explanation: brief explanation of the answer\n",
    "    \n",
    "    Example format:\n",
    "    [\n",
    "      {\n",
    "        \"question\": \"When was this monument built?\",\n",
    "        \"options\": [\"12th century\", \"15th century\", \"18th century\", \"20th century\"],\n",
    "        \"correctAnswer\": 1,\n",
    "        \"explanation\": \"The monument was built in the 15th century during...\"\n",
    "      }\n",
    "    ]",
);

pub fn quiz_system_prompt(question_count: u16, difficulty: Difficulty) -> String {
    QUIZ_SYSTEM_PROMPT_TEMPLATE
        .replace(QUESTION_COUNT_SLOT, &question_count.to_string())
        .replace(DIFFICULTY_SLOT, &difficulty.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_fills_count_and_difficulty() {
        let prompt = quiz_system_prompt(7, Difficulty::Hard);

        assert!(prompt.starts_with(
            "You are a quiz generator for cultural heritage education. Generate 7 multiple choice questions"
        ));
        assert!(prompt.contains("\n    Difficulty: hard\n"));
        assert!(!prompt.contains(QUESTION_COUNT_SLOT));
        assert!(!prompt.contains(DIFFICULTY_SLOT));
    }

    #[test]
    fn system_prompt_keeps_output_contract_fields() {
        let prompt = quiz_system_prompt(5, Difficulty::Medium);

        for field in ["question", "options", "correctAnswer", "explanation"] {
            assert!(prompt.contains(field), "prompt should mention {}", field);
        }
        assert!(prompt.ends_with("\n    ]"));
        assert!(prompt.contains("described below. \n    \n"));
    }
}
