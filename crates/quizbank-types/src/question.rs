//! Question and choice types

use serde::{Deserialize, Serialize};

/// A quiz question together with the choices it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub choices: Vec<Choice>,
}

/// One answer option belonging to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub id: i64,
    pub choice_text: String,
    pub is_correct: bool,
    pub question_id: i64,
}

/// Write payload for creating or replacing a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBase {
    pub question_text: String,
    pub choices: Vec<ChoiceBase>,
}

/// Write payload for a single choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceBase {
    pub choice_text: String,
    pub is_correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serializes_camel_case() {
        let question = Question {
            id: 1,
            question_text: "What is 2+2?".to_string(),
            choices: vec![Choice {
                id: 7,
                choice_text: "4".to_string(),
                is_correct: true,
                question_id: 1,
            }],
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["questionText"], "What is 2+2?");
        assert_eq!(value["choices"][0]["choiceText"], "4");
        assert_eq!(value["choices"][0]["isCorrect"], true);
        assert_eq!(value["choices"][0]["questionId"], 1);
    }

    #[test]
    fn test_payload_requires_is_correct() {
        let raw = r#"{"questionText":"Pick one","choices":[{"choiceText":"a"}]}"#;
        let parsed: Result<QuestionBase, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }
}
