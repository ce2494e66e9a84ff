//! Write payload validation
//!
//! Every payload that reaches storage goes through [`QuestionBase::validate`],
//! which either hands back a [`ValidQuestion`] or the ordered list of
//! violations found.

use crate::question::{ChoiceBase, QuestionBase};
use thiserror::Error;

pub const QUESTION_TEXT_MIN_CHARS: usize = 5;
pub const QUESTION_TEXT_MAX_CHARS: usize = 500;
pub const CHOICE_TEXT_MIN_CHARS: usize = 1;
pub const CHOICE_TEXT_MAX_CHARS: usize = 255;
pub const CHOICES_PER_QUESTION: usize = 2;

pub const NO_CORRECT_CHOICE_MESSAGE: &str = "At least one choice must be marked as correct";

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Payload rejected by validation. Displays as the first violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", self.first_message())]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn first_message(&self) -> &str {
        self.violations
            .first()
            .map(|v| v.message.as_str())
            .unwrap_or("Invalid input")
    }
}

/// A payload that passed validation.
///
/// Only constructible through [`QuestionBase::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestion(QuestionBase);

impl ValidQuestion {
    pub fn question_text(&self) -> &str {
        &self.0.question_text
    }

    pub fn choices(&self) -> &[ChoiceBase] {
        &self.0.choices
    }
}

impl QuestionBase {
    pub fn validate(self) -> Result<ValidQuestion, ValidationError> {
        let mut violations = Vec::new();

        check_length(
            &mut violations,
            "questionText",
            &self.question_text,
            QUESTION_TEXT_MIN_CHARS,
            QUESTION_TEXT_MAX_CHARS,
        );

        // The correctness rule only applies to a well-formed choice list.
        let before_choices = violations.len();
        if self.choices.len() != CHOICES_PER_QUESTION {
            violations.push(Violation::new(
                "choices",
                format!(
                    "choices should have exactly {} items, not {}",
                    CHOICES_PER_QUESTION,
                    self.choices.len()
                ),
            ));
        }
        for (i, choice) in self.choices.iter().enumerate() {
            check_length(
                &mut violations,
                &format!("choices[{}].choiceText", i),
                &choice.choice_text,
                CHOICE_TEXT_MIN_CHARS,
                CHOICE_TEXT_MAX_CHARS,
            );
        }
        if violations.len() == before_choices && !self.choices.iter().any(|c| c.is_correct) {
            violations.push(Violation::new("choices", NO_CORRECT_CHOICE_MESSAGE));
        }

        if violations.is_empty() {
            Ok(ValidQuestion(self))
        } else {
            Err(ValidationError { violations })
        }
    }
}

fn check_length(violations: &mut Vec<Violation>, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        violations.push(Violation::new(
            field,
            format!(
                "{} should have at least {} character{}",
                field,
                min,
                if min == 1 { "" } else { "s" }
            ),
        ));
    } else if len > max {
        violations.push(Violation::new(
            field,
            format!("{} should have at most {} characters", field, max),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &str, choices: &[(&str, bool)]) -> QuestionBase {
        QuestionBase {
            question_text: text.to_string(),
            choices: choices
                .iter()
                .map(|(t, c)| ChoiceBase {
                    choice_text: t.to_string(),
                    is_correct: *c,
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        let valid = payload("What is 2+2?", &[("3", false), ("4", true)])
            .validate()
            .unwrap();
        assert_eq!(valid.question_text(), "What is 2+2?");
        assert_eq!(valid.choices().len(), 2);
        assert!(valid.choices()[1].is_correct);
    }

    #[test]
    fn test_question_text_boundaries() {
        let ok = [("a", true), ("b", false)];
        assert!(payload(&"x".repeat(5), &ok).validate().is_ok());
        assert!(payload(&"x".repeat(500), &ok).validate().is_ok());

        let short = payload(&"x".repeat(4), &ok).validate().unwrap_err();
        assert_eq!(
            short.first_message(),
            "questionText should have at least 5 characters"
        );

        let long = payload(&"x".repeat(501), &ok).validate().unwrap_err();
        assert_eq!(
            long.first_message(),
            "questionText should have at most 500 characters"
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Five characters, fifteen bytes.
        let text = "日本語です";
        assert!(payload(text, &[("a", true), ("b", false)]).validate().is_ok());
    }

    #[test]
    fn test_no_correct_choice_rejected() {
        let err = payload("Which one?", &[("a", false), ("b", false)])
            .validate()
            .unwrap_err();
        assert_eq!(err.first_message(), NO_CORRECT_CHOICE_MESSAGE);
        assert_eq!(err.to_string(), NO_CORRECT_CHOICE_MESSAGE);
    }

    #[test]
    fn test_choice_count_enforced() {
        let one = payload("Which one?", &[("a", true)]).validate().unwrap_err();
        assert_eq!(one.first_message(), "choices should have exactly 2 items, not 1");

        let three = payload("Which one?", &[("a", true), ("b", false), ("c", false)])
            .validate()
            .unwrap_err();
        assert_eq!(
            three.first_message(),
            "choices should have exactly 2 items, not 3"
        );
    }

    #[test]
    fn test_choice_text_bounds() {
        let empty = payload("Which one?", &[("", true), ("b", false)])
            .validate()
            .unwrap_err();
        assert_eq!(empty.violations()[0].field, "choices[0].choiceText");
        assert_eq!(
            empty.first_message(),
            "choices[0].choiceText should have at least 1 character"
        );

        let max_text = "c".repeat(255);
        assert!(payload("Which one?", &[("a", true), (max_text.as_str(), false)])
            .validate()
            .is_ok());

        let long_text = "c".repeat(256);
        let long = payload("Which one?", &[("a", true), (long_text.as_str(), false)])
            .validate()
            .unwrap_err();
        assert_eq!(
            long.first_message(),
            "choices[1].choiceText should have at most 255 characters"
        );
    }

    #[test]
    fn test_only_first_violation_is_surfaced() {
        let err = payload("Hi", &[("", false), ("b", false)])
            .validate()
            .unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert_eq!(
            err.first_message(),
            "questionText should have at least 5 characters"
        );
        // Correctness is not judged while the choice list is malformed.
        assert!(err
            .violations()
            .iter()
            .all(|v| v.message != NO_CORRECT_CHOICE_MESSAGE));
    }
}
