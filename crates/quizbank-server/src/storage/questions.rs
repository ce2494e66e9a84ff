//! Question persistence

use super::DbSession;
use anyhow::Result;
use quizbank_types::{Choice, Question, ValidQuestion};

const LIST_QUESTIONS_WITH_CHOICES: &str = r#"
    SELECT q.id AS id, q.question_text AS question_text,
           c.id AS choice_id, c.choice_text AS choice_text, c.is_correct AS is_correct
    FROM questions q
    LEFT JOIN choices c ON c.question_id = q.id
    ORDER BY q.id, c.id
"#;

const FIND_QUESTION_WITH_CHOICES: &str = r#"
    SELECT q.id AS id, q.question_text AS question_text,
           c.id AS choice_id, c.choice_text AS choice_text, c.is_correct AS is_correct
    FROM questions q
    LEFT JOIN choices c ON c.question_id = q.id
    WHERE q.id = ?1
    ORDER BY c.id
"#;

impl DbSession {
    /// All questions with their choices, in one query.
    pub async fn list_questions(&mut self) -> Result<Vec<Question>> {
        let rows: Vec<QuestionChoiceRow> = sqlx::query_as(LIST_QUESTIONS_WITH_CHOICES)
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(group_rows(rows))
    }

    pub async fn find_question(&mut self, id: i64) -> Result<Option<Question>> {
        let rows: Vec<QuestionChoiceRow> = sqlx::query_as(FIND_QUESTION_WITH_CHOICES)
            .bind(id)
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(group_rows(rows).pop())
    }

    pub async fn insert_question(&mut self, payload: &ValidQuestion) -> Result<Question> {
        let question_id = sqlx::query(
            r#"
            INSERT INTO questions (question_text) VALUES (?1)
            "#,
        )
        .bind(payload.question_text())
        .execute(&mut *self.tx)
        .await?
        .last_insert_rowid();

        let mut choices = Vec::with_capacity(payload.choices().len());
        for choice in payload.choices() {
            let choice_id = sqlx::query(
                r#"
                INSERT INTO choices (choice_text, is_correct, question_id)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(&choice.choice_text)
            .bind(choice.is_correct)
            .bind(question_id)
            .execute(&mut *self.tx)
            .await?
            .last_insert_rowid();

            choices.push(Choice {
                id: choice_id,
                choice_text: choice.choice_text.clone(),
                is_correct: choice.is_correct,
                question_id,
            });
        }

        Ok(Question {
            id: question_id,
            question_text: payload.question_text().to_string(),
            choices,
        })
    }

    /// Overwrite a question's text and its existing choices in place.
    ///
    /// Existing choices are paired with incoming ones by position; extra
    /// entries on either side are ignored, so choice ids never change.
    /// Returns `None` when no question has this id.
    pub async fn update_question(
        &mut self,
        id: i64,
        payload: &ValidQuestion,
    ) -> Result<Option<Question>> {
        // Write first. A deferred transaction that reads before writing can't
        // upgrade to a writer once another connection has committed.
        let updated = sqlx::query(
            r#"
            UPDATE questions SET question_text = ?1 WHERE id = ?2
            "#,
        )
        .bind(payload.question_text())
        .bind(id)
        .execute(&mut *self.tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        let existing: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT id FROM choices WHERE question_id = ?1 ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&mut *self.tx)
        .await?;

        for ((choice_id,), incoming) in existing.iter().zip(payload.choices()) {
            sqlx::query(
                r#"
                UPDATE choices SET choice_text = ?1, is_correct = ?2 WHERE id = ?3
                "#,
            )
            .bind(&incoming.choice_text)
            .bind(incoming.is_correct)
            .bind(*choice_id)
            .execute(&mut *self.tx)
            .await?;
        }

        self.find_question(id).await
    }

    /// Delete a question; its choices go with it. Returns false if absent.
    pub async fn delete_question(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM questions WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_choices_for(&mut self, question_id: i64) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM choices WHERE question_id = ?1
            "#,
        )
        .bind(question_id)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(count)
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct QuestionChoiceRow {
    id: i64,
    question_text: String,
    choice_id: Option<i64>,
    choice_text: Option<String>,
    is_correct: Option<bool>,
}

/// Fold joined rows (ordered by question id) into questions.
fn group_rows(rows: Vec<QuestionChoiceRow>) -> Vec<Question> {
    let mut questions: Vec<Question> = Vec::new();

    for row in rows {
        let starts_new = questions.last().map_or(true, |q| q.id != row.id);
        if starts_new {
            questions.push(Question {
                id: row.id,
                question_text: row.question_text,
                choices: Vec::new(),
            });
        }

        if let (Some(choice_id), Some(choice_text), Some(question)) =
            (row.choice_id, row.choice_text, questions.last_mut())
        {
            question.choices.push(Choice {
                id: choice_id,
                choice_text,
                is_correct: row.is_correct.unwrap_or(false),
                question_id: row.id,
            });
        }
    }

    questions
}
