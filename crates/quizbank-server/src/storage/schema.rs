//! Table definitions, applied once at startup

/// Ordered DDL statements making up a schema
#[derive(Debug, Clone)]
pub struct Schema {
    statements: Vec<&'static str>,
}

impl Schema {
    pub fn new(statements: Vec<&'static str>) -> Self {
        Self { statements }
    }

    /// Questions and the choices they own. Deleting a question cascades.
    pub fn quiz() -> Self {
        Self::new(vec![
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_text TEXT NOT NULL
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS ix_questions_question_text
                ON questions (question_text)
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS choices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                choice_text TEXT NOT NULL,
                is_correct BOOLEAN NOT NULL DEFAULT 0,
                question_id INTEGER NOT NULL
                    REFERENCES questions (id) ON DELETE CASCADE
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS ix_choices_choice_text
                ON choices (choice_text)
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS ix_choices_question_id
                ON choices (question_id)
            "#,
        ])
    }

    pub fn statements(&self) -> &[&'static str] {
        &self.statements
    }
}
