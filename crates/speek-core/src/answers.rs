//! Answer sheets: a user's submitted answers, read from TOML and applied to
//! an assessment question by question.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::assessment::Assessment;

/// Answers for one sitting of an assessment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub answers: Vec<SheetAnswer>,
}

/// One answer on a sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetAnswer {
    /// 1-based question number.
    pub question: usize,
    /// Free-text answer.
    #[serde(default)]
    pub answer: Option<String>,
    /// Term/match pairs for matching questions.
    #[serde(default)]
    pub matches: BTreeMap<String, String>,
}

impl AnswerSheet {
    /// Submit every answer on the sheet to the matching question.
    ///
    /// Returns the number of answers applied. Stops at the first answer that
    /// points past the end of the assessment or that the question rejects.
    pub fn apply(&self, assessment: &mut Assessment) -> Result<usize> {
        let total = assessment.questions().len();
        let questions = assessment.questions_mut();

        for entry in &self.answers {
            anyhow::ensure!(
                (1..=total).contains(&entry.question),
                "answer for question {} but the assessment has {total} question(s)",
                entry.question
            );
            let question = &mut questions[entry.question - 1];

            if let Some(text) = &entry.answer {
                question
                    .submit_answer(text)
                    .with_context(|| format!("question {}", entry.question))?;
            }
            for (term, matched) in &entry.matches {
                question
                    .submit_match(term, matched)
                    .with_context(|| format!("question {}", entry.question))?;
            }
            if entry.answer.is_none() && entry.matches.is_empty() {
                tracing::warn!("answer for question {} is empty, skipping", entry.question);
            }
        }

        Ok(self.answers.len())
    }
}

/// Parse an answer sheet from a TOML file.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;
    parse_answer_sheet_str(&content, path)
}

pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse answer sheet: {}", source_path.display()))
}
