//! Attempt records: a serializable snapshot of a scored assessment, written
//! to JSON as the user's saved progress.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::Assessment;
use crate::model::{AssessmentType, Difficulty};

/// The outcome of one assessment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Id of the assessment this attempt belongs to.
    pub assessment_id: Uuid,
    /// Nominal assessment type.
    pub kind: AssessmentType,
    /// When the record was taken.
    pub recorded_at: DateTime<Utc>,
    /// Stored score, 0 to 100.
    pub score: u32,
    /// 1 to 5 rating for `score`.
    pub rating: u8,
    pub passed: bool,
    /// Retakes so far.
    pub attempts: u32,
    pub correct: usize,
    pub total: usize,
    /// Per-question outcomes, in assessment order.
    pub questions: Vec<QuestionOutcome>,
    /// Correct and total counts per difficulty.
    pub by_difficulty: BTreeMap<Difficulty, DifficultyTally>,
}

/// How one question went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub prompt: String,
    pub difficulty: Difficulty,
    pub answered: bool,
    pub correct: bool,
    pub expected: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTally {
    pub correct: usize,
    pub total: usize,
}

impl AttemptRecord {
    /// Snapshot an assessment. Reads the stored score; per-question outcomes
    /// reflect the current answers.
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let questions: Vec<QuestionOutcome> = assessment
            .questions()
            .iter()
            .map(|q| QuestionOutcome {
                prompt: q.prompt().to_string(),
                difficulty: q.difficulty(),
                answered: q.is_answered(),
                correct: q.check_answer(),
                expected: q.expected_answer(),
            })
            .collect();

        let mut by_difficulty: BTreeMap<Difficulty, DifficultyTally> = BTreeMap::new();
        for outcome in &questions {
            let tally = by_difficulty.entry(outcome.difficulty).or_default();
            tally.total += 1;
            if outcome.correct {
                tally.correct += 1;
            }
        }

        Self {
            assessment_id: assessment.id(),
            kind: assessment.kind(),
            recorded_at: Utc::now(),
            score: assessment.results(),
            rating: assessment.calculate_rating(),
            passed: assessment.has_passed(),
            attempts: assessment.attempts(),
            correct: questions.iter().filter(|q| q.correct).count(),
            total: questions.len(),
            questions,
            by_difficulty,
        }
    }

    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize record")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record from {}", path.display()))?;
        let record: AttemptRecord =
            serde_json::from_str(&content).context("failed to parse record JSON")?;
        Ok(record)
    }

    /// File name used when writing this record into a history directory.
    pub fn file_name(&self) -> String {
        format!(
            "attempt-{}-{}.json",
            self.assessment_id,
            self.recorded_at.format("%Y-%m-%dT%H%M%S")
        )
    }
}
