//! Assessment scoring and the retake lifecycle.
//!
//! An [`Assessment`] owns an ordered list of questions. Scoring counts the
//! questions whose answer checks out and stores a truncated percentage; the
//! rating and pass flag are derived from that stored score.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AssessmentType;
use crate::question::Question;

/// Default minimum score for a pass.
pub const DEFAULT_PASS_THRESHOLD: u32 = 70;

/// Default lower bounds for ratings 5, 4, 3 and 2. Anything below earns 1.
pub const DEFAULT_RATING_BANDS: [u32; 4] = [90, 80, 70, 60];

/// Thresholds used to turn a score into a pass flag and a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Minimum score (inclusive) that counts as a pass.
    pub pass_threshold: u32,
    /// Minimum scores for ratings 5, 4, 3 and 2, highest first.
    pub rating_bands: [u32; 4],
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            rating_bands: DEFAULT_RATING_BANDS,
        }
    }
}

impl ScoringPolicy {
    /// Map a score to a 1 to 5 rating.
    pub fn rating_for(&self, score: u32) -> u8 {
        let bands_met = self
            .rating_bands
            .iter()
            .position(|&floor| score >= floor)
            .unwrap_or(self.rating_bands.len());
        (5 - bands_met) as u8
    }

    pub fn passes(&self, score: u32) -> bool {
        score >= self.pass_threshold
    }
}

/// Where an assessment is in its scoring lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentState {
    /// Never scored and never retaken.
    Unscored,
    /// Scored at least once since creation or the last retake.
    Scored,
    /// Retaken and not yet scored again.
    Retaken,
}

/// A scored collection of questions with pass/fail and retake tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    id: Uuid,
    kind: AssessmentType,
    questions: Vec<Question>,
    score: u32,
    attempts: u32,
    passed: bool,
    state: AssessmentState,
    policy: ScoringPolicy,
}

impl Assessment {
    /// Create an assessment with a fresh id and the default scoring policy.
    pub fn new(kind: AssessmentType, questions: Vec<Question>) -> Self {
        Self::with_id(Uuid::new_v4(), kind, questions)
    }

    /// Create an assessment with an explicit id, e.g. when rebuilding one
    /// from saved progress.
    pub fn with_id(id: Uuid, kind: AssessmentType, questions: Vec<Question>) -> Self {
        Self {
            id,
            kind,
            questions,
            score: 0,
            attempts: 0,
            passed: false,
            state: AssessmentState::Unscored,
            policy: ScoringPolicy::default(),
        }
    }

    /// Replace the scoring policy. The stored pass flag is re-derived from
    /// the stored score.
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self.passed = self.state == AssessmentState::Scored
            && !self.questions.is_empty()
            && policy.passes(self.score);
        self
    }

    /// Number of questions currently answered correctly.
    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.check_answer()).count()
    }

    /// Score the current answers, store the result and re-derive the pass flag.
    ///
    /// The score is `correct * 100 / total`, truncated. An assessment with no
    /// questions scores 0 and does not pass.
    pub fn calculate_score(&mut self) -> u32 {
        let total = self.questions.len();
        let correct = self.correct_count();
        self.score = if total == 0 {
            0
        } else {
            (correct * 100 / total) as u32
        };
        self.passed = total > 0 && self.policy.passes(self.score);
        self.state = AssessmentState::Scored;

        tracing::debug!(
            assessment = %self.id,
            correct,
            total,
            score = self.score,
            passed = self.passed,
            "scored assessment"
        );
        self.score
    }

    /// Rating for the stored score. Call [`calculate_score`](Self::calculate_score)
    /// first for it to reflect the current answers.
    pub fn calculate_rating(&self) -> u8 {
        self.policy.rating_for(self.score)
    }

    pub fn has_passed(&self) -> bool {
        self.passed
    }

    /// Start another attempt: bump the attempt counter and clear score and
    /// pass flag. Submitted answers are left in place; see
    /// [`clear_answers`](Self::clear_answers).
    pub fn retake_assessment(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        self.score = 0;
        self.passed = false;
        self.state = AssessmentState::Retaken;
        tracing::debug!(assessment = %self.id, attempts = self.attempts, "assessment retaken");
    }

    /// Reset every question's answer. Score, attempts and pass flag are untouched.
    pub fn clear_answers(&mut self) {
        self.questions.iter_mut().for_each(Question::reset_answer);
    }

    /// The stored score, without recomputing.
    pub fn results(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> AssessmentType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: AssessmentType) {
        self.kind = kind;
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }

    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }
}
