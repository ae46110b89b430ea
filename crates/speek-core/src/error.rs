//! Question error types.
//!
//! An incorrect answer is never an error; these cover construction of
//! malformed questions and submissions a variant refuses to store.

use thiserror::Error;

/// Errors raised when building a question or submitting an answer to one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The submitted answer was empty or whitespace where the variant needs text.
    #[error("please provide a valid answer")]
    BlankAnswer,

    /// A multiple-choice question was built without any options.
    #[error("multiple-choice question has no options")]
    NoOptions,

    /// The correct option of a multiple-choice question is not one of its options.
    #[error("correct option '{0}' is not one of the listed options")]
    CorrectOptionMissing(String),

    /// A matching question was built without any term pairs.
    #[error("matching question has no term pairs")]
    NoPairs,

    /// A match was submitted for a term the question does not contain.
    #[error("unknown term: {0}")]
    UnknownTerm(String),

    /// A term/match pair was submitted to a question that is not a matching question.
    #[error("question does not accept term matches")]
    NotMatching,
}

impl QuestionError {
    /// Returns `true` if this error came from a user submission rather than
    /// from building the question.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            QuestionError::BlankAnswer | QuestionError::UnknownTerm(_) | QuestionError::NotMatching
        )
    }
}
