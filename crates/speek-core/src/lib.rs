//! speek-core: question model, scoring, and the assessment retake lifecycle.
//!
//! The engine lives in [`question`] and [`assessment`] and does no I/O.
//! [`bank`], [`answers`], [`record`] and [`config`] feed it questions and
//! answers from disk and persist what it produces.

pub mod answers;
pub mod assessment;
pub mod bank;
pub mod config;
pub mod error;
pub mod model;
pub mod question;
pub mod record;

pub use assessment::{Assessment, AssessmentState, ScoringPolicy};
pub use error::QuestionError;
pub use model::{AssessmentType, Difficulty};
pub use question::{Question, QuestionKind, Response};
