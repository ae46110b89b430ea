//! The question model: one prompt, its correct-answer data, and the user's
//! current answer.
//!
//! Every variant lives in [`QuestionKind`], so answer checking is a single
//! exhaustive match and each variant carries only the data it needs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::QuestionError;
use crate::model::{AssessmentType, Difficulty};

/// The only text read as `true` on a true/false question, ignoring ASCII case.
const AFFIRMATIVE: &str = "true";

/// Correct-answer data for each question variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    TrueFalse {
        correct: bool,
    },
    MultipleChoice {
        options: Vec<String>,
        correct_option: String,
    },
    OpenEnded {
        correct_answer: String,
    },
    /// Term to correct match. Every term must be matched.
    Matching {
        pairs: BTreeMap<String, String>,
    },
    /// Front of the card is the prompt; `back` is the expected answer.
    Flashcard {
        back: String,
    },
}

impl QuestionKind {
    /// The nominal assessment type this variant belongs to, if any.
    pub fn assessment_type(&self) -> Option<AssessmentType> {
        match self {
            QuestionKind::TrueFalse { .. } => Some(AssessmentType::TrueFalse),
            QuestionKind::MultipleChoice { .. } => Some(AssessmentType::MultipleChoice),
            QuestionKind::OpenEnded { .. } => Some(AssessmentType::OpenEnded),
            QuestionKind::Matching { .. } => Some(AssessmentType::Matching),
            QuestionKind::Flashcard { .. } => None,
        }
    }

    /// Short label for tables and logs.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse { .. } => "true/false",
            QuestionKind::MultipleChoice { .. } => "multiple choice",
            QuestionKind::OpenEnded { .. } => "open ended",
            QuestionKind::Matching { .. } => "matching",
            QuestionKind::Flashcard { .. } => "flashcard",
        }
    }
}

/// What the user has submitted so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Text(String),
    Matches(BTreeMap<String, String>),
}

/// A single question with its submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    difficulty: Difficulty,
    kind: QuestionKind,
    response: Option<Response>,
}

impl Question {
    fn new(prompt: impl Into<String>, difficulty: Difficulty, kind: QuestionKind) -> Self {
        Self {
            prompt: prompt.into(),
            difficulty,
            kind,
            response: None,
        }
    }

    pub fn true_false(prompt: impl Into<String>, correct: bool, difficulty: Difficulty) -> Self {
        Self::new(prompt, difficulty, QuestionKind::TrueFalse { correct })
    }

    /// Build a multiple-choice question. Options are trimmed, and
    /// `correct_option` must be one of them after trimming.
    pub fn multiple_choice<I, S>(
        prompt: impl Into<String>,
        options: I,
        correct_option: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options
            .into_iter()
            .map(|o| o.into().trim().to_string())
            .collect();
        let correct_option = correct_option.into().trim().to_string();
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if !options.contains(&correct_option) {
            return Err(QuestionError::CorrectOptionMissing(correct_option));
        }
        Ok(Self::new(
            prompt,
            difficulty,
            QuestionKind::MultipleChoice {
                options,
                correct_option,
            },
        ))
    }

    pub fn open_ended(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self::new(
            prompt,
            difficulty,
            QuestionKind::OpenEnded {
                correct_answer: correct_answer.into().trim().to_string(),
            },
        )
    }

    /// Build a matching question from term/match pairs. Terms are trimmed.
    pub fn matching<I, K, V>(
        prompt: impl Into<String>,
        pairs: I,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_string(), v.into().trim().to_string()))
            .collect();
        if pairs.is_empty() {
            return Err(QuestionError::NoPairs);
        }
        Ok(Self::new(prompt, difficulty, QuestionKind::Matching { pairs }))
    }

    pub fn flashcard(
        front: impl Into<String>,
        back: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self::new(
            front,
            difficulty,
            QuestionKind::Flashcard {
                back: back.into().trim().to_string(),
            },
        )
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }

    /// Store the user's answer, replacing any previous one.
    ///
    /// Text is trimmed. Matching questions read `term=match` pairs separated
    /// by `;`. Only flashcards reject a blank answer; on error the previous
    /// answer is kept.
    pub fn submit_answer(&mut self, text: &str) -> Result<(), QuestionError> {
        let text = text.trim();
        match &self.kind {
            QuestionKind::Flashcard { .. } if text.is_empty() => Err(QuestionError::BlankAnswer),
            QuestionKind::Matching { pairs } => {
                let matches = parse_matches(text, pairs);
                self.response = Some(Response::Matches(matches));
                Ok(())
            }
            _ => {
                self.response = Some(Response::Text(text.to_string()));
                Ok(())
            }
        }
    }

    /// Record one term/match pair on a matching question.
    pub fn submit_match(&mut self, term: &str, matched: &str) -> Result<(), QuestionError> {
        let QuestionKind::Matching { pairs } = &self.kind else {
            return Err(QuestionError::NotMatching);
        };
        let term = term.trim();
        if !pairs.contains_key(term) {
            return Err(QuestionError::UnknownTerm(term.to_string()));
        }
        let matched = matched.trim().to_string();
        match &mut self.response {
            Some(Response::Matches(existing)) => {
                existing.insert(term.to_string(), matched);
            }
            slot => {
                *slot = Some(Response::Matches(BTreeMap::from([(
                    term.to_string(),
                    matched,
                )])));
            }
        }
        Ok(())
    }

    /// Whether the current answer is correct. An unanswered or empty answer
    /// is simply incorrect.
    pub fn check_answer(&self) -> bool {
        let Some(response) = &self.response else {
            return false;
        };
        match (&self.kind, response) {
            (QuestionKind::TrueFalse { correct }, Response::Text(text)) => {
                !text.is_empty() && is_affirmative(text) == *correct
            }
            (QuestionKind::MultipleChoice { correct_option, .. }, Response::Text(text)) => {
                text == correct_option
            }
            (QuestionKind::OpenEnded { correct_answer }, Response::Text(text))
            | (QuestionKind::Flashcard { back: correct_answer }, Response::Text(text)) => {
                !text.is_empty() && text.to_lowercase() == correct_answer.to_lowercase()
            }
            (QuestionKind::Matching { pairs }, Response::Matches(matches)) => pairs
                .iter()
                .all(|(term, expected)| matches.get(term) == Some(expected)),
            _ => false,
        }
    }

    /// Clear the submitted answer. Prompt, difficulty and correct-answer
    /// data are untouched.
    pub fn reset_answer(&mut self) {
        self.response = None;
    }

    /// The correct answer rendered as text, in the same form `submit_answer` accepts.
    pub fn expected_answer(&self) -> String {
        match &self.kind {
            QuestionKind::TrueFalse { correct } => correct.to_string(),
            QuestionKind::MultipleChoice { correct_option, .. } => correct_option.clone(),
            QuestionKind::OpenEnded { correct_answer } => correct_answer.clone(),
            QuestionKind::Matching { pairs } => format_matches(pairs),
            QuestionKind::Flashcard { back } => back.clone(),
        }
    }
}

fn is_affirmative(text: &str) -> bool {
    text.eq_ignore_ascii_case(AFFIRMATIVE)
}

fn parse_matches(text: &str, pairs: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut matches = BTreeMap::new();
    for segment in text.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((term, matched)) = segment.split_once('=') else {
            tracing::warn!("ignoring malformed match segment '{segment}'");
            continue;
        };
        let term = term.trim();
        if !pairs.contains_key(term) {
            tracing::warn!("ignoring match for unknown term '{term}'");
            continue;
        }
        matches.insert(term.to_string(), matched.trim().to_string());
    }
    matches
}

fn format_matches(pairs: &BTreeMap<String, String>) -> String {
    pairs
        .iter()
        .map(|(term, matched)| format!("{term}={matched}"))
        .collect::<Vec<_>>()
        .join("; ")
}
