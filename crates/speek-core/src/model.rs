//! Shared enumerations for questions and assessments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard a question is. Fixed when the question is built.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Rudimentary,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Rudimentary => write!(f, "rudimentary"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rudimentary" | "beginner" => Ok(Difficulty::Rudimentary),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Nominal question type of an assessment.
///
/// Informational only: an assessment may hold any mix of question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
    Matching,
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentType::MultipleChoice => write!(f, "multiple_choice"),
            AssessmentType::TrueFalse => write!(f, "true_false"),
            AssessmentType::OpenEnded => write!(f, "open_ended"),
            AssessmentType::Matching => write!(f, "matching"),
        }
    }
}

impl FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mc" => Ok(AssessmentType::MultipleChoice),
            "true_false" | "tf" => Ok(AssessmentType::TrueFalse),
            "open_ended" => Ok(AssessmentType::OpenEnded),
            "matching" => Ok(AssessmentType::Matching),
            other => Err(format!("unknown assessment type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Intermediate.to_string(), "intermediate");
        assert_eq!(
            "ADVANCED".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert_eq!(
            "beginner".parse::<Difficulty>().unwrap(),
            Difficulty::Rudimentary
        );
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_orders_by_hardness() {
        assert!(Difficulty::Rudimentary < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
        assert_eq!(Difficulty::default(), Difficulty::Rudimentary);
    }

    #[test]
    fn assessment_type_display_and_parse() {
        assert_eq!(AssessmentType::TrueFalse.to_string(), "true_false");
        assert_eq!(
            "multiple-choice".parse::<AssessmentType>().unwrap(),
            AssessmentType::MultipleChoice
        );
        assert_eq!(
            "tf".parse::<AssessmentType>().unwrap(),
            AssessmentType::TrueFalse
        );
        assert!("essay".parse::<AssessmentType>().is_err());
    }

    #[test]
    fn assessment_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&AssessmentType::OpenEnded).unwrap();
        assert_eq!(json, "\"open_ended\"");
        let back: AssessmentType = serde_json::from_str("\"matching\"").unwrap();
        assert_eq!(back, AssessmentType::Matching);
    }
}
