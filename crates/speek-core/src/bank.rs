//! TOML question bank loader.
//!
//! Loads question banks from TOML files and directories, turns them into
//! assessments, and validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::assessment::{Assessment, ScoringPolicy};
use crate::model::{AssessmentType, Difficulty};
use crate::question::Question;

/// A named set of questions sharing a nominal assessment type.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: AssessmentType,
    /// Language being taught, e.g. "spanish".
    pub language: Option<String>,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Build an assessment from the first `limit` questions, in bank order.
    pub fn assessment(&self, policy: ScoringPolicy, limit: usize) -> Assessment {
        let questions = self.questions.iter().take(limit).cloned().collect();
        Assessment::new(self.kind, questions).with_policy(policy)
    }
}

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_kind")]
    kind: String,
    #[serde(default)]
    language: Option<String>,
}

fn default_kind() -> String {
    "multiple_choice".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(rename = "type")]
    question_type: String,
    prompt: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    correct: Option<bool>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_option: Option<String>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    pairs: BTreeMap<String, String>,
    #[serde(default)]
    back: Option<String>,
}

impl TomlQuestion {
    fn into_question(self) -> Result<Question> {
        let difficulty: Difficulty = self
            .difficulty
            .as_deref()
            .map(str::parse::<Difficulty>)
            .transpose()
            .map_err(|e: String| anyhow::anyhow!("{}", e))?
            .unwrap_or_default();

        let question = match self.question_type.as_str() {
            "true_false" => {
                let correct = self.correct.context("true_false question needs `correct`")?;
                Question::true_false(self.prompt, correct, difficulty)
            }
            "multiple_choice" => {
                let correct_option = self
                    .correct_option
                    .context("multiple_choice question needs `correct_option`")?;
                Question::multiple_choice(self.prompt, self.options, correct_option, difficulty)?
            }
            "open_ended" => {
                let correct_answer = self
                    .correct_answer
                    .context("open_ended question needs `correct_answer`")?;
                Question::open_ended(self.prompt, correct_answer, difficulty)
            }
            "matching" => Question::matching(self.prompt, self.pairs, difficulty)?,
            "flashcard" => {
                let back = self.back.context("flashcard question needs `back`")?;
                Question::flashcard(self.prompt, back, difficulty)
            }
            other => anyhow::bail!("unknown question type: {other}"),
        };
        Ok(question)
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let kind: AssessmentType = parsed
        .bank
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            q.into_question()
                .with_context(|| format!("question {} in {}", i + 1, source_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "loaded bank '{}' with {} questions from {}",
        parsed.bank.id,
        questions.len(),
        source_path.display()
    );

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        kind,
        language: parsed.bank.language,
        questions,
    })
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    banks.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank, max_questions: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions; every assessment will score 0".into(),
        });
    }

    if bank.questions.len() > max_questions {
        warnings.push(ValidationWarning {
            question: None,
            message: format!(
                "bank has {} questions; only the first {max_questions} are used per assessment",
                bank.questions.len()
            ),
        });
    }

    let mut seen_prompts = HashSet::new();
    for (i, question) in bank.questions.iter().enumerate() {
        let number = Some(i + 1);
        let prompt = question.prompt().trim();

        if prompt.is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt is empty".into(),
            });
        } else if !seen_prompts.insert(prompt.to_lowercase()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("duplicate prompt: {prompt}"),
            });
        }

        if let Some(kind) = question.kind().assessment_type() {
            if kind != bank.kind {
                warnings.push(ValidationWarning {
                    question: number,
                    message: format!("{} question in a {} bank", kind, bank.kind),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "spanish-basics"
name = "Spanish Basics"
description = "First steps in Spanish"
kind = "multiple_choice"
language = "spanish"

[[questions]]
type = "multiple_choice"
prompt = "What does 'perro' mean?"
options = ["1. cat", "2. dog", "3. bird"]
correct_option = "2. dog"

[[questions]]
type = "true_false"
prompt = "'Gato' means cat."
difficulty = "rudimentary"
correct = true

[[questions]]
type = "open_ended"
prompt = "Translate 'hello'."
difficulty = "intermediate"
correct_answer = "Hola"

[[questions]]
type = "matching"
prompt = "Match the animals."
difficulty = "advanced"

[questions.pairs]
dog = "perro"
cat = "gato"

[[questions]]
type = "flashcard"
prompt = "gracias"
back = "thank you"
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "spanish-basics");
        assert_eq!(bank.kind, AssessmentType::MultipleChoice);
        assert_eq!(bank.language.as_deref(), Some("spanish"));
        assert_eq!(bank.questions.len(), 5);
        assert_eq!(bank.questions[2].difficulty(), Difficulty::Intermediate);
        assert_eq!(bank.questions[3].expected_answer(), "cat=gato; dog=perro");
        assert_eq!(bank.questions[4].kind().label(), "flashcard");
    }

    #[test]
    fn parse_minimal_bank() {
        let toml = r#"
[bank]
id = "minimal"
name = "Minimal"

[[questions]]
type = "open_ended"
prompt = "Say hi"
correct_answer = "hi"
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.kind, AssessmentType::MultipleChoice);
        assert_eq!(bank.questions[0].difficulty(), Difficulty::Rudimentary);
        assert!(bank.description.is_empty());
    }

    #[test]
    fn parse_rejects_missing_variant_data() {
        let toml = r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
type = "true_false"
prompt = "Is it?"
"#;
        let err = parse_question_bank_str(toml, &PathBuf::from("broken.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("question 1"), "got: {msg}");
        assert!(msg.contains("needs `correct`"), "got: {msg}");
    }

    #[test]
    fn parse_rejects_correct_option_outside_options() {
        let toml = r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
type = "multiple_choice"
prompt = "Pick"
options = ["Red", "Blue"]
correct_option = "Green"
"#;
        let err = parse_question_bank_str(toml, &PathBuf::from("broken.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("not one of the listed options"));
    }

    #[test]
    fn parse_rejects_unknown_type_and_difficulty() {
        let unknown_type = r#"
[bank]
id = "x"
name = "X"

[[questions]]
type = "essay"
prompt = "Write"
"#;
        assert!(parse_question_bank_str(unknown_type, &PathBuf::from("x.toml")).is_err());

        let unknown_difficulty = r#"
[bank]
id = "x"
name = "X"

[[questions]]
type = "open_ended"
prompt = "Write"
correct_answer = "y"
difficulty = "legendary"
"#;
        assert!(parse_question_bank_str(unknown_difficulty, &PathBuf::from("x.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_question_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn assessment_takes_leading_questions() {
        let bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let policy = ScoringPolicy {
            pass_threshold: 50,
            ..ScoringPolicy::default()
        };
        let assessment = bank.assessment(policy, 3);
        assert_eq!(assessment.questions().len(), 3);
        assert_eq!(assessment.kind(), AssessmentType::MultipleChoice);
        assert_eq!(assessment.policy().pass_threshold, 50);
        assert_eq!(assessment.questions()[0].prompt(), "What does 'perro' mean?");
    }

    #[test]
    fn validate_flags_mixed_variants() {
        let bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_bank(&bank, 10);
        // true_false, open_ended and matching in a multiple_choice bank; flashcards are neutral.
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].question, Some(2));
        assert!(warnings[0].message.contains("true_false question"));
    }

    #[test]
    fn validate_duplicates_and_limits() {
        let toml = r#"
[bank]
id = "dupes"
name = "Dupes"
kind = "open_ended"

[[questions]]
type = "open_ended"
prompt = "Say hi"
correct_answer = "hi"

[[questions]]
type = "open_ended"
prompt = "say HI"
correct_answer = "hi"

[[questions]]
type = "open_ended"
prompt = "  "
correct_answer = "hi"
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_bank(&bank, 2);
        assert!(warnings.iter().any(|w| w.message.contains("only the first 2")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(3) && w.message == "prompt is empty"));
    }

    #[test]
    fn validate_empty_bank() {
        let toml = "[bank]\nid = \"empty\"\nname = \"Empty\"\n";
        let bank = parse_question_bank_str(toml, &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_question_bank(&bank, 10);
        assert!(warnings[0].message.contains("no questions"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("basics.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(
            dir.path().join("nested/bad.toml"),
            "this is not [valid toml }{",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "spanish-basics");
    }

    #[test]
    fn load_directory_requires_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bank.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_bank_directory(&file).is_err());
    }
}
