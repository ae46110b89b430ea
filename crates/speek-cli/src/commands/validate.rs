//! The `speek validate` command.

use std::path::PathBuf;

use anyhow::Result;

use speek_core::bank;
use speek_core::config::load_config_from;

pub fn execute(bank_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let banks = if bank_path.is_dir() {
        bank::load_bank_directory(&bank_path)?
    } else {
        vec![bank::parse_question_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for set in &banks {
        println!(
            "Question bank: {} ({} questions, {})",
            set.name,
            set.questions.len(),
            set.kind
        );

        let warnings = bank::validate_question_bank(set, config.max_questions);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
