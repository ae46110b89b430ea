//! The `speek grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use speek_core::answers::parse_answer_sheet;
use speek_core::assessment::Assessment;
use speek_core::bank::parse_question_bank;
use speek_core::config::load_config_from;
use speek_core::record::AttemptRecord;

pub fn execute(
    bank_path: PathBuf,
    answer_paths: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        !answer_paths.is_empty(),
        "at least one --answers sheet is required"
    );

    let config = load_config_from(config_path.as_deref())?;
    let bank = parse_question_bank(&bank_path)?;
    let mut assessment = bank.assessment(config.policy(), config.max_questions);

    println!(
        "Assessment: {} ({} of {} questions, pass mark {})",
        bank.name,
        assessment.questions().len(),
        bank.questions.len(),
        config.pass_threshold
    );

    let mut table = Table::new();
    table.set_header(vec!["Attempt", "Sheet", "Correct", "Score", "Rating", "Result"]);

    for (i, path) in answer_paths.iter().enumerate() {
        if i > 0 {
            assessment.retake_assessment();
            assessment.clear_answers();
        }

        let sheet = parse_answer_sheet(path)?;
        sheet
            .apply(&mut assessment)
            .with_context(|| format!("failed to apply {}", path.display()))?;
        let score = assessment.calculate_score();

        tracing::info!(
            "attempt {} scored {score} ({})",
            assessment.attempts() + 1,
            path.display()
        );

        table.add_row(vec![
            Cell::new(assessment.attempts() + 1),
            Cell::new(path.display()),
            Cell::new(format!(
                "{}/{}",
                assessment.correct_count(),
                assessment.questions().len()
            )),
            Cell::new(format!("{score}%")),
            Cell::new("*".repeat(assessment.calculate_rating() as usize)),
            Cell::new(if assessment.has_passed() { "PASS" } else { "FAIL" }),
        ]);
    }

    println!("{table}");
    print_missed(&assessment);

    let record = AttemptRecord::from_assessment(&assessment);
    let dir = output.unwrap_or(config.history_dir);
    let record_path = dir.join(record.file_name());
    record.save_json(&record_path)?;
    println!("Record saved to: {}", record_path.display());

    Ok(())
}

fn print_missed(assessment: &Assessment) {
    let missed: Vec<_> = assessment
        .questions()
        .iter()
        .enumerate()
        .filter(|(_, q)| !q.check_answer())
        .collect();

    if missed.is_empty() {
        return;
    }

    println!("Missed:");
    for (i, question) in missed {
        println!(
            "  [q{}] {}: {} (expected: {})",
            i + 1,
            question.kind().label(),
            question.prompt(),
            question.expected_answer()
        );
    }
}
