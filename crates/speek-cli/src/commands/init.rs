//! The `speek init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("speek.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("banks")?;
    write_if_missing(Path::new("banks/example.toml"), EXAMPLE_BANK)?;

    std::fs::create_dir_all("answers")?;
    write_if_missing(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: speek validate --bank banks/example.toml");
    println!("  2. Run: speek grade --bank banks/example.toml --answers answers/example.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# speek configuration

pass_threshold = 70
rating_bands = [90, 80, 70, 60]
max_questions = 10
history_dir = "./speek-history"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "spanish-animals"
name = "Spanish Animals"
description = "Animal vocabulary for beginners"
kind = "multiple_choice"
language = "spanish"

[[questions]]
type = "multiple_choice"
prompt = "What does 'perro' mean?"
options = ["1. cat", "2. dog", "3. bird"]
correct_option = "2. dog"

[[questions]]
type = "multiple_choice"
prompt = "How do you say 'cat'?"
options = ["1. gato", "2. pato", "3. pájaro"]
correct_option = "1. gato"
difficulty = "intermediate"

[[questions]]
type = "multiple_choice"
prompt = "Which one is a bird?"
options = ["1. vaca", "2. caballo", "3. pájaro"]
correct_option = "3. pájaro"
difficulty = "advanced"
"#;

const EXAMPLE_ANSWERS: &str = r#"[[answers]]
question = 1
answer = "2. dog"

[[answers]]
question = 2
answer = "1. gato"

[[answers]]
question = 3
answer = "1. vaca"
"#;
