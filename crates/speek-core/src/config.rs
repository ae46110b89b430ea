//! speek configuration.
//!
//! Thresholds and output paths are plain values loaded once by the entry
//! point and handed to whatever needs them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::assessment::{ScoringPolicy, DEFAULT_PASS_THRESHOLD, DEFAULT_RATING_BANDS};

/// Environment variable that overrides `pass_threshold`.
pub const PASS_THRESHOLD_ENV: &str = "SPEEK_PASS_THRESHOLD";

/// Top-level speek configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeekConfig {
    /// Minimum score for a pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
    /// Minimum scores for ratings 5, 4, 3 and 2.
    #[serde(default = "default_rating_bands")]
    pub rating_bands: [u32; 4],
    /// Largest number of questions put into one assessment.
    #[serde(default = "default_max_questions")]
    pub max_questions: usize,
    /// Where attempt records are written.
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
}

fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD
}
fn default_rating_bands() -> [u32; 4] {
    DEFAULT_RATING_BANDS
}
fn default_max_questions() -> usize {
    10
}
fn default_history_dir() -> PathBuf {
    PathBuf::from("./speek-history")
}

impl Default for SpeekConfig {
    fn default() -> Self {
        Self {
            pass_threshold: default_pass_threshold(),
            rating_bands: default_rating_bands(),
            max_questions: default_max_questions(),
            history_dir: default_history_dir(),
        }
    }
}

impl SpeekConfig {
    /// The scoring policy assessments should be built with.
    pub fn policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            pass_threshold: self.pass_threshold,
            rating_bands: self.rating_bands,
        }
    }

    /// Reject thresholds outside 0..=100, unordered rating bands and a zero
    /// question limit.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.pass_threshold <= 100,
            "pass_threshold must be between 0 and 100, got {}",
            self.pass_threshold
        );
        anyhow::ensure!(
            self.rating_bands.iter().all(|&b| b <= 100),
            "rating_bands must be between 0 and 100"
        );
        anyhow::ensure!(
            self.rating_bands.windows(2).all(|w| w[0] > w[1]),
            "rating_bands must be strictly descending, got {:?}",
            self.rating_bands
        );
        anyhow::ensure!(self.max_questions >= 1, "max_questions must be at least 1");
        Ok(())
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `speek.toml` in the current directory
/// 2. `~/.config/speek/config.toml`
///
/// `SPEEK_PASS_THRESHOLD` overrides the pass threshold.
pub fn load_config_from(path: Option<&Path>) -> Result<SpeekConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("speek.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => SpeekConfig::default(),
    };

    apply_threshold_override(&mut config, std::env::var(PASS_THRESHOLD_ENV).ok())?;
    config.validate()?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<SpeekConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<SpeekConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn apply_threshold_override(config: &mut SpeekConfig, value: Option<String>) -> Result<()> {
    if let Some(raw) = value {
        config.pass_threshold = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {PASS_THRESHOLD_ENV} value: '{raw}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("speek"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SpeekConfig::default();
        assert_eq!(config.pass_threshold, 70);
        assert_eq!(config.rating_bands, [90, 80, 70, 60]);
        assert_eq!(config.max_questions, 10);
        assert_eq!(config.policy(), ScoringPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config: SpeekConfig = toml::from_str(
            r#"
pass_threshold = 80
history_dir = "progress"
"#,
        )
        .unwrap();
        assert_eq!(config.pass_threshold, 80);
        assert_eq!(config.rating_bands, DEFAULT_RATING_BANDS);
        assert_eq!(config.history_dir, PathBuf::from("progress"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speek.toml");
        std::fs::write(&path, "max_questions = 5\nrating_bands = [95, 85, 75, 65]\n").unwrap();

        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.max_questions, 5);
        assert_eq!(config.policy().rating_for(80), 3);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/speek.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn threshold_override() {
        let mut config = SpeekConfig::default();
        apply_threshold_override(&mut config, Some(" 85 ".into())).unwrap();
        assert_eq!(config.pass_threshold, 85);

        apply_threshold_override(&mut config, None).unwrap();
        assert_eq!(config.pass_threshold, 85);

        assert!(apply_threshold_override(&mut config, Some("high".into())).is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = SpeekConfig {
            pass_threshold: 101,
            ..SpeekConfig::default()
        };
        assert!(config.validate().is_err());

        config.pass_threshold = 70;
        config.rating_bands = [60, 70, 80, 90];
        assert!(config.validate().is_err());

        config.rating_bands = DEFAULT_RATING_BANDS;
        config.max_questions = 0;
        assert!(config.validate().is_err());
    }
}
