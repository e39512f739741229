//! Configuration loading and parsing
//!
//! Every section is optional; an empty file yields the built-in demo setup.

use crate::students::Student;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "crate::students::default_roster")]
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_credit_log")]
    pub credit_log: PathBuf,
    #[serde(default = "default_upi_log")]
    pub upi_log: PathBuf,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("log.txt")
}

fn default_credit_log() -> PathBuf {
    PathBuf::from("credit_log.txt")
}

fn default_upi_log() -> PathBuf {
    PathBuf::from("upi_log.txt")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            log_file: default_log_file(),
            credit_log: default_credit_log(),
            upi_log: default_upi_log(),
        }
    }
}

impl LoggingConfig {
    /// Resolve a log file name against `output_dir`
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file),
            None => file.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradingConfig {
    #[serde(default = "default_a_threshold")]
    pub a_threshold: i32,
    #[serde(default = "default_b_threshold")]
    pub b_threshold: i32,
    #[serde(default = "default_pass_mark")]
    pub pass_mark: i32,
    /// City used by the combined filter + grade + print pass
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_bonus")]
    pub bonus: i32,
}

fn default_a_threshold() -> i32 {
    70
}

fn default_b_threshold() -> i32 {
    50
}

fn default_pass_mark() -> i32 {
    50
}

fn default_city() -> String {
    "Ahmedabad".to_string()
}

fn default_bonus() -> i32 {
    5
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            a_threshold: default_a_threshold(),
            b_threshold: default_b_threshold(),
            pass_mark: default_pass_mark(),
            city: default_city(),
            bonus: default_bonus(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            grading: GradingConfig::default(),
            output: OutputConfig::default(),
            students: crate::students::default_roster(),
        }
    }
}

impl AppConfig {
    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.grading.a_threshold < self.grading.b_threshold {
            bail!(
                "grading.a_threshold ({}) must not be below grading.b_threshold ({})",
                self.grading.a_threshold,
                self.grading.b_threshold
            );
        }

        let mut ids = HashSet::new();
        for student in &self.students {
            if !ids.insert(student.id) {
                bail!("Duplicate student id {} ({})", student.id, student.name);
            }
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
