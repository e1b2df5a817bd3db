//! AMP markup validation of published stories.
//!
//! Unlike the checklist rules this performs I/O: the published story is
//! fetched and run through an external AMP validator. Both steps sit behind
//! traits so they can be swapped out or mocked. Failures are logged and
//! reported as "no finding".

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

use crate::config::AmpConfig;
use crate::linter::constants::messages;
use crate::linter::diagnostics::Diagnostic;
use crate::story::Story;

pub const RULE_NAME: &str = "story-amp-validation";

/// Validator error codes on `poster*` attributes. Missing or broken posters
/// are already reported by the cover checks.
const POSTER_URL_CODES: &[&str] = &["MISSING_URL", "INVALID_URL_PROTOCOL", "INVALID_URL"];

/// Attribute that marks markup deliberately excluded from validation.
const DEV_MODE_ATTRIBUTE: &str = "data-ampdevmode";

#[derive(Debug, Error)]
pub enum AmpValidationError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to spawn validator `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("validator timed out")]
    Timeout,
    #[error("validator I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse validator output: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub severity: String,
    pub code: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub col: usize,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

#[async_trait]
pub trait StoryFetcher: Send + Sync {
    /// Fetch the markup served at `url`.
    async fn fetch(&self, url: &str) -> Result<String, AmpValidationError>;
}

#[async_trait]
pub trait MarkupValidator: Send + Sync {
    async fn validate(&self, markup: &str) -> Result<ValidationResult, AmpValidationError>;
}

/// Fetches story markup over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                log::warn!("Falling back to default HTTP client: {}", err);
                reqwest::Client::new()
            });
        Self { client }
    }
}

#[async_trait]
impl StoryFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AmpValidationError> {
        let fetch_error = |source| AmpValidationError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(fetch_error)?;
        response.text().await.map_err(fetch_error)
    }
}

/// Runs the `amphtml-validator` command line tool.
pub struct AmphtmlValidatorCli {
    command: String,
    timeout: Duration,
}

impl AmphtmlValidatorCli {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MarkupValidator for AmphtmlValidatorCli {
    async fn validate(&self, markup: &str) -> Result<ValidationResult, AmpValidationError> {
        let temp_path = tempfile::Builder::new().suffix(".html").tempfile()?.into_temp_path();
        tokio::fs::write(&temp_path, markup).await?;

        let mut cmd = Command::new(&self.command);
        cmd.arg("--format=json").arg(&temp_path).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| AmpValidationError::Timeout)?
            .map_err(|source| AmpValidationError::SpawnFailed {
                command: self.command.clone(),
                source,
            })?;

        // The validator exits non-zero when the document fails, so only an
        // empty stdout means it did not run properly.
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(AmpValidationError::Parse(format!(
                "no output (exit code {}): {}",
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_validator_output(&stdout)
    }
}

/// Parse `amphtml-validator --format=json` output, which is keyed by input
/// file name.
pub fn parse_validator_output(json: &str) -> Result<ValidationResult, AmpValidationError> {
    let by_file: HashMap<String, ValidationResult> = serde_json::from_str(json)
        .map_err(|e| AmpValidationError::Parse(format!("invalid validator JSON: {}", e)))?;
    by_file
        .into_values()
        .next()
        .ok_or_else(|| AmpValidationError::Parse("validator reported no files".to_string()))
}

/// Drop warnings and errors that are either reported elsewhere in the
/// checklist or expected in story markup.
pub fn filter_known_false_positives(errors: Vec<ValidationError>) -> Vec<ValidationError> {
    errors
        .into_iter()
        .filter(|error| error.severity == "ERROR")
        .filter(|error| {
            let first_param = error.params.first().map(String::as_str).unwrap_or("");
            if POSTER_URL_CODES.contains(&error.code.as_str()) && first_param.starts_with("poster")
            {
                return false;
            }
            !error.params.iter().any(|param| param == DEV_MODE_ATTRIBUTE)
        })
        .collect()
}

pub struct AmpValidation {
    fetcher: Box<dyn StoryFetcher>,
    validator: Box<dyn MarkupValidator>,
}

impl AmpValidation {
    pub fn new(fetcher: Box<dyn StoryFetcher>, validator: Box<dyn MarkupValidator>) -> Self {
        Self { fetcher, validator }
    }

    pub fn from_config(config: &AmpConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        Self::new(
            Box::new(HttpFetcher::new(timeout)),
            Box::new(AmphtmlValidatorCli::new(&config.validator_command, timeout)),
        )
    }

    /// Validate a published story, logging and swallowing any failure.
    pub async fn check(&self, story: &Story) -> Option<Diagnostic> {
        match self.try_check(story).await {
            Ok(found) => found,
            Err(err) => {
                log::warn!("AMP validation of story {} failed: {}", story.id, err);
                None
            }
        }
    }

    /// Fetch, validate and filter. Stories that are not published yet are
    /// skipped without any I/O.
    pub async fn try_check(&self, story: &Story) -> Result<Option<Diagnostic>, AmpValidationError> {
        let Some(link) = story.published_link() else {
            return Ok(None);
        };
        if !story.status.is_published() {
            return Ok(None);
        }

        log::debug!("Validating AMP markup of {}", link);
        let markup = self.fetcher.fetch(link).await?;
        let result = self.validator.validate(&markup).await?;
        if result.status != ValidationStatus::Fail {
            return Ok(None);
        }

        let remaining = filter_known_false_positives(result.errors);
        log::debug!("{} AMP validation error(s) after filtering", remaining.len());
        if remaining.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            Diagnostic::error(RULE_NAME, messages::STORY_AMP_VALIDATION)
                .with_help(messages::STORY_AMP_VALIDATION_HELP)
                .with_story(&story.id),
        ))
    }
}
