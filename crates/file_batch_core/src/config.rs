//! Environment-resolved settings shared by every function.
//!
//! Blank variables take their default. Numbers that fail to parse also take
//! the default, while parsed non-positive numbers are rejected so that a
//! deployment typo such as `BATCH_SIZE=0` stops the function at cold start.

use thiserror::Error;

pub const DEFAULT_BUCKET_NAME: &str = "s3-file-processor-bucket";
pub const DEFAULT_PENDING_PREFIX: &str = "pending/";
pub const DEFAULT_PROCESSING_PREFIX: &str = "processing/";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_FILE_THRESHOLD: u64 = 2000;
pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_SCHEDULE_EXPRESSION: &str = "rate(10 minutes)";
pub const DEFAULT_ENVIRONMENT: &str = "dev";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("S3 bucket name is required")]
    EmptyBucketName,
    #[error("file threshold must be positive, got {0}")]
    NonPositiveThreshold(i64),
    #[error("batch size must be positive, got {0}")]
    NonPositiveBatchSize(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bucket_name: String,
    pub pending_prefix: String,
    pub processing_prefix: String,
    pub aws_region: String,
    pub file_threshold: u64,
    pub batch_size: usize,
    pub file_processing_state_machine_arn: String,
    pub file_validation_state_machine_arn: String,
    pub schedule_expression: String,
    pub schedule_enabled: bool,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            pending_prefix: DEFAULT_PENDING_PREFIX.to_string(),
            processing_prefix: DEFAULT_PROCESSING_PREFIX.to_string(),
            aws_region: DEFAULT_REGION.to_string(),
            file_threshold: DEFAULT_FILE_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
            file_processing_state_machine_arn: String::new(),
            file_validation_state_machine_arn: String::new(),
            schedule_expression: DEFAULT_SCHEDULE_EXPRESSION.to_string(),
            schedule_enabled: true,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let file_threshold = match parse_count(read("FILE_THRESHOLD")) {
            Some(value) if value > 0 => value as u64,
            Some(value) => return Err(ConfigError::NonPositiveThreshold(value)),
            None => defaults.file_threshold,
        };
        let batch_size = match parse_count(read("BATCH_SIZE")) {
            Some(value) if value > 0 => value as usize,
            Some(value) => return Err(ConfigError::NonPositiveBatchSize(value)),
            None => defaults.batch_size,
        };

        let config = Self {
            bucket_name: read("S3_BUCKET_NAME").unwrap_or(defaults.bucket_name),
            pending_prefix: read("PENDING_PREFIX").unwrap_or(defaults.pending_prefix),
            processing_prefix: read("PROCESSING_PREFIX").unwrap_or(defaults.processing_prefix),
            aws_region: read("AWS_REGION").unwrap_or(defaults.aws_region),
            file_threshold,
            batch_size,
            file_processing_state_machine_arn: read("FILE_PROCESSING_STATE_MACHINE_ARN")
                .unwrap_or_default(),
            file_validation_state_machine_arn: read("FILE_VALIDATION_STATE_MACHINE_ARN")
                .unwrap_or_default(),
            schedule_expression: read("SCHEDULE_EXPRESSION")
                .unwrap_or(defaults.schedule_expression),
            schedule_enabled: read("SCHEDULE_ENABLED")
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.schedule_enabled),
            environment: read("ENVIRONMENT").unwrap_or(defaults.environment),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_name.trim().is_empty() {
            return Err(ConfigError::EmptyBucketName);
        }
        if self.file_threshold == 0 {
            return Err(ConfigError::NonPositiveThreshold(0));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::NonPositiveBatchSize(0));
        }
        Ok(())
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AppConfig{{bucket='{}', pendingPrefix='{}', processingPrefix='{}', region='{}', fileThreshold={}, batchSize={}, schedule='{}', scheduleEnabled={}, environment='{}'}}",
            self.bucket_name,
            self.pending_prefix,
            self.processing_prefix,
            self.aws_region,
            self.file_threshold,
            self.batch_size,
            self.schedule_expression,
            self.schedule_enabled,
            self.environment,
        )
    }
}

// Unparseable text falls back to the default rather than failing.
fn parse_count(raw: Option<String>) -> Option<i64> {
    raw.and_then(|value| value.parse::<i64>().ok())
}
