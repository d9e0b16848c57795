//! Bridge configuration with validation.
//!
//! Loaded in three layers, lowest precedence first: built-in defaults, an
//! optional TOML file, then command-line flags and `SNS_BRIDGE_*` variables
//! (see `cli`).

use serde::{Deserialize, Serialize};
use sns_verification::domain::policy::DEFAULT_SOURCE_DOMAIN;
use sns_verification::VerificationPolicy;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Main bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// HTTP listener
    pub http: HttpConfig,
    /// Envelope authentication
    pub verification: VerificationConfig,
    /// Topic allow-list
    pub topic: TopicConfig,
    /// Nagios external command pipe
    pub nagios: NagiosConfig,
    /// Scheduled-probe heartbeat file
    pub heartbeat: HeartbeatConfig,
    /// Subscription handshake callback
    pub confirmation: ConfirmationConfig,
    /// HTTP response behaviour
    pub response: ResponseConfig,
}

impl BridgeConfig {
    /// Parse a TOML document. Missing sections and keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.body_limit == 0 {
            return Err(ConfigError::InvalidLimit("http.body_limit cannot be 0".into()));
        }

        if self.verification.max_certificate_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "verification.max_certificate_bytes cannot be 0".into(),
            ));
        }

        if self.verification.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "verification.fetch_timeout cannot be 0".into(),
            ));
        }

        if self.confirmation.connect_timeout.is_zero() || self.confirmation.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "confirmation timeouts cannot be 0".into(),
            ));
        }

        if self.verification.verify_certificate
            && self.verification.verify_source_domain
            && self.verification.allowed_source_domain.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "verification.allowed_source_domain is required when the domain check is on"
                    .into(),
            ));
        }

        if self.topic.restrict_by_topic && self.topic.allowed_topic_arn.trim().is_empty() {
            return Err(ConfigError::MissingTopic);
        }

        if self.heartbeat.source.trim().is_empty() {
            return Err(ConfigError::Invalid("heartbeat.source cannot be empty".into()));
        }

        Ok(())
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub listen: SocketAddr,
    /// Largest accepted request body, in bytes. Notifications carry up to
    /// 256 KiB of message plus the envelope around it.
    pub body_limit: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080),
            body_limit: 320 * 1024,
        }
    }
}

/// Envelope authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Run the signature chain at all (local debugging only when false)
    pub verify_certificate: bool,
    /// Require the signing certificate to come from `allowed_source_domain`
    pub verify_source_domain: bool,
    /// Exact host the signing certificate must be served from
    pub allowed_source_domain: String,
    /// Refuse `SigningCertURL`s that are not `https`
    pub require_https: bool,
    /// Certificate download timeout
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,
    /// Largest certificate body accepted, in bytes
    pub max_certificate_bytes: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verify_certificate: true,
            verify_source_domain: true,
            allowed_source_domain: DEFAULT_SOURCE_DOMAIN.to_string(),
            require_https: true,
            fetch_timeout: Duration::from_secs(5),
            max_certificate_bytes: 8192,
        }
    }
}

impl VerificationConfig {
    /// The policy handed to the verification service.
    pub fn policy(&self) -> VerificationPolicy {
        VerificationPolicy {
            allowed_source_domain: self.allowed_source_domain.clone(),
            verify_certificate: self.verify_certificate,
            verify_source_domain: self.verify_source_domain,
            require_https: self.require_https,
        }
    }
}

/// Topic allow-list configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    /// Reject envelopes from any other topic
    pub restrict_by_topic: bool,
    /// The one accepted `TopicArn`
    pub allowed_topic_arn: String,
}

/// Nagios command pipe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NagiosConfig {
    /// External command file (a FIFO owned by the Nagios daemon)
    pub command_pipe: PathBuf,
    /// When false, commands are built and logged but NOT written. The pipe is
    /// then never opened, so `command_pipe` need not exist.
    pub write_to_nagios: bool,
}

impl Default for NagiosConfig {
    fn default() -> Self {
        Self {
            command_pipe: PathBuf::from("/usr/local/nagios/var/rw/nagios.cmd"),
            write_to_nagios: true,
        }
    }
}

/// Heartbeat file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Directory holding `<YYYY-MM-DD>_SNS-incoming-check.txt`
    pub directory: PathBuf,
    /// Last column of each heartbeat line
    pub source: String,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("/var/tmp/sns"),
            source: "sns-bridge".to_string(),
        }
    }
}

/// Subscription confirmation callback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Response configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Answer rejected envelopes with 403 instead of a silent 200
    pub distinguish_rejections: bool,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    /// Config file is not valid TOML for this schema
    #[error("cannot parse config: {0}")]
    Parse(String),
    /// Invalid size limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Topic restriction enabled without a topic
    #[error("topic.restrict_by_topic is set but topic.allowed_topic_arn is empty")]
    MissingTopic,
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
