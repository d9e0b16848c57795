//! Command-line flags and `SNS_BRIDGE_*` environment overrides.

use crate::domain::config::{BridgeConfig, ConfigError};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// SNS Bridge: CloudWatch alarms over SNS into Nagios passive checks
#[derive(Parser, Debug, Default)]
#[command(name = "sns-bridge", version)]
#[command(about = "Receives signed SNS webhooks and writes Nagios passive check results")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "SNS_BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP listen address
    #[arg(short, long, env = "SNS_BRIDGE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Nagios external command file
    #[arg(long, env = "SNS_BRIDGE_COMMAND_PIPE")]
    pub command_pipe: Option<PathBuf>,

    /// Directory for the daily heartbeat files
    #[arg(long, env = "SNS_BRIDGE_HEARTBEAT_DIR")]
    pub heartbeat_dir: Option<PathBuf>,

    /// Accept only this topic ARN (turns on the topic restriction)
    #[arg(long, env = "SNS_BRIDGE_ALLOWED_TOPIC")]
    pub allowed_topic: Option<String>,

    /// Host the signing certificate must be served from
    #[arg(long, env = "SNS_BRIDGE_SOURCE_DOMAIN")]
    pub source_domain: Option<String>,

    /// Build and log commands without writing them
    #[arg(long, env = "SNS_BRIDGE_DRY_RUN")]
    pub dry_run: bool,

    /// Skip signature verification entirely (local debugging only)
    #[arg(long, env = "SNS_BRIDGE_INSECURE_SKIP_VERIFY")]
    pub insecure_skip_verify: bool,

    /// Answer rejected envelopes with 403 instead of 200
    #[arg(long, env = "SNS_BRIDGE_DISTINGUISH_REJECTIONS")]
    pub distinguish_rejections: bool,

    /// Emit logs as JSON
    #[arg(long, env = "SNS_BRIDGE_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    /// Defaults, then the config file, then these flags.
    pub fn load_config(&self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::from_file(path)?,
            None => BridgeConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay flags that were given onto `config`.
    pub fn apply(&self, config: &mut BridgeConfig) {
        if let Some(listen) = self.listen {
            config.http.listen = listen;
        }
        if let Some(pipe) = &self.command_pipe {
            config.nagios.command_pipe = pipe.clone();
        }
        if let Some(dir) = &self.heartbeat_dir {
            config.heartbeat.directory = dir.clone();
        }
        if let Some(topic) = &self.allowed_topic {
            config.topic.restrict_by_topic = true;
            config.topic.allowed_topic_arn = topic.clone();
        }
        if let Some(domain) = &self.source_domain {
            config.verification.allowed_source_domain = domain.clone();
        }
        if self.dry_run {
            config.nagios.write_to_nagios = false;
        }
        if self.insecure_skip_verify {
            config.verification.verify_certificate = false;
        }
        if self.distinguish_rejections {
            config.response.distinguish_rejections = true;
        }
    }
}
