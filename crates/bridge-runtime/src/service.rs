//! # Bridge Pipeline
//!
//! Application service implementing `EnvelopeProcessingApi`.
//!
//! ## Sequence
//!
//! 1. Parse the body into an `Envelope`
//! 2. Topic allow-list (when `restrict_by_topic`)
//! 3. Signing-domain check, certificate fetch, signature verification
//! 4. Classification
//! 5. Dispatch: handshake confirmation, heartbeat record, or Nagios command
//!
//! Steps 2 and 3 share one `PipelineDecision`; the first failure wins and
//! nothing is dispatched.

use crate::adapters::{DailyHeartbeatFile, HttpSubscriptionConfirmer, NagiosCommandPipe};
use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::domain::outcome::PipelineOutcome;
use crate::ports::inbound::EnvelopeProcessingApi;
use crate::ports::outbound::{
    CommandSink, HeartbeatSink, SubscriptionConfirmer, SystemTimeSource, TimeSource,
};
use alarm_translation::{classify, translate, Classification, HeartbeatRecord};
use async_trait::async_trait;
use bridge_types::{Envelope, PipelineDecision, Rejection};
use sns_verification::{
    EnvelopeVerificationApi, EnvelopeVerificationService, HttpCertificateSource,
};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// Settings the pipeline reads per request.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub restrict_by_topic: bool,
    pub allowed_topic_arn: String,
    pub write_to_nagios: bool,
    pub heartbeat_source: String,
}

impl PipelineSettings {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            restrict_by_topic: config.topic.restrict_by_topic,
            allowed_topic_arn: config.topic.allowed_topic_arn.clone(),
            write_to_nagios: config.nagios.write_to_nagios,
            heartbeat_source: config.heartbeat.source.clone(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

/// SNS envelope pipeline.
pub struct BridgePipeline {
    verifier: Arc<dyn EnvelopeVerificationApi>,
    commands: Arc<dyn CommandSink>,
    heartbeats: Arc<dyn HeartbeatSink>,
    confirmer: Arc<dyn SubscriptionConfirmer>,
    time_source: Arc<dyn TimeSource>,
    settings: PipelineSettings,
}

impl BridgePipeline {
    /// Create a pipeline from explicit ports.
    pub fn new(
        verifier: Arc<dyn EnvelopeVerificationApi>,
        commands: Arc<dyn CommandSink>,
        heartbeats: Arc<dyn HeartbeatSink>,
        confirmer: Arc<dyn SubscriptionConfirmer>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            verifier,
            commands,
            heartbeats,
            confirmer,
            time_source: Arc::new(SystemTimeSource),
            settings,
        }
    }

    /// Replace the clock.
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Wire the production adapters from configuration.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        config
            .validate()
            .map_err(|e| BridgeError::Config(e.to_string()))?;

        let certificates = HttpCertificateSource::new(
            config.verification.fetch_timeout,
            config.verification.max_certificate_bytes,
        )
        .map_err(|e| BridgeError::Config(format!("certificate client: {e}")))?;

        let confirmer = HttpSubscriptionConfirmer::new(
            config.confirmation.connect_timeout,
            config.confirmation.timeout,
        )
        .map_err(|e| BridgeError::Config(format!("confirmation client: {e}")))?;

        let verifier =
            EnvelopeVerificationService::new(certificates, config.verification.policy());

        if !config.nagios.write_to_nagios {
            warn!(
                path = %config.nagios.command_pipe.display(),
                "dry run: commands will NOT be written to the Nagios command pipe"
            );
        }

        Ok(Self::new(
            Arc::new(verifier),
            Arc::new(NagiosCommandPipe::new(config.nagios.command_pipe.clone())),
            Arc::new(DailyHeartbeatFile::new(config.heartbeat.directory.clone())),
            Arc::new(confirmer),
            PipelineSettings::from_config(config),
        ))
    }

    /// Run an already parsed envelope through validation and dispatch.
    pub async fn process_envelope(
        &self,
        envelope: &Envelope,
    ) -> Result<PipelineOutcome, BridgeError> {
        let mut decision = PipelineDecision::new();

        self.check_topic(envelope, &mut decision);
        self.verifier.authenticate(envelope, &mut decision).await;

        let Some(classification) = classify(envelope, &decision) else {
            debug!(envelope = ?envelope, "rejected envelope");
            return Ok(match decision.into_rejection() {
                Some(reason) => PipelineOutcome::Rejected { reason },
                None => PipelineOutcome::Unrecognized {
                    message_type: envelope.message_type.to_string(),
                },
            });
        };

        let outcome = self.dispatch(classification).await?;
        debug!(envelope = ?envelope, "finished processing envelope");
        Ok(outcome)
    }

    fn check_topic(&self, envelope: &Envelope, decision: &mut PipelineDecision) {
        if !self.settings.restrict_by_topic {
            return;
        }
        let actual = envelope.topic_arn.as_deref().unwrap_or_default();
        if actual != self.settings.allowed_topic_arn {
            decision.reject(Rejection::TopicNotAllowed {
                expected: self.settings.allowed_topic_arn.clone(),
                actual: actual.to_string(),
            });
        }
    }

    async fn dispatch(
        &self,
        classification: Classification,
    ) -> Result<PipelineOutcome, BridgeError> {
        match classification {
            Classification::Handshake { subscribe_url } => {
                let Some(url) = subscribe_url.filter(|u| !u.is_empty()) else {
                    warn!("subscription confirmation without SubscribeURL");
                    return Ok(PipelineOutcome::HandshakeDispatched { confirmed: false });
                };
                info!(subscribe_url = %url, "subscription confirmation received");
                self.confirmer.confirm(&url).await;
                Ok(PipelineOutcome::HandshakeDispatched { confirmed: true })
            }

            Classification::ScheduledProbe(probe) => {
                let record = HeartbeatRecord::from_probe(
                    &probe,
                    self.time_source.epoch_seconds(),
                    &self.settings.heartbeat_source,
                );
                info!(resource = %record.resource, "scheduled probe received");
                // A missing heartbeat file is not fatal; Nagios notices the stale file.
                let written = self.heartbeats.append(&record).await.is_ok();
                Ok(PipelineOutcome::HeartbeatRecorded { record, written })
            }

            Classification::AlarmNotification(payload) => {
                let command = translate(&payload, self.time_source.epoch_seconds());
                info!(
                    host = %command.host_label,
                    service = %command.service_label,
                    status = command.status.code(),
                    line = %command,
                    "nagios command built"
                );

                // Dry run never opens the pipe, so it also works on hosts
                // without a Nagios install.
                if !self.settings.write_to_nagios {
                    info!("dry run: command NOT written");
                    return Ok(PipelineOutcome::CommandLogged { command });
                }

                self.commands.submit(&command).await?;
                Ok(PipelineOutcome::CommandSubmitted { command })
            }

            Classification::Unrecognized(message_type) => {
                info!(message_type = %message_type, "envelope type not handled");
                Ok(PipelineOutcome::Unrecognized {
                    message_type: message_type.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl EnvelopeProcessingApi for BridgePipeline {
    async fn process(&self, body: &str) -> Result<PipelineOutcome, BridgeError> {
        if body.trim().is_empty() {
            warn!("no POST data");
            return Err(BridgeError::EmptyBody);
        }

        let envelope = Envelope::from_json(body).map_err(|e| {
            warn!(error = %e, "body is not a JSON envelope");
            BridgeError::MalformedEnvelope(e.to_string())
        })?;

        let span = info_span!(
            "sns_envelope",
            message_id = envelope.message_id_or_default(),
            message_type = %envelope.message_type,
            topic = envelope.topic_arn.as_deref().unwrap_or_default(),
        );

        self.process_envelope(&envelope).instrument(span).await
    }
}

// =============================================================================
// TESTS
// =============================================================================
