//! What one envelope produced.

use alarm_translation::{HeartbeatRecord, MonitoringCommand};
use bridge_types::Rejection;
use serde::Serialize;

/// Result of running one envelope through the pipeline.
///
/// Serialized as the HTTP response body, tagged by `outcome`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// A validation step failed; nothing was dispatched.
    Rejected { reason: Rejection },
    /// Subscription handshake handed to the confirmer.
    HandshakeDispatched { confirmed: bool },
    /// Scheduled probe recorded; `written` is false if the file could not be opened.
    HeartbeatRecorded {
        record: HeartbeatRecord,
        written: bool,
    },
    /// Command written to the command pipe.
    CommandSubmitted { command: MonitoringCommand },
    /// Dry run: command built and logged, NOT written.
    CommandLogged { command: MonitoringCommand },
    /// Envelope type the bridge does not act on.
    Unrecognized { message_type: String },
}

impl PipelineOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, PipelineOutcome::Rejected { .. })
    }

    /// The command, if one was built.
    pub fn command(&self) -> Option<&MonitoringCommand> {
        match self {
            PipelineOutcome::CommandSubmitted { command }
            | PipelineOutcome::CommandLogged { command } => Some(command),
            _ => None,
        }
    }
}
