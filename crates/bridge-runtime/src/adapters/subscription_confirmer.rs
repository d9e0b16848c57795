//! # HTTP Subscription Confirmer
//!
//! Completes a subscription handshake by requesting `SubscribeURL`. One
//! attempt, short connect timeout, result only logged.

use crate::ports::outbound::SubscriptionConfirmer;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

/// reqwest-backed `SubscriptionConfirmer`.
#[derive(Debug, Clone)]
pub struct HttpSubscriptionConfirmer {
    client: reqwest::Client,
}

impl HttpSubscriptionConfirmer {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SubscriptionConfirmer for HttpSubscriptionConfirmer {
    async fn confirm(&self, subscribe_url: &str) {
        match self.client.get(subscribe_url).send().await {
            Ok(response) => info!(
                status = response.status().as_u16(),
                "subscription confirmation requested"
            ),
            Err(e) => warn!(error = %e, "subscription confirmation request failed"),
        }
    }
}
