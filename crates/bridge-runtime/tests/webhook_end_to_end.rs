//! Full webhook flow over real sockets: signed envelopes in, Nagios command
//! pipe and heartbeat file out. The signing certificate and the subscription
//! confirmation endpoint are served in-process on 127.0.0.1.

use axum::{extract::Query, routing::get, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_runtime::{build_router, BridgeConfig, BridgePipeline};
use bridge_types::{Envelope, MessageType};
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde_json::Value;
use sha1::Sha1;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const SIGNING_CERT: &str = include_str!("../../sns-verification/tests/fixtures/signing_cert.pem");
const SIGNING_KEY: &str = include_str!("../../sns-verification/tests/fixtures/signing_key.pem");
const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:cloudwatch-alarms";

// =============================================================================
// Provider stand-in
// =============================================================================

/// Serves the signing certificate and records confirmation requests.
struct Provider {
    addr: SocketAddr,
    cert_fetches: Arc<AtomicUsize>,
    confirmations: Arc<Mutex<Vec<String>>>,
}

impl Provider {
    async fn start() -> Self {
        let cert_fetches = Arc::new(AtomicUsize::new(0));
        let confirmations: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let fetches = Arc::clone(&cert_fetches);
        let confirmed = Arc::clone(&confirmations);
        let router = Router::new()
            .route(
                "/SimpleNotificationService-test.pem",
                get(move || {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    async { SIGNING_CERT }
                }),
            )
            .route(
                "/confirm",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    confirmed
                        .lock()
                        .unwrap()
                        .push(params.get("Token").cloned().unwrap_or_default());
                    async { "<ConfirmSubscriptionResponse/>" }
                }),
            );

        Self {
            addr: spawn(router).await,
            cert_fetches,
            confirmations,
        }
    }

    fn cert_url(&self) -> String {
        format!("http://{}/SimpleNotificationService-test.pem", self.addr)
    }
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

fn sign(envelope: &mut Envelope) {
    let key = RsaPrivateKey::from_pkcs8_pem(SIGNING_KEY).unwrap();
    let canonical = sns_verification::canonical_string(envelope);
    let signature = SigningKey::<Sha1>::new(key).sign(canonical.as_bytes());
    envelope.signature_version = Some("1".into());
    envelope.signature = Some(STANDARD.encode(signature.to_vec()));
}

fn alarm_notification(provider: &Provider, message: &str) -> Envelope {
    let mut envelope = Envelope {
        message_type: MessageType::Notification,
        message_id: Some("a1b2c3d4-0000-5000-8000-000000000001".into()),
        topic_arn: Some(TOPIC.into()),
        subject: Some("ALARM: \"www-example-com HTTP 5xx\" in US East".into()),
        message: Some(message.into()),
        timestamp: Some("2024-03-01T10:00:01.000Z".into()),
        signing_cert_url: Some(provider.cert_url()),
        ..Default::default()
    };
    envelope.signature_version = Some("1".into());
    sign(&mut envelope);
    envelope
}

const ALARM: &str = r#"{"AlarmName":"www-example-com HTTP 5xx","AlarmDescription":"5xx from ELB",
    "NewStateValue":"ALARM","NewStateReason":"Threshold Crossed: 1 datapoint [12.0] was greater than 10.0",
    "StateChangeTime":"2024-03-01T10:00:00.000+0000",
    "Trigger":{"MetricName":"HTTPCode_ELB_5XX_Count","Namespace":"AWS/ApplicationELB",
               "Dimensions":[{"name":"LoadBalancer","value":"app/www-lb/50dc6c495c0c9188"}]}}"#;

// =============================================================================
// Bridge under test
// =============================================================================

struct Bridge {
    addr: SocketAddr,
    pipe: PathBuf,
    heartbeat_dir: PathBuf,
    _dir: TempDir,
}

impl Bridge {
    async fn start(configure: impl FnOnce(&mut BridgeConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let pipe = dir.path().join("nagios.cmd");
        std::fs::write(&pipe, "").unwrap();
        let heartbeat_dir = dir.path().join("sns");
        std::fs::create_dir(&heartbeat_dir).unwrap();

        let mut config = BridgeConfig::default();
        config.verification.allowed_source_domain = "127.0.0.1".into();
        config.verification.require_https = false;
        config.nagios.command_pipe = pipe.clone();
        config.heartbeat.directory = heartbeat_dir.clone();
        configure(&mut config);

        let pipeline = BridgePipeline::from_config(&config).unwrap();
        let addr = spawn(build_router(Arc::new(pipeline), &config)).await;

        Self {
            addr,
            pipe,
            heartbeat_dir,
            _dir: dir,
        }
    }

    async fn post(&self, body: String) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("http://{}/", self.addr))
            .header("content-type", "text/plain; charset=UTF-8")
            .header("x-amz-sns-message-type", "Notification")
            .body(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        let text = response.text().await.unwrap();
        (status, serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    fn pipe_contents(&self) -> String {
        std::fs::read_to_string(&self.pipe).unwrap()
    }

    fn heartbeat_lines(&self) -> Vec<String> {
        std::fs::read_dir(&self.heartbeat_dir)
            .unwrap()
            .flat_map(|entry| {
                let path = entry.unwrap().path();
                std::fs::read_to_string(path).unwrap()
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn to_body(envelope: &Envelope) -> String {
    serde_json::to_string(envelope).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_signed_alarm_is_written_to_command_pipe() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|_| {}).await;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, ALARM))).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "command_submitted");
    assert_eq!(json["command"]["status"], "CRITICAL");

    let written = bridge.pipe_contents();
    assert_eq!(written.lines().count(), 1);
    assert!(written.ends_with(
        "] PROCESS_SERVICE_CHECK_RESULT;www.example.com:app/www-lb/50dc6c495c0c9188;\
         HTTPCode_ELB_5XX_Count: www-example-com HTTP 5xx;2;\
         HTTP 5xx: Threshold Crossed: 1 datapoint [12.0] was greater than 10.0 \
         2024-03-01T10:00:00.000+0000\n"
    ));
    assert_eq!(provider.cert_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_tampered_alarm_is_dropped() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|_| {}).await;

    let mut envelope = alarm_notification(&provider, ALARM);
    envelope.message = Some(ALARM.replace("\"ALARM\"", "\"OK\""));

    let (status, json) = bridge.post(to_body(&envelope)).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["reason"]["kind"], "signature_invalid");
    assert!(bridge.pipe_contents().is_empty());
}

#[tokio::test]
async fn test_foreign_certificate_host_is_never_fetched() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|config| {
        config.verification.allowed_source_domain = "sns.us-east-1.amazonaws.com".into();
        config.response.distinguish_rejections = true;
    })
    .await;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, ALARM))).await;

    assert_eq!(status, 403);
    assert_eq!(json["reason"]["kind"], "domain_mismatch");
    assert_eq!(json["reason"]["actual"], "127.0.0.1");
    assert_eq!(provider.cert_fetches.load(Ordering::SeqCst), 0);
    assert!(bridge.pipe_contents().is_empty());
}

#[tokio::test]
async fn test_scheduled_probe_writes_heartbeat_only() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|config| config.heartbeat.source = "edge-1".into()).await;

    let probe = r#"{"version":"0","id":"89d1a02d-5ec7-412e-82f5-13505f849b41",
        "detail-type":"Scheduled Event","source":"aws.events","account":"123456789012",
        "time":"2024-03-01T10:05:00Z","region":"us-east-1",
        "resources":["arn:aws:events:us-east-1:123456789012:rule/sns-heartbeat"],"detail":{}}"#;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, probe))).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "heartbeat_recorded");
    assert_eq!(json["written"], true);
    assert!(bridge.pipe_contents().is_empty());

    let lines = bridge.heartbeat_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(
        ",arn:aws:events:us-east-1:123456789012:rule/sns-heartbeat,\
         2024-03-01T10:05:00Z,Scheduled Event,edge-1"
    ));
}

#[tokio::test]
async fn test_subscription_confirmation_calls_subscribe_url() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|_| {}).await;

    let mut envelope = Envelope {
        message_type: MessageType::SubscriptionConfirmation,
        message_id: Some("165545c9-2a5c-472c-8df2-7ff2be2b3b1b".into()),
        token: Some("2336412f37fb687f5d51e6e241d09c805a5a57b30d712f794cc5f6a988666d92".into()),
        topic_arn: Some(TOPIC.into()),
        message: Some("You have chosen to subscribe to the topic.".into()),
        subscribe_url: Some(format!(
            "http://{}/confirm?Action=ConfirmSubscription&Token=2336412f37fb687f5d51e6e241d09c805a5a57b30d712f794cc5f6a988666d92",
            provider.addr
        )),
        timestamp: Some("2024-03-01T09:59:00.000Z".into()),
        signing_cert_url: Some(provider.cert_url()),
        ..Default::default()
    };
    sign(&mut envelope);

    let (status, json) = bridge.post(to_body(&envelope)).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "handshake_dispatched");
    assert_eq!(json["confirmed"], true);
    assert_eq!(
        provider.confirmations.lock().unwrap().as_slice(),
        ["2336412f37fb687f5d51e6e241d09c805a5a57b30d712f794cc5f6a988666d92".to_string()]
    );
}

#[tokio::test]
async fn test_missing_command_pipe_is_503() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|config| {
        config.nagios.command_pipe = PathBuf::from("/nonexistent/nagios/rw/nagios.cmd");
    })
    .await;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, ALARM))).await;

    assert_eq!(status, 503);
    assert_eq!(json["error"], "sink_unavailable");
}

#[tokio::test]
async fn test_dry_run_leaves_pipe_untouched() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|config| config.nagios.write_to_nagios = false).await;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, ALARM))).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "command_logged");
    assert!(bridge.pipe_contents().is_empty());
}

#[tokio::test]
async fn test_dry_run_without_command_pipe_still_succeeds() {
    let provider = Provider::start().await;
    let bridge = Bridge::start(|config| {
        config.nagios.write_to_nagios = false;
        config.nagios.command_pipe = PathBuf::from("/nonexistent/nagios/rw/nagios.cmd");
    })
    .await;

    let (status, json) = bridge.post(to_body(&alarm_notification(&provider, ALARM))).await;

    assert_eq!(status, 200);
    assert_eq!(json["outcome"], "command_logged");
}

#[tokio::test]
async fn test_empty_and_malformed_bodies_are_400() {
    let bridge = Bridge::start(|_| {}).await;

    let (status, json) = bridge.post(String::new()).await;
    assert_eq!(status, 400);
    assert_eq!(json["error"], "empty_body");

    let (status, json) = bridge.post("{\"Type\": ".to_string()).await;
    assert_eq!(status, 400);
    assert_eq!(json["error"], "malformed_envelope");
}
