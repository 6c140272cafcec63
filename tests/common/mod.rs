//! Common test utilities
//!
//! Recording fakes for the reconciler's four seams and issuer builders.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_pca_issuer_controller::controller::events::EventPublisher;
use aws_pca_issuer_controller::controller::reconciler::{
    GenericIssuerReconciler, ReconcilerSettings, StatusWriter,
};
use aws_pca_issuer_controller::crd::{
    AWSPCAClusterIssuer, AWSPCAIssuer, AwsPcaIssuerSpec, ConditionStatus, IssuerCondition,
    IssuerRef, IssuerStatus, CONDITION_TYPE_READY,
};
use aws_pca_issuer_controller::provider::{
    CallerIdentity, ConfigResolver, IdentityProber, ProbeError, ResolutionError, ResolvedConfig,
};
use k8s_openapi::api::core::v1::ObjectReference;
use kube::runtime::events::EventType;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_ARN: &str =
    "arn:aws:acm-pca:us-east-1:111111111111:certificate-authority/11111111-2222-3333-4444-555555555555";

/// How the fake resolver answers
#[derive(Debug, Clone)]
pub enum ResolveBehavior {
    Succeed,
    Fail(String),
    Hang,
}

#[derive(Debug)]
pub struct FakeResolver {
    behavior: Mutex<ResolveBehavior>,
    calls: Mutex<Vec<(IssuerRef, AwsPcaIssuerSpec)>>,
}

impl FakeResolver {
    pub fn new(behavior: ResolveBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_behavior(&self, behavior: ResolveBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> Vec<(IssuerRef, AwsPcaIssuerSpec)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigResolver for FakeResolver {
    async fn resolve(
        &self,
        issuer: &IssuerRef,
        spec: &AwsPcaIssuerSpec,
    ) -> Result<ResolvedConfig, ResolutionError> {
        self.calls
            .lock()
            .unwrap()
            .push((issuer.clone(), spec.clone()));
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            ResolveBehavior::Succeed => {
                let region = spec
                    .region
                    .clone()
                    .unwrap_or_else(|| "us-east-1".to_string());
                Ok(ResolvedConfig::new(
                    SdkConfig::builder().region(Region::new(region)).build(),
                ))
            }
            ResolveBehavior::Fail(message) => Err(ResolutionError::Other(anyhow::anyhow!(message))),
            ResolveBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ResolutionError::Other(anyhow::anyhow!("woke up")))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeProber {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeProber {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProber for FakeProber {
    async fn probe(&self, _config: &ResolvedConfig) -> Result<CallerIdentity, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ProbeError(anyhow::anyhow!("AccessDenied")));
        }
        Ok(CallerIdentity {
            arn: Some("arn:aws:sts::111111111111:assumed-role/pca-issuer/session".to_string()),
            account: Some("111111111111".to_string()),
            user_id: Some("AROAEXAMPLE:session".to_string()),
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingStatusWriter {
    fail: bool,
    writes: Mutex<Vec<(IssuerRef, IssuerStatus)>>,
}

impl RecordingStatusWriter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<(IssuerRef, IssuerStatus)> {
        self.writes.lock().unwrap().clone()
    }

    /// Ready condition of the most recent write
    pub fn last_ready(&self) -> Option<IssuerCondition> {
        self.writes
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, status)| status.ready_condition().cloned())
    }
}

#[async_trait]
impl StatusWriter for RecordingStatusWriter {
    async fn replace_status(&self, issuer: &IssuerRef, status: &IssuerStatus) -> anyhow::Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((issuer.clone(), status.clone()));
        if self.fail {
            anyhow::bail!("the object has been modified; please apply your changes to the latest version");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub object_name: Option<String>,
    pub warning: bool,
    pub reason: String,
    pub action: String,
    pub note: Option<String>,
}

#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingEventPublisher {
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(
        &self,
        resource_ref: &ObjectReference,
        type_: EventType,
        reason: &str,
        action: &str,
        note: Option<String>,
    ) {
        self.events.lock().unwrap().push(RecordedEvent {
            object_name: resource_ref.name.clone(),
            warning: matches!(type_, EventType::Warning),
            reason: reason.to_string(),
            action: action.to_string(),
            note,
        });
    }
}

/// Reconciler wired to recording fakes
pub struct Harness {
    pub resolver: Arc<FakeResolver>,
    pub prober: Arc<FakeProber>,
    pub status: Arc<RecordingStatusWriter>,
    pub events: Arc<RecordingEventPublisher>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            resolver: Arc::new(FakeResolver::new(ResolveBehavior::Succeed)),
            prober: Arc::new(FakeProber::default()),
            status: Arc::new(RecordingStatusWriter::default()),
            events: Arc::new(RecordingEventPublisher::default()),
        }
    }
}

impl Harness {
    pub fn with_resolver(mut self, behavior: ResolveBehavior) -> Self {
        self.resolver = Arc::new(FakeResolver::new(behavior));
        self
    }

    pub fn with_failing_prober(mut self) -> Self {
        self.prober = Arc::new(FakeProber::failing());
        self
    }

    pub fn with_failing_status_writer(mut self) -> Self {
        self.status = Arc::new(RecordingStatusWriter::failing());
        self
    }

    pub fn reconciler(&self, settings: ReconcilerSettings) -> GenericIssuerReconciler {
        GenericIssuerReconciler::new(
            self.resolver.clone(),
            self.prober.clone(),
            self.status.clone(),
            self.events.clone(),
            settings,
        )
    }
}

pub fn settings(default_region: Option<&str>, get_caller_identity: bool) -> ReconcilerSettings {
    ReconcilerSettings {
        default_region: default_region.map(str::to_string),
        get_caller_identity,
    }
}

pub fn spec(arn: &str, region: Option<&str>) -> AwsPcaIssuerSpec {
    AwsPcaIssuerSpec {
        arn: arn.to_string(),
        region: region.map(str::to_string),
        ..Default::default()
    }
}

pub fn issuer(name: &str, namespace: &str, spec: AwsPcaIssuerSpec) -> AWSPCAIssuer {
    let mut issuer = AWSPCAIssuer::new(name, spec);
    issuer.metadata.namespace = Some(namespace.to_string());
    issuer
}

pub fn cluster_issuer(name: &str, spec: AwsPcaIssuerSpec) -> AWSPCAClusterIssuer {
    AWSPCAClusterIssuer::new(name, spec.into())
}

/// Status holding a single Ready condition
pub fn ready_status(
    status: ConditionStatus,
    reason: &str,
    message: &str,
    last_transition_time: &str,
) -> IssuerStatus {
    IssuerStatus {
        conditions: vec![IssuerCondition {
            condition_type: CONDITION_TYPE_READY.to_string(),
            status,
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
            last_transition_time: Some(last_transition_time.to_string()),
        }],
    }
}
