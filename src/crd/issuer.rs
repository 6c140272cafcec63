//! # Generic Issuer
//!
//! Capability trait over the namespaced and cluster-scoped issuer kinds.
//! Reconciliation is written once against [`GenericIssuer`].

use crate::crd::{AWSPCAClusterIssuer, AWSPCAIssuer, AwsPcaIssuerSpec, IssuerStatus};
use k8s_openapi::api::core::v1::ObjectReference;
use kube::{Resource, ResourceExt};
use std::fmt;

/// Which issuer kind a resource is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssuerKind {
    /// Namespaced `AWSPCAIssuer`
    Issuer,
    /// Cluster-scoped `AWSPCAClusterIssuer`
    ClusterIssuer,
}

impl IssuerKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuerKind::Issuer => "AWSPCAIssuer",
            IssuerKind::ClusterIssuer => "AWSPCAClusterIssuer",
        }
    }
}

impl fmt::Display for IssuerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an issuer resource, enough to address its status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuerRef {
    pub kind: IssuerKind,
    pub name: String,
    pub namespace: Option<String>,
}

impl fmt::Display for IssuerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Operations shared by `AWSPCAIssuer` and `AWSPCAClusterIssuer`
pub trait GenericIssuer:
    Resource<DynamicType = ()> + Clone + fmt::Debug + Send + Sync + 'static
{
    const KIND: IssuerKind;

    /// The issuer spec, identical for both kinds
    fn issuer_spec(&self) -> &AwsPcaIssuerSpec;

    fn issuer_status(&self) -> Option<&IssuerStatus>;

    /// Status, created empty if the resource has none yet
    fn issuer_status_mut(&mut self) -> &mut IssuerStatus;

    fn issuer_ref(&self) -> IssuerRef {
        IssuerRef {
            kind: Self::KIND,
            name: self.name_any(),
            namespace: self.namespace(),
        }
    }

    /// Object reference used as the event subject
    fn object_reference(&self) -> ObjectReference {
        self.object_ref(&())
    }
}

impl GenericIssuer for AWSPCAIssuer {
    const KIND: IssuerKind = IssuerKind::Issuer;

    fn issuer_spec(&self) -> &AwsPcaIssuerSpec {
        &self.spec
    }

    fn issuer_status(&self) -> Option<&IssuerStatus> {
        self.status.as_ref()
    }

    fn issuer_status_mut(&mut self) -> &mut IssuerStatus {
        self.status.get_or_insert_with(IssuerStatus::default)
    }
}

impl GenericIssuer for AWSPCAClusterIssuer {
    const KIND: IssuerKind = IssuerKind::ClusterIssuer;

    fn issuer_spec(&self) -> &AwsPcaIssuerSpec {
        &self.spec.issuer
    }

    fn issuer_status(&self) -> Option<&IssuerStatus> {
        self.status.as_ref()
    }

    fn issuer_status_mut(&mut self) -> &mut IssuerStatus {
        self.status.get_or_insert_with(IssuerStatus::default)
    }
}
