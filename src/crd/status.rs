//! # Issuer Status
//!
//! Status types shared by both issuer kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition type signalling whether an issuer can sign
pub const CONDITION_TYPE_READY: &str = "Ready";

/// Observed status of an issuer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuerStatus {
    /// Conditions represent the latest available observations.
    /// At most one condition exists per type.
    #[serde(default)]
    pub conditions: Vec<IssuerCondition>,
}

impl IssuerStatus {
    /// Condition of the given type, if present
    #[must_use]
    pub fn condition(&self, condition_type: &str) -> Option<&IssuerCondition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }

    /// The `Ready` condition, if present
    #[must_use]
    pub fn ready_condition(&self) -> Option<&IssuerCondition> {
        self.condition(CONDITION_TYPE_READY)
    }
}

/// A single status condition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuerCondition {
    /// Type of condition
    #[serde(rename = "type")]
    pub condition_type: String,
    /// Status of the condition
    pub status: ConditionStatus,
    /// Machine-readable reason for the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable message with details about the last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last time the status value changed (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// Status of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
