//! Scope value object
//!
//! One in/out-of-scope asset entry as published by a platform. Immutable
//! after construction. Two notions of equality matter here:
//!
//! - structural equality (`PartialEq`) over `(value, kind, is_in_scope)`,
//!   used for exact-state comparison;
//! - identity (`ScopeKey`, `(value, kind)`), used by the diff engine. A
//!   flipped in/out status keeps the same identity and is reported as a
//!   status change, never as a removal plus an addition.

use crate::model::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize};

/// Identity key for diffing: `(value, kind)`, in/out status excluded
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeKey {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single scope entry: asset value, platform-reported category, in/out flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    value: String,
    #[serde(rename = "type")]
    kind: String,
    is_in_scope: bool,
}

impl Scope {
    /// Construct a scope entry, rejecting empty `value` or `kind`
    pub fn new(
        value: impl Into<String>,
        kind: impl Into<String>,
        is_in_scope: bool,
    ) -> ValidationResult<Self> {
        let value = value.into();
        let kind = kind.into();

        if value.trim().is_empty() {
            return Err(ValidationError::MissingScopeField { field: "value" });
        }
        if kind.trim().is_empty() {
            return Err(ValidationError::MissingScopeField { field: "type" });
        }

        Ok(Self {
            value,
            kind,
            is_in_scope,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn in_scope(&self) -> bool {
        self.is_in_scope
    }

    pub fn out_of_scope(&self) -> bool {
        !self.is_in_scope
    }

    /// Identity key used by the diff engine
    pub fn key(&self) -> ScopeKey {
        ScopeKey {
            value: self.value.clone(),
            kind: self.kind.clone(),
        }
    }

    /// True when `other` shares this scope's identity, regardless of status
    pub fn same_identity(&self, other: &Scope) -> bool {
        self.value == other.value && self.kind == other.kind
    }
}

/// Wire shape tolerated at the deserialization boundary
///
/// Vendor payloads disagree on the flag key: current feeds use
/// `is_in_scope`, legacy ones `in_scope`. The ambiguity is resolved here,
/// once, and never propagates further.
#[derive(Deserialize)]
struct RawScope {
    value: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    is_in_scope: Option<bool>,
    in_scope: Option<bool>,
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawScope::deserialize(deserializer)?;
        let value = raw.value.unwrap_or_default();
        let kind = raw.kind.unwrap_or_default();
        // is_in_scope wins when both keys are present; default is in-scope
        let is_in_scope = raw.is_in_scope.or(raw.in_scope).unwrap_or(true);

        Scope::new(value, kind, is_in_scope).map_err(serde::de::Error::custom)
    }
}
