use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::VersionBump;

/// Richer decider result: a level plus an explanation and custom fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpDetails {
    pub level: Option<u8>,
    pub reason: Option<String>,
    /// Custom fields, flattened into the serialized recommendation
    pub extra: BTreeMap<String, Value>,
}

impl BumpDetails {
    pub fn with_level(level: u8) -> Self {
        BumpDetails {
            level: Some(level),
            ..Default::default()
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// What a bump decider may return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// Bare level: 0 = major, 1 = minor, 2 = patch
    Level(u8),
    Detailed(BumpDetails),
}

impl From<VersionBump> for BumpOutcome {
    fn from(bump: VersionBump) -> Self {
        BumpOutcome::Level(bump.level())
    }
}

impl From<BumpDetails> for BumpOutcome {
    fn from(details: BumpDetails) -> Self {
        BumpOutcome::Detailed(details)
    }
}

/// Normalized bump recommendation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(rename = "releaseAs", skip_serializing_if = "Option::is_none")]
    pub release_as: Option<VersionBump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Recommendation {
    /// Normalize whatever a decider returned.
    ///
    /// A bare level is wrapped, nothing becomes an empty recommendation, and a
    /// set level is mapped to its release type. Levels outside 0..=2 are kept
    /// but have no release type.
    pub fn normalize(outcome: Option<BumpOutcome>) -> Self {
        let details = match outcome {
            None => BumpDetails::default(),
            Some(BumpOutcome::Level(level)) => BumpDetails::with_level(level),
            Some(BumpOutcome::Detailed(details)) => details,
        };

        Recommendation {
            level: details.level,
            release_as: details.level.and_then(VersionBump::from_level),
            reason: details.reason,
            extra: details.extra,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.reason.is_none() && self.extra.is_empty()
    }
}
