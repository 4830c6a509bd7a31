use serde::{Deserialize, Serialize};
use std::fmt;

/// Indexed by bump level: 0 = major, 1 = minor, 2 = patch.
const VERSIONS: [VersionBump; 3] = [VersionBump::Major, VersionBump::Minor, VersionBump::Patch];

/// Type of semantic version bump to release as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Map a numeric bump level to a bump type, `None` when out of range
    pub fn from_level(level: u8) -> Option<Self> {
        VERSIONS.get(usize::from(level)).copied()
    }

    /// Numeric level of this bump (0 = major, 1 = minor, 2 = patch)
    pub fn level(self) -> u8 {
        match self {
            VersionBump::Major => 0,
            VersionBump::Minor => 1,
            VersionBump::Patch => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
