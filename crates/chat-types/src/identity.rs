use std::fmt;
use serde::{Deserialize, Serialize};

/// The locally chosen display name that scopes a transcript and session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Trim the raw input; returns `None` for blank names.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
