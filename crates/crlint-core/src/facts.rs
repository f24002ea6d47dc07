//! Change-request facts: the read-only input of one evaluation run.
//!
//! The host runtime materializes these once per change-request update. All
//! optional inputs have a well-defined "absent" state so the checks never
//! have to fail on missing data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CrlintError, Result};

/// Number of changed files reported by the host.
///
/// Hosts send this either as a JSON number or as a string (GitLab caps large
/// diffs at `"1000+"`). Strings are parsed by their leading integer; anything
/// unparsable or negative is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChangeCount(u64);

impl ChangeCount {
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parse a textual count by its leading integer, e.g. `" 42 files"` -> 42.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..digits_end];
        if digits.is_empty() || negative {
            return Self(0);
        }
        // Saturate instead of failing on absurdly long digit runs.
        Self(digits.parse::<u64>().unwrap_or(u64::MAX))
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Self(v)
                } else if let Some(v) = n.as_f64() {
                    if v.is_finite() && v > 0.0 {
                        Self(v.trunc() as u64)
                    } else {
                        Self(0)
                    }
                } else {
                    Self(0)
                }
            }
            Value::String(s) => Self::parse_lenient(s),
            _ => Self(0),
        }
    }
}

impl<'de> Deserialize<'de> for ChangeCount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl std::fmt::Display for ChangeCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the change-request assignee.
///
/// Hosts disagree on the shape (GitLab user objects, GitHub `login` objects,
/// bare ids), so anything that is not a username string or a `username`
/// object is kept as raw JSON. Only presence matters to the checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Username(String),
    User {
        username: String,
        #[serde(default)]
        name: Option<String>,
    },
    Other(Value),
}

impl Identity {
    /// Whether this identity names anyone. Empty usernames and JSON null do not.
    pub fn is_present(&self) -> bool {
        match self {
            Identity::Username(username) | Identity::User { username, .. } => {
                !username.is_empty()
            }
            Identity::Other(value) => !value.is_null(),
        }
    }
}

/// Change-request metadata consumed by the metadata checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub assignee: Option<Identity>,

    #[serde(default, alias = "changedFileCount", alias = "changesCount")]
    pub changes_count: ChangeCount,
}

impl ChangeRequest {
    /// Description text, with absence treated as the empty string.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Whether someone is assigned.
    pub fn is_assigned(&self) -> bool {
        self.assignee.as_ref().is_some_and(Identity::is_present)
    }
}

/// A single commit of the change request. Only the title is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub title: String,
}

impl Commit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Paths touched by the change request.
///
/// Paths are opaque strings: no normalization, matched by exact value or
/// suffix only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    #[serde(default)]
    pub modified: Vec<String>,

    #[serde(default)]
    pub created: Vec<String>,
}

impl FileChanges {
    pub fn is_modified(&self, path: &str) -> bool {
        self.modified.iter().any(|p| p == path)
    }
}

/// Everything one evaluation run reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeFacts {
    #[serde(default, alias = "changeRequest", alias = "mr")]
    pub change_request: ChangeRequest,

    #[serde(default)]
    pub commits: Vec<Commit>,

    #[serde(default, alias = "fileChanges", alias = "git")]
    pub files: FileChanges,
}

impl ChangeFacts {
    /// Parse a facts document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CrlintError::InvalidFacts(e.to_string()))
    }
}
