use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned project identifier. Keys one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A project with typed timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Generated document body, if any
    pub prd: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Project as it arrives on the wire. Dates are plain strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prd: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<String>,
}

impl ProjectRecord {
    /// Convert to a `Project`. Never fails: an unparsable `created_at`
    /// becomes "now" and an unparsable `updated_at` becomes `None`.
    pub fn into_project(self) -> Project {
        let created_at = match self.created_at.as_deref() {
            Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
                log::warn!("Project {}: invalid created_at {:?}, using now", self.id, raw);
                Utc::now()
            }),
            None => Utc::now(),
        };
        let updated_at = self.updated_at.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                log::warn!("Project {}: invalid updated_at {:?}, dropping it", self.id, raw);
            }
            parsed
        });

        Project {
            id: ProjectId(self.id),
            name: self.name,
            prd: self.prd,
            created_at,
            updated_at,
        }
    }
}

/// Parse an ISO-like timestamp. Accepts RFC 3339 and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (interpreted as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Body of `POST /api/projects`
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd: Option<String>,
}

/// Body of `PUT /api/projects/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prd: Option<String>,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
