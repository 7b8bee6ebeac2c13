use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pipeline stage of a job application.
///
/// The backend stores status as free text (default `"Applied"`), so parsing
/// is case-insensitive and anything unrecognised is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Other(s) => s,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "applied" => ApplicationStatus::Applied,
            "interview" => ApplicationStatus::Interview,
            "offer" => ApplicationStatus::Offer,
            "rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Other(raw),
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(raw: &str) -> Self {
        ApplicationStatus::from(raw.to_string())
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job application as returned by the Application Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: i64,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub date_applied: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /applications/ body. `date_applied` is always resolved client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    pub date_applied: NaiveDate,
    pub notes: String,
}
