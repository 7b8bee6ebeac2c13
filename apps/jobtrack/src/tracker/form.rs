use chrono::NaiveDate;

use crate::errors::ClientError;
use crate::models::{ApplicationStatus, NewApplication};

/// The "add application" form as the user filled it in.
///
/// Fields are raw text; `submission` resolves them into a `NewApplication`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub company: String,
    pub role: String,
    pub status: ApplicationStatus,
    /// `YYYY-MM-DD`, or blank for today.
    pub date_applied: String,
    pub notes: String,
}

impl ApplicationForm {
    /// Builds the POST body. Company and role are required; a blank date
    /// becomes `today`.
    pub fn submission(&self, today: NaiveDate) -> Result<NewApplication, ClientError> {
        let company = self.company.trim();
        let role = self.role.trim();

        if company.is_empty() {
            return Err(ClientError::Validation("company is required".to_string()));
        }
        if role.is_empty() {
            return Err(ClientError::Validation("role is required".to_string()));
        }

        let date_applied = match self.date_applied.trim() {
            "" => today,
            raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ClientError::Validation(format!("date_applied '{raw}' is not YYYY-MM-DD"))
            })?,
        };

        Ok(NewApplication {
            company: company.to_string(),
            role: role.to_string(),
            status: self.status.clone(),
            date_applied,
            notes: self.notes.clone(),
        })
    }

    /// Resets every field, status back to its default.
    pub fn clear(&mut self) {
        *self = ApplicationForm::default();
    }
}
