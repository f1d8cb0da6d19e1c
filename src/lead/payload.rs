//! Lead submission payload sent to the capture endpoint

use crate::state::LeadDraft;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// JSON body of `POST /api/submit-lead`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub zip_code: String,
    pub age_range: String,
    pub name: String,
    /// Ten digits, no formatting
    pub phone: String,
    /// ISO-8601 UTC timestamp with millisecond precision
    pub submitted_at: String,
    pub user_agent: String,
    pub page_url: String,
}

impl LeadSubmission {
    /// Build the payload from a validated draft
    pub fn from_draft(
        draft: &LeadDraft,
        submitted_at: DateTime<Utc>,
        user_agent: &str,
        page_url: &str,
    ) -> Self {
        Self {
            zip_code: draft.zip_code.clone(),
            age_range: draft.age_range.clone(),
            name: draft.name.clone(),
            phone: draft.phone_digits(),
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent: user_agent.to_string(),
            page_url: page_url.to_string(),
        }
    }

    /// First three digits of the ZIP, safe to log
    pub fn zip3(&self) -> &str {
        self.zip_code.get(..3).unwrap_or(&self.zip_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_draft() -> LeadDraft {
        LeadDraft {
            zip_code: "90210".to_string(),
            age_range: "46-50".to_string(),
            name: "Jose Perez".to_string(),
            phone: "(555) 123-4567".to_string(),
        }
    }

    #[test]
    fn test_from_draft_strips_phone_mask() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 15, 4, 5).unwrap();
        let lead = LeadSubmission::from_draft(&sample_draft(), at, "agent/1.0", "http://x/");

        assert_eq!(
            lead,
            LeadSubmission {
                zip_code: "90210".to_string(),
                age_range: "46-50".to_string(),
                name: "Jose Perez".to_string(),
                phone: "5551234567".to_string(),
                submitted_at: "2026-10-19T15:04:05.000Z".to_string(),
                user_agent: "agent/1.0".to_string(),
                page_url: "http://x/".to_string(),
            }
        );
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let lead = LeadSubmission::from_draft(&sample_draft(), at, "ua", "url");
        let value = serde_json::to_value(&lead).unwrap();

        assert_eq!(value["zipCode"], "90210");
        assert_eq!(value["ageRange"], "46-50");
        assert_eq!(value["phone"], "5551234567");
        assert_eq!(value["submittedAt"], "2026-01-02T03:04:05.000Z");
        assert_eq!(value["userAgent"], "ua");
        assert_eq!(value["pageUrl"], "url");
        assert_eq!(value.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_zip3() {
        let at = Utc::now();
        let lead = LeadSubmission::from_draft(&sample_draft(), at, "ua", "url");
        assert_eq!(lead.zip3(), "902");
    }
}
