//! Funding application submitted by an applicant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{ValidateEmail, ValidateUrl};

use launchpad_shared::constants::MIN_APPLICATION_DESCRIPTION_LENGTH;
use launchpad_shared::FormData;

use super::stage::FundingStage;
use crate::validation::FieldErrors;

/// Application review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewing" => Some(ApplicationStatus::Reviewing),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub form_data: FormData,

    // Review audit
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Application {
    /// Validate the form and create a `pending` application for `user_id`.
    pub fn submit(user_id: Uuid, form_data: &FormData) -> Result<Self, FieldErrors> {
        let form_data = validate_application_form(form_data)?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            form_data,
            reviewed_at: None,
            reviewed_by: None,
            modified_at: None,
        })
    }

    pub fn set_status(&mut self, status: ApplicationStatus, changed_by: Uuid) {
        let now = Utc::now();
        self.status = status;
        self.reviewed_at = Some(now);
        self.reviewed_by = Some(changed_by);
        self.modified_at = Some(now);
    }

    pub fn company_name(&self) -> Option<&str> {
        self.form_data.get("company_name").map(String::as_str)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

fn required<'a>(form: &'a FormData, field: &str, label: &str, errors: &mut FieldErrors) -> Option<&'a str> {
    match form.get(field).map(|v| v.as_str()) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            errors.add(field, format!("{} is required", label));
            None
        }
    }
}

const KNOWN_FIELDS: [&str; 7] = [
    "company_name",
    "founder_name",
    "email",
    "website",
    "funding_amount",
    "stage",
    "description",
];

/// Trim the known fields, drop the blank ones, and check them.
///
/// Unknown fields are kept verbatim so extra form steps can add inputs
/// without a server change.
pub fn validate_application_form(form: &FormData) -> Result<FormData, FieldErrors> {
    let form: FormData = form
        .iter()
        .filter_map(|(k, v)| {
            if KNOWN_FIELDS.contains(&k.as_str()) {
                let v = v.trim();
                (!v.is_empty()).then(|| (k.clone(), v.to_string()))
            } else {
                Some((k.clone(), v.clone()))
            }
        })
        .collect();

    let mut errors = FieldErrors::new();

    if let Some(company) = required(&form, "company_name", "Company name", &mut errors) {
        let len = company.chars().count();
        if !(2..=100).contains(&len) {
            errors.add("company_name", "Company name must be between 2 and 100 characters");
        }
    }

    required(&form, "founder_name", "Founder name", &mut errors);

    if let Some(email) = form.get("email") {
        if !email.validate_email() {
            errors.add("email", "Email address is invalid");
        }
    } else {
        errors.add("email", "Email is required");
    }

    if let Some(website) = form.get("website") {
        if !website.validate_url() {
            errors.add("website", "Website must be a valid URL");
        }
    }

    if let Some(amount) = required(&form, "funding_amount", "Funding amount", &mut errors) {
        match amount.replace([',', '_'], "").parse::<u64>() {
            Ok(0) => errors.add("funding_amount", "Funding amount must be greater than zero"),
            Ok(_) => {}
            Err(_) => errors.add("funding_amount", "Funding amount must be a whole number"),
        }
    }

    if let Some(stage) = required(&form, "stage", "Stage", &mut errors) {
        if FundingStage::from_str(stage).is_none() {
            let known: Vec<&str> = FundingStage::ALL.iter().map(|s| s.as_str()).collect();
            errors.add("stage", format!("Stage must be one of: {}", known.join(", ")));
        }
    }

    if let Some(description) = required(&form, "description", "Description", &mut errors) {
        if description.chars().count() < MIN_APPLICATION_DESCRIPTION_LENGTH {
            errors.add(
                "description",
                format!(
                    "Description must be at least {} characters",
                    MIN_APPLICATION_DESCRIPTION_LENGTH
                ),
            );
        }
    }

    errors.into_result().map(|()| form)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_form() -> FormData {
        [
            ("company_name", "Orbital Greens"),
            ("founder_name", "Mae Jemison"),
            ("email", "mae@orbitalgreens.io"),
            ("website", "https://orbitalgreens.io"),
            ("funding_amount", "250,000"),
            ("stage", "Seed"),
            (
                "description",
                "Vertical farms for low-orbit stations, with closed-loop water recycling.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_submit_valid_form_is_pending() {
        let user_id = Uuid::new_v4();
        let app = Application::submit(user_id, &valid_form()).unwrap();

        assert_eq!(app.status, ApplicationStatus::Pending);
        assert!(app.is_owned_by(user_id));
        assert_eq!(app.company_name(), Some("Orbital Greens"));
        assert!(app.reviewed_at.is_none());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate_application_form(&FormData::new()).unwrap_err();
        for field in ["company_name", "founder_name", "email", "funding_amount", "stage", "description"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("website"));
    }

    #[test]
    fn test_values_are_trimmed_and_blank_counts_as_missing() {
        let mut form = valid_form();
        form.insert("founder_name".to_string(), "   ".to_string());
        form.insert("company_name".to_string(), "  Orbital Greens  ".to_string());

        let errors = validate_application_form(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["founder_name"]);

        form.insert("founder_name".to_string(), "Mae".to_string());
        let cleaned = validate_application_form(&form).unwrap();
        assert_eq!(cleaned["company_name"], "Orbital Greens");
    }

    #[test]
    fn test_field_specific_rules() {
        let mut form = valid_form();
        form.insert("email".to_string(), "mae-at-orbital".to_string());
        form.insert("website".to_string(), "not a url".to_string());
        form.insert("funding_amount".to_string(), "0".to_string());
        form.insert("stage".to_string(), "ipo".to_string());
        form.insert("description".to_string(), "Too short".to_string());

        let errors = validate_application_form(&form).unwrap_err();
        for field in ["email", "website", "funding_amount", "stage", "description"] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("company_name"));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let mut form = valid_form();
        form.insert("team_size".to_string(), "4".to_string());
        let cleaned = validate_application_form(&form).unwrap();
        assert_eq!(cleaned.get("team_size").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_unknown_fields_are_not_trimmed_or_merged() {
        let mut form = valid_form();
        form.insert("pitch_deck".to_string(), "  deck.pdf ".to_string());
        form.insert(" pitch_deck".to_string(), "other.pdf".to_string());
        form.insert("referral".to_string(), String::new());

        let cleaned = validate_application_form(&form).unwrap();
        assert_eq!(cleaned["pitch_deck"], "  deck.pdf ");
        assert_eq!(cleaned[" pitch_deck"], "other.pdf");
        assert_eq!(cleaned.get("referral").map(String::as_str), Some(""));
    }

    #[test]
    fn test_set_status_records_reviewer() {
        let mut app = Application::submit(Uuid::new_v4(), &valid_form()).unwrap();
        let admin = Uuid::new_v4();
        app.set_status(ApplicationStatus::Reviewing, admin);

        assert_eq!(app.status, ApplicationStatus::Reviewing);
        assert_eq!(app.reviewed_by, Some(admin));
    }
}
