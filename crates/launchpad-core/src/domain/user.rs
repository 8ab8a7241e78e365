//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use launchpad_shared::utils::normalize_email;

/// Platform role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Applicant,
    Admin,
    Founder,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Applicant => "applicant",
            UserRole::Admin => "admin",
            UserRole::Founder => "founder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "applicant" => Some(UserRole::Applicant),
            "admin" => Some(UserRole::Admin),
            "founder" => Some(UserRole::Founder),
            _ => None,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Applicant
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    pub role: UserRole,

    #[validate(length(min = 2, max = 100, message = "Company name must be between 2 and 100 characters"))]
    pub company_name: Option<String>,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user. Founders must name their company.
    pub fn new(
        name: String,
        email: String,
        role: UserRole,
        company_name: Option<String>,
        password_hash: String,
    ) -> Result<Self, ValidationErrors> {
        let user = Self {
            id: Uuid::new_v4(),
            email: normalize_email(&email),
            name: name.trim().to_string(),
            role,
            company_name: company_name
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            password_hash,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            modified_at: None,
        };

        let mut errors = match user.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(e) => e,
        };
        if user.role == UserRole::Founder && user.company_name.is_none() {
            errors.add(
                "company_name",
                ValidationError::new("required").with_message("Founders must provide a company name".into()),
            );
        }

        if errors.is_empty() {
            Ok(user)
        } else {
            Err(errors)
        }
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.modified_at = Some(now);
    }
}
