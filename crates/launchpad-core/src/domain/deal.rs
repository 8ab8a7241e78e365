// ============================================================================
// Launchpad Core - Deal Entity
// File: crates/launchpad-core/src/domain/deal.rs
// Description: Fundraising listing created by a founder or an admin
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::stage::FundingStage;

/// Deal review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Draft => "draft",
            DealStatus::Pending => "pending",
            DealStatus::Approved => "approved",
            DealStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(DealStatus::Draft),
            "pending" => Some(DealStatus::Pending),
            "approved" => Some(DealStatus::Approved),
            "rejected" => Some(DealStatus::Rejected),
            _ => None,
        }
    }
}

impl Default for DealStatus {
    fn default() -> Self {
        DealStatus::Draft
    }
}

/// Financial terms of the raise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_terms", skip_on_field_errors = false))]
pub struct DealTerms {
    #[validate(range(min = 1, message = "Target amount must be greater than zero"))]
    pub target_amount: u64,

    #[validate(range(min = 1, message = "Minimum investment must be greater than zero"))]
    pub minimum_investment: u64,

    #[validate(range(min = 1, message = "Valuation must be greater than zero"))]
    pub valuation: u64,

    /// Percent of the company offered, 0 < x <= 100
    #[validate(range(exclusive_min = 0.0, max = 100.0, message = "Equity offered must be above 0 and at most 100 percent"))]
    pub equity_offered: f64,

    pub closing_date: Option<NaiveDate>,
}

fn validate_terms(terms: &DealTerms) -> Result<(), ValidationError> {
    if terms.minimum_investment > terms.target_amount {
        return Err(ValidationError::new("minimum_exceeds_target")
            .with_message("Minimum investment cannot exceed the target amount".into()));
    }
    if let Some(closing) = terms.closing_date {
        if closing < Utc::now().date_naive() {
            return Err(ValidationError::new("closing_date_past")
                .with_message("Closing date cannot be in the past".into()));
        }
    }
    Ok(())
}

/// Editable, descriptive part of a deal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DealDetails {
    #[validate(length(min = 2, max = 100, message = "Company name must be between 2 and 100 characters"))]
    pub company_name: String,

    #[validate(length(max = 160, message = "Tagline must be at most 160 characters"))]
    pub tagline: Option<String>,

    #[validate(length(min = 20, max = 5000, message = "Description must be between 20 and 5000 characters"))]
    pub description: String,

    #[validate(length(min = 2, max = 60, message = "Industry must be between 2 and 60 characters"))]
    pub industry: String,

    pub stage: FundingStage,

    #[validate(nested)]
    pub terms: DealTerms,
}

impl DealDetails {
    fn normalized(mut self) -> Self {
        self.company_name = self.company_name.trim().to_string();
        self.tagline = self
            .tagline
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.description = self.description.trim().to_string();
        self.industry = self.industry.trim().to_string();
        self
    }

    /// Trim free-text fields, then validate.
    pub fn validated(self) -> Result<Self, validator::ValidationErrors> {
        let details = self.normalized();
        details.validate()?;
        Ok(details)
    }
}

/// Input for creating a deal. `is_active` and `founder_user_id` are only
/// honoured for admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeal {
    pub details: DealDetails,
    pub is_active: Option<bool>,
    pub founder_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub company_name: String,
    pub tagline: Option<String>,
    pub description: String,
    pub industry: String,
    pub stage: FundingStage,
    pub terms: DealTerms,
    pub amount_raised: u64,

    pub status: DealStatus,
    pub is_active: bool,
    pub founder_user_id: Option<Uuid>,
    pub rejection_reason: Option<String>,

    // Audit fields
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
}

impl Deal {
    fn from_details(details: DealDetails, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: details.company_name,
            tagline: details.tagline,
            description: details.description,
            industry: details.industry,
            stage: details.stage,
            terms: details.terms,
            amount_raised: 0,
            status: DealStatus::Draft,
            is_active: false,
            founder_user_id: None,
            rejection_reason: None,
            created_by,
            created_at: Utc::now(),
            modified_at: None,
            submitted_at: None,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    /// Founder-created deal: inactive draft owned by the founder
    pub fn new_draft(details: DealDetails, founder_id: Uuid) -> Self {
        let mut deal = Self::from_details(details, founder_id);
        deal.founder_user_id = Some(founder_id);
        deal
    }

    /// Admin-created deal: approved on creation, live unless told otherwise
    pub fn new_approved(
        details: DealDetails,
        admin_id: Uuid,
        founder_user_id: Option<Uuid>,
        is_active: Option<bool>,
    ) -> Self {
        let mut deal = Self::from_details(details, admin_id);
        deal.status = DealStatus::Approved;
        deal.is_active = is_active.unwrap_or(true);
        deal.founder_user_id = founder_user_id;
        deal.reviewed_at = Some(deal.created_at);
        deal.reviewed_by = Some(admin_id);
        deal
    }

    /// Replace the editable fields. A rejected deal goes back to draft so the
    /// founder can resubmit it.
    pub fn apply_details(&mut self, details: DealDetails) {
        self.company_name = details.company_name;
        self.tagline = details.tagline;
        self.description = details.description;
        self.industry = details.industry;
        self.stage = details.stage;
        self.terms = details.terms;
        if self.status == DealStatus::Rejected {
            self.status = DealStatus::Draft;
            self.rejection_reason = None;
        }
        self.modified_at = Some(Utc::now());
    }

    pub fn submit_for_review(&mut self) {
        let now = Utc::now();
        self.status = DealStatus::Pending;
        self.submitted_at = Some(now);
        self.modified_at = Some(now);
    }

    pub fn approve(&mut self, approved_by: Uuid) {
        let now = Utc::now();
        self.status = DealStatus::Approved;
        self.is_active = true;
        self.rejection_reason = None;
        self.reviewed_at = Some(now);
        self.reviewed_by = Some(approved_by);
        self.modified_at = Some(now);
    }

    pub fn reject(&mut self, rejected_by: Uuid, reason: Option<String>) {
        let now = Utc::now();
        self.status = DealStatus::Rejected;
        self.is_active = false;
        self.rejection_reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        self.reviewed_at = Some(now);
        self.reviewed_by = Some(rejected_by);
        self.modified_at = Some(now);
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.modified_at = Some(Utc::now());
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.founder_user_id == Some(user_id)
    }

    /// Visible to anonymous visitors
    pub fn is_public(&self) -> bool {
        self.status == DealStatus::Approved && self.is_active
    }

    /// Percent of the target already raised
    pub fn progress(&self) -> f64 {
        if self.terms.target_amount == 0 {
            return 0.0;
        }
        (self.amount_raised as f64 / self.terms.target_amount as f64 * 100.0).min(100.0)
    }
}
