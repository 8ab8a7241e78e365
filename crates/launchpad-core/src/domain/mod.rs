//! # Launchpad Core - Domain Module
//! 
//! Domain entities for the funding platform.

pub mod user;
pub mod stage;
pub mod application;
pub mod deal;
pub mod pending_application;

// Re-export all entities and enums
pub use user::{User, UserRole};
pub use stage::FundingStage;
pub use application::{validate_application_form, Application, ApplicationStatus};
pub use deal::{Deal, DealDetails, DealStatus, DealTerms, NewDeal};
pub use pending_application::PendingApplication;
