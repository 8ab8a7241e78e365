//! Domain services (business logic)

pub mod application_service;
pub mod auth_service;
pub mod deal_service;

pub use application_service::{ApplicationService, ParkedApplication};
pub use auth_service::{AuthResult, AuthService, Principal, RegisterInput};
pub use deal_service::DealService;
