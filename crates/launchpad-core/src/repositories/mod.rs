//! Repository traits (ports)

pub mod user_repository;
pub mod session_repository;
pub mod application_repository;
pub mod pending_application_repository;
pub mod deal_repository;

pub use user_repository::UserRepository;
pub use session_repository::SessionRepository;
pub use application_repository::ApplicationRepository;
pub use pending_application_repository::PendingApplicationRepository;
pub use deal_repository::{DealFilter, DealRepository};
