//! In-memory adapters backed by `DashMap`. State lives for the process
//! lifetime only.

pub mod application_repo_impl;
pub mod deal_repo_impl;
pub mod pending_application_repo_impl;
pub mod session_repo_impl;
pub mod user_repo_impl;

pub use application_repo_impl::MemoryApplicationRepository;
pub use deal_repo_impl::MemoryDealRepository;
pub use pending_application_repo_impl::MemoryPendingApplicationRepository;
pub use session_repo_impl::MemorySessionRepository;
pub use user_repo_impl::MemoryUserRepository;
