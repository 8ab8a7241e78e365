//! # Launchpad Infrastructure
//!
//! In-memory repository implementations (adapters).

pub mod memory;

pub use memory::{
    MemoryApplicationRepository, MemoryDealRepository, MemoryPendingApplicationRepository,
    MemorySessionRepository, MemoryUserRepository,
};
