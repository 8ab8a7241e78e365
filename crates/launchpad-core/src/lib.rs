//! # Launchpad Core
//! 
//! Domain entities, lifecycle guards, services, and repository traits for the
//! funding platform.

pub mod domain;
pub mod lifecycle;
pub mod services;
pub mod repositories;
pub mod validation;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use lifecycle::Actor;
pub use validation::FieldErrors;
