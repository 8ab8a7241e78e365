//! # Launchpad Security
//! 
//! Security utilities: JWT, password hashing and policy, sessions, opaque tokens.

pub mod jwt;
pub mod password;
pub mod session;
pub mod token;

pub use jwt::{Claims, JwtService};
pub use password::PasswordService;
pub use session::Session;
