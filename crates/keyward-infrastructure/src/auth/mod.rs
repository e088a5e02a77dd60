//! Authentication services
//!
//! Password strength policy, bcrypt password hashing offloaded to a bounded
//! blocking pool, and JWT issuance, verification and rotation.

mod password;
mod policy;
mod token;

pub use password::PasswordHasher;
pub use policy::PasswordPolicy;
pub use token::{SigningKeys, TokenService};
