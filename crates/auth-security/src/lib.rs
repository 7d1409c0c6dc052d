//! # Auth Security
//! 
//! Security primitives: signed session tokens and one-way password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
