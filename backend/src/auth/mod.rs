//! Authentication module
//!
//! Provides JWT-based sessions with argon2 password hashing.

mod jwt;
mod password;
mod session;

pub use jwt::{Claims, JwtService, TokenType};
pub use password::{PasswordService, MIN_PASSWORD_LEN};
pub use session::Session;
