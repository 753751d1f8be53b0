//! Authentication module
//!
//! JWT access/refresh tokens, argon2 password hashing, and the bearer-token
//! extractor used by protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenSubject, TokenType};
pub use middleware::AuthUser;
pub use password::PasswordService;
