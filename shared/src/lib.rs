//! Account API Shared Library
//!
//! Request/response types, validation helpers, and error enums shared by
//! the backend and any client of the account API.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
