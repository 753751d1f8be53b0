//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the user store and the token/password helpers.

pub mod account;

pub use account::AccountService;
