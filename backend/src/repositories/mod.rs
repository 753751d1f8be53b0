//! Data access layer
//!
//! Handlers and services talk to `UserStore`; the concrete store is picked
//! at startup and injected through `AppState`.

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::{NewUser, PgUserStore, StoreError, UserChanges, UserRecord, UserStore};
