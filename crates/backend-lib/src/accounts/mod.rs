// ============================
// accounts-backend-lib/src/accounts/mod.rs
// ============================
//! Account model and the manager that owns account creation.

pub mod email;
pub mod manager;
pub mod model;

pub use email::normalize_email;
pub use manager::AccountManager;
pub use model::{Account, AccountId, ExtraFields, NewAccount};
