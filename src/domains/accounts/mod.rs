pub mod loader;
pub mod models;
pub mod store;

// Re-export models
pub use models::{Host, User};

// Re-export store trait
pub use store::AccountStore;
