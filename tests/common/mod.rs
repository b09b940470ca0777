// Common test utilities

pub mod fixtures;
pub mod harness;
pub mod stores;

pub use harness::*;
pub use stores::*;
