//! In-process cache of pending verification codes
//!
//! This module provides the concurrent, expiring store behind the core
//! `CodeStore` trait and the background task that keeps it bounded.

pub mod memory_store;
pub mod sweeper;

#[cfg(test)]
mod tests;

pub use memory_store::InMemoryCodeStore;
pub use sweeper::{spawn_expiry_sweeper, SweeperHandle};
