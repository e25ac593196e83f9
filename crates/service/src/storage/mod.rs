//! Storage for the service layer
//!
//! A single JSON snapshot file holds every collection; the store rewrites it
//! in full after each mutation.

pub mod snapshot_store;

pub use snapshot_store::SnapshotStore;
