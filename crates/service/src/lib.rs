//! Service layer: the persistent record store and the CRUD services built on it.
//! - `storage` owns the in-memory collections, the exclusive lock and snapshot I/O.
//! - `collections` exposes one generic CRUD service per record kind.
//! - `metrics` counts mutations and snapshot writes.

pub mod errors;
pub mod storage;
pub mod collections;
pub mod metrics;
