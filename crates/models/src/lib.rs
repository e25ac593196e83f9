//! Record types shared by the store, the collection services and the HTTP layer.
//! - Each collection has one flat record type with an integer `id`.
//! - `Record` describes how a type is decoded, identified and located in a `Snapshot`.

pub mod errors;
pub mod record;
pub mod snapshot;
pub mod id_policy;
pub mod car;
pub mod furniture;
pub mod flower;

pub use car::Car;
pub use flower::FlowerLot;
pub use furniture::FurnitureItem;
pub use id_policy::IdPolicy;
pub use record::{MutableRecord, Record};
pub use snapshot::Snapshot;
