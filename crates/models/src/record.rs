use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ModelError;
use crate::snapshot::Snapshot;

/// A record kind stored in one of the snapshot collections.
///
/// Implementors pick their sequence out of the shared [`Snapshot`], so a single
/// store and a single generic service can serve every collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Collection name, used as the URL segment and the snapshot key.
    const COLLECTION: &'static str;
    /// Singular label used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    fn sequence(snapshot: &Snapshot) -> &Vec<Self>;
    fn sequence_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;

    /// Decode a request body into a record. Any `id` in the payload is kept
    /// here and overwritten by the store.
    fn decode(bytes: &[u8]) -> Result<Self, ModelError> {
        serde_json::from_slice(bytes).map_err(|e| ModelError::Decode {
            kind: Self::LABEL,
            reason: e.to_string(),
        })
    }
}

/// Record kinds that can be replaced or removed after creation.
/// Flower lots are append-only and do not implement this.
pub trait MutableRecord: Record {}
