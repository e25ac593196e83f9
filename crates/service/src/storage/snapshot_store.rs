use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use models::{IdPolicy, Record, Snapshot};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info};

use crate::errors::ServiceError;
use crate::metrics::{MUTATIONS_TOTAL, SNAPSHOT_SAVES_TOTAL, SNAPSHOT_SAVE_FAILURES_TOTAL};

/// File-backed store for every record collection.
///
/// All collections sit behind one exclusive lock, so any two mutations
/// serialize even when they touch different collections. Each mutation
/// rewrites the whole snapshot file while the lock is still held; a failed
/// write is logged and the in-memory state stays authoritative.
pub struct SnapshotStore {
    inner: Mutex<Snapshot>,
    file_path: PathBuf,
    id_policy: IdPolicy,
}

impl SnapshotStore {
    /// Load the snapshot at `path`. A missing file starts an empty store; a
    /// file that cannot be read or parsed is an error.
    pub async fn load<P: Into<PathBuf>>(path: P, id_policy: IdPolicy) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let snapshot = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes).map_err(|e| ServiceError::Corrupt {
                path: file_path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %file_path.display(), "no snapshot file; starting empty");
                Snapshot::default()
            }
            Err(e) => {
                return Err(ServiceError::Storage(format!(
                    "cannot read {}: {e}",
                    file_path.display()
                )))
            }
        };

        info!(
            path = %file_path.display(),
            cars = snapshot.cars.len(),
            furniture = snapshot.furniture.len(),
            flowers = snapshot.flowers.len(),
            ?id_policy,
            "snapshot loaded"
        );
        Ok(Arc::new(Self { inner: Mutex::new(snapshot), file_path, id_policy }))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Write the current state to disk under the lock.
    pub async fn save(&self) -> Result<(), ServiceError> {
        let snapshot = self.inner.lock().await;
        self.write_snapshot(&snapshot).await
    }

    /// Assign the next id to `record`, append it and persist.
    pub async fn append<K: Record>(&self, mut record: K) -> K {
        let mut snapshot = self.inner.lock().await;
        let sequence = K::sequence_mut(&mut snapshot);
        let id = self.id_policy.next_id(sequence);
        record.set_id(id);
        sequence.push(record.clone());
        debug!(collection = K::COLLECTION, id, "record appended");
        MUTATIONS_TOTAL.with_label_values(&[K::COLLECTION, "create"]).inc();
        self.persist(&snapshot).await;
        record
    }

    /// Copy of a collection in insertion order.
    pub async fn list<K: Record>(&self) -> Vec<K> {
        let snapshot = self.inner.lock().await;
        K::sequence(&snapshot).clone()
    }

    pub async fn get_by_id<K: Record>(&self, id: i64) -> Option<K> {
        let snapshot = self.inner.lock().await;
        K::sequence(&snapshot).iter().find(|r| r.id() == id).cloned()
    }

    /// Replace the first record with `id`, keeping its position and its id.
    pub async fn update_by_id<K: Record>(&self, id: i64, mut value: K) -> Option<K> {
        let mut snapshot = self.inner.lock().await;
        let slot = K::sequence_mut(&mut snapshot).iter_mut().find(|r| r.id() == id)?;
        value.set_id(id);
        *slot = value.clone();
        debug!(collection = K::COLLECTION, id, "record updated");
        MUTATIONS_TOTAL.with_label_values(&[K::COLLECTION, "update"]).inc();
        self.persist(&snapshot).await;
        Some(value)
    }

    /// Remove the first record with `id`; returns whether one existed.
    pub async fn delete_by_id<K: Record>(&self, id: i64) -> bool {
        let mut snapshot = self.inner.lock().await;
        let sequence = K::sequence_mut(&mut snapshot);
        let Some(pos) = sequence.iter().position(|r| r.id() == id) else {
            return false;
        };
        sequence.remove(pos);
        debug!(collection = K::COLLECTION, id, "record deleted");
        MUTATIONS_TOTAL.with_label_values(&[K::COLLECTION, "delete"]).inc();
        self.persist(&snapshot).await;
        true
    }

    async fn persist(&self, snapshot: &Snapshot) {
        if let Err(e) = self.write_snapshot(snapshot).await {
            SNAPSHOT_SAVE_FAILURES_TOTAL.inc();
            error!(path = %self.file_path.display(), error = %e, "snapshot write failed; serving from memory");
        }
    }

    // Write to a sibling temp file and rename so readers never see a partial snapshot.
    async fn write_snapshot(&self, snapshot: &Snapshot) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(snapshot).map_err(|e| ServiceError::Storage(e.to_string()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot replace {}: {e}", self.file_path.display())))?;
        SNAPSHOT_SAVES_TOTAL.inc();
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}
