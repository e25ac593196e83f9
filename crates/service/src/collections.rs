use std::{marker::PhantomData, sync::Arc};

use models::{MutableRecord, Record};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::SnapshotStore;

/// CRUD operations for one record kind, backed by the shared [`SnapshotStore`].
///
/// `update` and `delete` only exist for kinds implementing [`MutableRecord`].
pub struct CollectionService<K> {
    store: Arc<SnapshotStore>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for CollectionService<K> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), _kind: PhantomData }
    }
}

impl<K: Record> CollectionService<K> {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store, _kind: PhantomData }
    }

    pub async fn create(&self, body: &[u8]) -> Result<K, ServiceError> {
        let record = K::decode(body)?;
        let created = self.store.append(record).await;
        info!(collection = K::COLLECTION, id = created.id(), "record created");
        Ok(created)
    }

    pub async fn list(&self) -> Vec<K> {
        self.store.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<K, ServiceError> {
        let id = parse_id(raw_id)?;
        self.store
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::not_found(K::LABEL))
    }
}

impl<K: MutableRecord> CollectionService<K> {
    /// Replace the record at `raw_id`. The stored record keeps that id even
    /// when the payload carries another one.
    pub async fn update(&self, raw_id: &str, body: &[u8]) -> Result<K, ServiceError> {
        let id = parse_id(raw_id)?;
        let record = K::decode(body)?;
        let updated = self
            .store
            .update_by_id(id, record)
            .await
            .ok_or_else(|| ServiceError::not_found(K::LABEL))?;
        info!(collection = K::COLLECTION, id, "record updated");
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = parse_id(raw_id)?;
        if !self.store.delete_by_id::<K>(id).await {
            return Err(ServiceError::not_found(K::LABEL));
        }
        info!(collection = K::COLLECTION, id, "record deleted");
        Ok(())
    }
}

/// Parse a decimal path segment into a record id.
pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse::<i64>()
        .map_err(|_| ServiceError::Validation(format!("invalid id: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Car, FlowerLot, IdPolicy};

    async fn setup_store() -> Arc<SnapshotStore> {
        let tmp = std::env::temp_dir().join(format!("collections_{}.json", uuid::Uuid::new_v4()));
        SnapshotStore::load(tmp, IdPolicy::default()).await.expect("store init")
    }

    const TOYOTA: &[u8] = br#"{"brand":"Toyota","model":"Corolla","mileage":0,"owners_count":1}"#;
    const BMW: &[u8] = br#"{"brand":"BMW","model":"X5","mileage":54000,"owners_count":2}"#;

    #[test]
    fn parse_id_accepts_decimal_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(ServiceError::Validation(_))));
        assert!(matches!(parse_id(""), Err(ServiceError::Validation(_))));
        assert!(matches!(parse_id("1.5"), Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn car_service_crud_and_errors() {
        let cars = CollectionService::<Car>::new(setup_store().await);

        let first = cars.create(TOYOTA).await.expect("create ok");
        assert_eq!(first.id, 1);
        let second = cars.create(BMW).await.expect("create ok");
        assert_eq!(second.id, 2);

        assert_eq!(cars.get("1").await.expect("found"), first);
        assert!(matches!(cars.get("9").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(cars.get("one").await, Err(ServiceError::Validation(_))));

        let updated = cars
            .update("2", br#"{"id":50,"brand":"BMW","model":"X6","mileage":60000,"owners_count":2}"#)
            .await
            .expect("update ok");
        assert_eq!(updated.id, 2);
        assert_eq!(cars.get("2").await.expect("found").model, "X6");
        assert!(matches!(cars.update("3", BMW).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            cars.update("2", br#"{"mileage":"far"}"#).await,
            Err(ServiceError::Model(_))
        ));

        // missing fields take zero values, as with any other payload
        let blank = cars.update("2", b"{}").await.expect("update ok");
        assert_eq!(blank, Car { id: 2, ..Car::default() });

        cars.delete("1").await.expect("delete ok");
        assert!(matches!(cars.get("1").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(cars.delete("1").await, Err(ServiceError::NotFound(_))));
        assert_eq!(cars.list().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_body_has_no_side_effect() {
        let cars = CollectionService::<Car>::new(setup_store().await);
        assert!(matches!(cars.create(b"not json").await, Err(ServiceError::Model(_))));
        assert!(cars.list().await.is_empty());
        assert_eq!(cars.create(TOYOTA).await.expect("create ok").id, 1);
    }

    #[tokio::test]
    async fn collections_share_store_but_not_ids() {
        let store = setup_store().await;
        let cars = CollectionService::<Car>::new(Arc::clone(&store));
        let flowers = CollectionService::<FlowerLot>::new(store);

        cars.create(TOYOTA).await.expect("create ok");
        let lot = flowers
            .create(br#"{"name":"Rose","quantity":100,"price":2.5,"arrival_date":"2024-03-01"}"#)
            .await
            .expect("create ok");
        assert_eq!(lot.id, 1);
        assert_eq!(flowers.get("1").await.expect("found").name, "Rose");
    }
}
