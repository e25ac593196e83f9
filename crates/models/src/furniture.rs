use serde::{Deserialize, Serialize};

use crate::record::{MutableRecord, Record};
use crate::snapshot::Snapshot;

/// A piece of furniture; dimensions are in whatever unit the client uses.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FurnitureItem {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

impl Record for FurnitureItem {
    const COLLECTION: &'static str = "furniture";
    const LABEL: &'static str = "furniture";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sequence(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.furniture
    }

    fn sequence_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.furniture
    }
}

impl MutableRecord for FurnitureItem {}
