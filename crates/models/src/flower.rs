use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::snapshot::Snapshot;

/// A delivered lot of flowers. Lots are append-only once created.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowerLot {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    /// Free-form date text; not parsed.
    pub arrival_date: String,
}

impl Record for FlowerLot {
    const COLLECTION: &'static str = "flowers";
    const LABEL: &'static str = "flower";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sequence(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.flowers
    }

    fn sequence_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.flowers
    }
}
