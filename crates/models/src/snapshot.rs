use serde::{Deserialize, Serialize};

use crate::car::Car;
use crate::flower::FlowerLot;
use crate::furniture::FurnitureItem;

/// Full persisted state: one array per collection, in insertion order.
///
/// A file missing one of the arrays loads it as empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default)]
    pub flowers: Vec<FlowerLot>,
}
