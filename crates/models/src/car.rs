use serde::{Deserialize, Serialize};

use crate::record::{MutableRecord, Record};
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub mileage: u64,
    pub owners_count: u32,
}

impl Record for Car {
    const COLLECTION: &'static str = "cars";
    const LABEL: &'static str = "car";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn sequence(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.cars
    }

    fn sequence_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.cars
    }
}

impl MutableRecord for Car {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ModelError;

    #[test]
    fn decode_ignores_missing_id() {
        let car = Car::decode(br#"{"brand":"Toyota","model":"Corolla","mileage":0,"owners_count":1}"#)
            .expect("decode");
        assert_eq!(car.id, 0);
        assert_eq!(car.brand, "Toyota");
        assert_eq!(car.owners_count, 1);
    }

    #[test]
    fn decode_fills_missing_fields_with_zero_values() {
        let car = Car::decode(br#"{"brand":"Toyota"}"#).expect("decode");
        assert_eq!(car, Car { brand: "Toyota".into(), ..Car::default() });
        assert_eq!(Car::decode(b"{}").expect("decode"), Car::default());
    }

    #[test]
    fn decode_rejects_wrong_types() {
        assert!(Car::decode(br#"{"mileage":"far"}"#).is_err());
        assert!(Car::decode(b"[]").is_err());
    }

    #[test]
    fn decode_rejects_negative_mileage() {
        let err = Car::decode(br#"{"brand":"A","model":"B","mileage":-3,"owners_count":1}"#).unwrap_err();
        assert!(matches!(err, ModelError::Decode { kind: "car", .. }));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(Car::decode(b"{not json").is_err());
        assert!(Car::decode(b"").is_err());
    }
}
