use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::Record;

/// Rule for assigning the id of a newly created record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// `len + 1`. After a delete the next id may equal one still held by a
    /// later record.
    #[default]
    SequenceLength,
    /// Highest id currently in the collection plus one. Never hands out an id
    /// that is still in use.
    MaxPlusOne,
}

impl IdPolicy {
    /// Ids saturate at `i64::MAX` rather than wrapping.
    pub fn next_id<K: Record>(self, sequence: &[K]) -> i64 {
        match self {
            IdPolicy::SequenceLength => (sequence.len() as i64).saturating_add(1),
            IdPolicy::MaxPlusOne => sequence.iter().map(K::id).max().unwrap_or(0).saturating_add(1),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence_length" => Ok(IdPolicy::SequenceLength),
            "max_plus_one" => Ok(IdPolicy::MaxPlusOne),
            other => Err(ModelError::Validation(format!("unknown id policy: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::Car;

    fn car(id: i64) -> Car {
        Car { id, brand: "b".into(), model: "m".into(), mileage: 0, owners_count: 0 }
    }

    #[test]
    fn sequence_length_reuses_ids_after_gap() {
        let cars = vec![car(2)];
        assert_eq!(IdPolicy::SequenceLength.next_id(&cars), 2);
        assert_eq!(IdPolicy::MaxPlusOne.next_id(&cars), 3);
    }

    #[test]
    fn empty_collection_starts_at_one() {
        let cars: Vec<Car> = Vec::new();
        assert_eq!(IdPolicy::SequenceLength.next_id(&cars), 1);
        assert_eq!(IdPolicy::MaxPlusOne.next_id(&cars), 1);
    }

    #[test]
    fn max_plus_one_saturates_at_largest_id() {
        let cars = vec![car(i64::MAX)];
        assert_eq!(IdPolicy::MaxPlusOne.next_id(&cars), i64::MAX);
    }

    #[test]
    fn parses_config_spelling() {
        assert_eq!("max_plus_one".parse::<IdPolicy>().unwrap(), IdPolicy::MaxPlusOne);
        assert_eq!(" Sequence_Length ".parse::<IdPolicy>().unwrap(), IdPolicy::SequenceLength);
        assert!("counter".parse::<IdPolicy>().is_err());
    }
}
