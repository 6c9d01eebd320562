//! Named results published by a pricing run.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use swaptree_core::types::Date;

/// Key of the exercise probability and swap boundary map.
pub const EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY: &str = "ExerciseProbabilityAndSwapBoundary";

/// Key of the option value.
pub const NPV: &str = "NPV";

/// A published result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// A single number.
    Real(f64),
    /// Per date, a `(probability, boundary rate)` pair.
    #[serde(deserialize_with = "deserialize_dated_pairs")]
    DatedPairs(BTreeMap<Date, (f64, f64)>),
}

/// Reads a number written by `serde_json`, which writes NaN as `null`.
pub(crate) fn deserialize_nan_or_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn deserialize_dated_pairs<'de, D>(deserializer: D) -> Result<BTreeMap<Date, (f64, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs = BTreeMap::<Date, (Option<f64>, Option<f64>)>::deserialize(deserializer)?;
    Ok(pairs
        .into_iter()
        .map(|(date, (a, b))| (date, (a.unwrap_or(f64::NAN), b.unwrap_or(f64::NAN))))
        .collect())
}

/// Results keyed by name, in addition to the option value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalResults {
    entries: BTreeMap<String, ResultValue>,
}

impl AdditionalResults {
    /// Creates an empty result map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `value` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: ResultValue) {
        self.entries.insert(key.into(), value);
    }

    /// Looks up a result.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResultValue> {
        self.entries.get(key)
    }

    /// Looks up a numeric result.
    #[must_use]
    pub fn real(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            ResultValue::Real(x) => Some(*x),
            ResultValue::DatedPairs(_) => None,
        }
    }

    /// The exercise probability and swap boundary per exercise date.
    #[must_use]
    pub fn exercise_probability_and_swap_boundary(&self) -> Option<&BTreeMap<Date, (f64, f64)>> {
        match self.entries.get(EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY)? {
            ResultValue::DatedPairs(map) => Some(map),
            ResultValue::Real(_) => None,
        }
    }

    /// Result names, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of published results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
