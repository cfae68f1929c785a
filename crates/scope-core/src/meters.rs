//! Meter readings reported at the end of a phase.
//!
//! Meters accumulate a quantity over a phase (accuracy, recall, ...) and
//! report either a single scalar or a nested mapping of scalars, e.g. a
//! top-k accuracy meter reporting `{"top_1": 0.71, "top_5": 0.92}`. Nested
//! readings are flattened into dot-joined keys before they reach the metric
//! history.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value reported by a meter: a scalar or a nested mapping of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeterValue {
    /// Single scalar reading.
    Scalar(f64),
    /// Nested mapping; nesting may be arbitrarily deep.
    Nested(BTreeMap<String, MeterValue>),
}

impl MeterValue {
    /// Builds a nested value from `(key, value)` pairs.
    pub fn nested<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MeterValue)>,
    {
        Self::Nested(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Flattens this value into `out`, joining nested keys onto `prefix`
    /// with `.`. A scalar lands under `prefix` itself.
    pub fn flatten_into(&self, prefix: &str, out: &mut BTreeMap<String, f64>) {
        match self {
            Self::Scalar(value) => {
                out.insert(prefix.to_string(), *value);
            }
            Self::Nested(entries) => {
                for (key, value) in entries {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    value.flatten_into(&path, out);
                }
            }
        }
    }
}

impl From<f64> for MeterValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

/// Named meter reading captured for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Meter name, used as the key prefix for nested readings.
    pub name: String,
    /// Reported value.
    pub value: MeterValue,
}

impl MeterReading {
    /// Creates a reading from a name and anything convertible to a value.
    pub fn new(name: impl Into<String>, value: impl Into<MeterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Flat view of this reading: scalar readings map their name to the
    /// value, nested readings produce one dot-joined key per leaf.
    pub fn flattened(&self) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        self.value.flatten_into(&self.name, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_reading_flattens_to_its_own_name() {
        let reading = MeterReading::new("acc", 0.75);
        let flat = reading.flattened();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat["acc"], 0.75);
    }

    #[test]
    fn nested_reading_produces_dot_joined_keys() {
        let reading = MeterReading::new(
            "meter1",
            MeterValue::nested([(
                "a",
                MeterValue::nested([
                    ("b", MeterValue::Scalar(1.0)),
                    ("c", MeterValue::Scalar(2.0)),
                ]),
            )]),
        );
        let flat = reading.flattened();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["meter1.a.b"], 1.0);
        assert_eq!(flat["meter1.a.c"], 2.0);
    }

    #[test]
    fn flattening_handles_depth_beyond_one_level() {
        let reading = MeterReading::new(
            "m",
            MeterValue::nested([(
                "x",
                MeterValue::nested([("y", MeterValue::nested([("z", MeterValue::Scalar(3.5))]))]),
            )]),
        );
        assert_eq!(reading.flattened()["m.x.y.z"], 3.5);
    }

    #[test]
    fn flat_keys_are_deterministic() {
        let build = || {
            MeterReading::new(
                "top_k",
                MeterValue::nested([
                    ("top_5", MeterValue::Scalar(0.92)),
                    ("top_1", MeterValue::Scalar(0.71)),
                ]),
            )
            .flattened()
            .into_iter()
            .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
        assert_eq!(build()[0].0, "top_k.top_1");
    }
}
