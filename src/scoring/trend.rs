use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::accumulate::canonical_sum;
use super::config::EngineConfig;
use crate::model::{Class, ScoreEntry, Week};

/// Cumulative total of one class at one week.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValue {
    pub class_id: String,
    pub class_name: String,
    pub total: f64,
}

/// One x-axis point of the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Week display name
    pub name: String,
    /// One value per charted class, in the order the classes were given
    pub values: Vec<SeriesValue>,
}

impl TrendPoint {
    pub fn value_for(&self, class_id: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.class_id == class_id)
            .map(|v| v.total)
    }
}

/// Chart shape: `{"name": "Week 1", "6A": 105, "7A": 98}`.
impl Serialize for TrendPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for value in &self.values {
            map.serialize_entry(&value.class_name, &value.total)?;
        }
        map.end()
    }
}

/// Build the cumulative per-week series for the charted classes.
///
/// Weeks are walked in the order given; chronology is the caller's
/// responsibility (see [`order_weeks`]). Every week emits a point, even when
/// no charted class has entries that week.
pub fn build_series(
    top_classes: &[&Class],
    weeks: &[Week],
    entries: &[ScoreEntry],
    config: &EngineConfig,
) -> Vec<TrendPoint> {
    let mut buckets: HashMap<(&str, &str), Vec<f64>> = HashMap::new();
    for entry in entries {
        buckets
            .entry((entry.week_id.as_str(), entry.class_id.as_str()))
            .or_default()
            .push(entry.point_change);
    }

    let mut running = vec![config.base_score(); top_classes.len()];

    weeks
        .iter()
        .map(|week| {
            let values = top_classes
                .iter()
                .zip(running.iter_mut())
                .map(|(class, total)| {
                    if let Some(changes) = buckets.get(&(week.id.as_str(), class.id.as_str())) {
                        *total += canonical_sum(changes);
                    }
                    SeriesValue {
                        class_id: class.id.clone(),
                        class_name: class.name.clone(),
                        total: *total,
                    }
                })
                .collect();

            TrendPoint {
                name: week.name.clone(),
                values,
            }
        })
        .collect()
}

/// Put weeks in chronological order.
///
/// When every week carries an explicit `position`, weeks are sorted by it
/// (stable, so equal positions keep roster order). Otherwise roster order is
/// taken as chronology and returned unchanged.
pub fn order_weeks(weeks: &[Week]) -> Vec<Week> {
    let mut ordered = weeks.to_vec();
    if !weeks.is_empty() && weeks.iter().all(|w| w.position.is_some()) {
        ordered.sort_by_key(|w| w.position);
    }
    ordered
}
