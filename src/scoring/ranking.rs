use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::accumulate::Tally;
use super::config::EngineConfig;
use crate::model::{Class, ScoreEntry};

/// One class's standing in the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow<'a> {
    pub class: &'a Class,
    pub plus: f64,
    pub minus: f64,
    pub total: f64,
    pub rank: usize,
}

/// Fold the entry log into one ranked row per roster class.
///
/// Every class id in `classes` yields exactly one row, even with no entries.
/// A repeated id keeps its first roster position and its last class record.
/// Entries whose class id is not on the roster are dropped. Rows are ordered
/// by descending total; equal totals keep roster order, and ranks are dense
/// (1..N, never shared).
///
/// Contributions are summed in a canonical order, so any permutation of
/// `entries` produces bit-identical rows.
pub fn aggregate<'a>(
    classes: &'a [Class],
    entries: &[ScoreEntry],
    config: &EngineConfig,
) -> Vec<RankingRow<'a>> {
    let base_score = config.base_score();

    let roster = dedup_roster(classes);

    let mut changes: HashMap<&str, Vec<f64>> = roster
        .iter()
        .map(|&c| (c.id.as_str(), Vec::new()))
        .collect();

    for entry in entries {
        if let Some(bucket) = changes.get_mut(entry.class_id.as_str()) {
            bucket.push(entry.point_change);
        }
    }

    let mut rows: Vec<RankingRow<'a>> = roster
        .into_iter()
        .map(|class| {
            let tally = changes
                .get(class.id.as_str())
                .map(|c| Tally::from_changes(c))
                .unwrap_or_default();
            RankingRow {
                class,
                plus: tally.plus,
                minus: tally.minus,
                total: tally.total(base_score),
                rank: 0,
            }
        })
        .collect();

    // slice::sort_by is stable, which is what keeps ties in roster order
    rows.sort_by(|a, b| compare_totals(a.total, b.total));

    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }

    rows
}

/// One class per id, in first-seen order, holding the last record for that id.
fn dedup_roster(classes: &[Class]) -> Vec<&Class> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut roster: Vec<&Class> = Vec::with_capacity(classes.len());

    for class in classes {
        match positions.get(class.id.as_str()) {
            Some(&pos) => roster[pos] = class,
            None => {
                positions.insert(class.id.as_str(), roster.len());
                roster.push(class);
            }
        }
    }

    roster
}

/// Classes of the first `n` rows, in rank order.
pub fn top_classes<'a>(rows: &[RankingRow<'a>], n: usize) -> Vec<&'a Class> {
    rows.iter().take(n).map(|row| row.class).collect()
}

/// Descending by total; NaN totals sort after everything else.
fn compare_totals(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
