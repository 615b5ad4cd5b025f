use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use thidua::model::{Class, ScoreEntry, Week};
use thidua::scoring::{aggregate, build_series, top_classes, EngineConfig, RankingRow, TrendPoint};

const CLASS_IDS: [&str; 5] = ["C_6A", "C_6B", "C_7A", "C_8A", "C_9A"];
const WEEK_IDS: [&str; 4] = ["W_01", "W_02", "W_03", "W_04"];

fn roster() -> Vec<Class> {
    CLASS_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| Class {
            id: id.to_string(),
            name: id.trim_start_matches("C_").to_string(),
            grade: 6 + i as u32,
        })
        .collect()
}

fn weeks() -> Vec<Week> {
    WEEK_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| Week {
            id: id.to_string(),
            name: format!("Week {}", i + 1),
            month_id: None,
            position: None,
        })
        .collect()
}

fn make_entry(idx: usize, week_id: &str, class_id: &str, points: f64) -> ScoreEntry {
    ScoreEntry {
        id: format!("e{}", idx),
        week_id: week_id.to_string(),
        class_id: class_id.to_string(),
        fault_id: None,
        point_change: points,
        note: String::new(),
        created_at: Utc.with_ymd_and_hms(2025, 9, 8, 7, 30, 0).unwrap(),
        created_by: "duty@school.edu.vn".to_string(),
    }
}

/// Entries with whole-number points, occasionally aimed at a class that is
/// not on the roster.
fn integer_entries() -> impl Strategy<Value = Vec<ScoreEntry>> {
    prop::collection::vec((0usize..6, 0usize..4, -10i32..=10), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (class_idx, week_idx, points))| {
                let class_id = CLASS_IDS.get(class_idx).copied().unwrap_or("C_GHOST");
                make_entry(idx, WEEK_IDS[week_idx], class_id, points as f64)
            })
            .collect()
    })
}

fn fractional_entries() -> impl Strategy<Value = Vec<ScoreEntry>> {
    prop::collection::vec((0usize..5, -1000.0f64..1000.0), 0..40).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(idx, (class_idx, points))| {
                make_entry(idx, "W_01", CLASS_IDS[class_idx], points)
            })
            .collect()
    })
}

fn row_bits(classes: &[Class], entries: &[ScoreEntry]) -> Vec<(String, u64, u64, u64, usize)> {
    aggregate(classes, entries, &EngineConfig::default())
        .iter()
        .map(|r| {
            (
                r.class.id.clone(),
                r.plus.to_bits(),
                r.minus.to_bits(),
                r.total.to_bits(),
                r.rank,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_empty_log_gives_base_and_dense_ranks(n in 0usize..=5) {
        let classes: Vec<Class> = roster().into_iter().take(n).collect();
        let rows = aggregate(&classes, &[], &EngineConfig::default());

        prop_assert_eq!(rows.len(), n);
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.total, 100.0);
            prop_assert_eq!(row.rank, idx + 1);
            // ties everywhere, so roster order must survive
            prop_assert_eq!(&row.class.id, &classes[idx].id);
        }
    }

    #[test]
    fn prop_total_is_base_plus_buckets(entries in integer_entries()) {
        let classes = roster();
        let rows = aggregate(&classes, &entries, &EngineConfig::default());

        prop_assert_eq!(rows.len(), classes.len());
        for row in &rows {
            prop_assert_eq!(row.total, 100.0 + row.plus + row.minus);
            prop_assert!(row.plus >= 0.0);
            prop_assert!(row.minus <= 0.0);
        }
    }

    #[test]
    fn prop_totals_match_roster_entries_only(entries in integer_entries()) {
        let classes = roster();
        let rows = aggregate(&classes, &entries, &EngineConfig::default());

        for row in &rows {
            let expected: f64 = entries
                .iter()
                .filter(|e| e.class_id == row.class.id)
                .map(|e| e.point_change)
                .sum();
            prop_assert_eq!(row.total, 100.0 + expected);
        }
    }

    #[test]
    fn prop_rows_sorted_and_ranks_dense(entries in integer_entries()) {
        let classes = roster();
        let rows = aggregate(&classes, &entries, &EngineConfig::default());

        for pair in rows.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
            if pair[0].total == pair[1].total {
                let pos = |id: &str| classes.iter().position(|c| c.id == id).unwrap();
                prop_assert!(pos(&pair[0].class.id) < pos(&pair[1].class.id));
            }
        }
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        prop_assert_eq!(ranks, (1..=classes.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_permutation_invariant(
        (entries, shuffled) in fractional_entries()
            .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle()))
    ) {
        let classes = roster();
        prop_assert_eq!(row_bits(&classes, &entries), row_bits(&classes, &shuffled));
    }

    #[test]
    fn prop_series_is_cumulative(entries in integer_entries()) {
        let classes = roster();
        let weeks = weeks();
        let config = EngineConfig::default();
        let rows = aggregate(&classes, &entries, &config);
        let charted = top_classes(&rows, config.top_n());
        let series = build_series(&charted, &weeks, &entries, &config);

        prop_assert_eq!(series.len(), weeks.len());
        for (week_idx, point) in series.iter().enumerate() {
            prop_assert_eq!(point.values.len(), charted.len());
            for class in &charted {
                let seen: Vec<&str> = WEEK_IDS[..=week_idx].to_vec();
                let expected: f64 = entries
                    .iter()
                    .filter(|e| e.class_id == class.id && seen.contains(&e.week_id.as_str()))
                    .map(|e| e.point_change)
                    .sum();
                prop_assert_eq!(point.value_for(&class.id), Some(100.0 + expected));
            }
        }
    }
}

#[test]
fn test_final_trend_point_matches_ranking() {
    let classes = roster();
    let entries = vec![
        make_entry(1, "W_01", "C_7A", 10.0),
        make_entry(2, "W_02", "C_7A", -2.0),
        make_entry(3, "W_02", "C_6B", 5.0),
        make_entry(4, "W_04", "C_9A", -5.0),
        make_entry(5, "W_03", "C_GHOST", 100.0),
    ];
    let config = EngineConfig::default();

    let rows = aggregate(&classes, &entries, &config);
    let charted = top_classes(&rows, 3);
    let series = build_series(&charted, &weeks(), &entries, &config);

    let names: Vec<&str> = charted.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["7A", "6B", "6A"]);

    let last = series.last().unwrap();
    for row in rows.iter().take(3) {
        assert_eq!(last.value_for(&row.class.id), Some(row.total));
    }
    assert_eq!(
        series.iter().map(|p| p.value_for("C_7A").unwrap()).collect::<Vec<_>>(),
        vec![110.0, 108.0, 108.0, 108.0]
    );
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_engine_types_are_send_and_sync() {
    assert_send_sync::<Class>();
    assert_send_sync::<Week>();
    assert_send_sync::<ScoreEntry>();
    assert_send_sync::<RankingRow<'static>>();
    assert_send_sync::<TrendPoint>();
    assert_send_sync::<EngineConfig>();
}

#[test]
fn test_concurrent_calls_agree() {
    let classes = roster();
    let weeks = weeks();
    let entries = vec![
        make_entry(1, "W_01", "C_8A", 7.0),
        make_entry(2, "W_02", "C_6A", -3.5),
        make_entry(3, "W_03", "C_9A", 2.0),
    ];
    let config = EngineConfig::default();

    let expected = row_bits(&classes, &entries);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let rows = aggregate(&classes, &entries, &config);
                    let charted = top_classes(&rows, config.top_n());
                    let series = build_series(&charted, &weeks, &entries, &config);
                    (row_bits(&classes, &entries), series.len())
                })
            })
            .collect();

        for handle in handles {
            let (bits, points) = handle.join().unwrap();
            assert_eq!(bits, expected);
            assert_eq!(points, weeks.len());
        }
    });
}
