use std::collections::HashSet;

use super::config::EngineConfig;
use crate::model::{FaultKind, Snapshot};

/// Validate engine configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_engine(config: &EngineConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(base) = config.base_score {
        if !base.is_finite() {
            errors.push(format!("engine.base_score: must be finite, got {}", base));
        }
    }

    if let Some(top_n) = config.top_n {
        if top_n == 0 {
            errors.push("engine.top_n: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a snapshot for problems the engine tolerates but a caller should
/// fix at ingestion. An empty result means the snapshot is clean.
pub fn validate_snapshot(snapshot: &Snapshot) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut class_ids = HashSet::new();
    for class in &snapshot.classes {
        if !class_ids.insert(class.id.as_str()) {
            warnings.push(format!("classes: duplicate id '{}'", class.id));
        }
    }

    let mut week_ids = HashSet::new();
    for week in &snapshot.weeks {
        if !week_ids.insert(week.id.as_str()) {
            warnings.push(format!("weeks: duplicate id '{}'", week.id));
        }
    }

    let positioned = snapshot.weeks.iter().filter(|w| w.position.is_some()).count();
    if positioned > 0 && positioned < snapshot.weeks.len() {
        warnings.push(format!(
            "weeks: {} of {} weeks have a position; roster order will be used",
            positioned,
            snapshot.weeks.len()
        ));
    }

    let mut fault_ids = HashSet::new();
    for fault in &snapshot.faults {
        if !fault_ids.insert(fault.id.as_str()) {
            warnings.push(format!("faults: duplicate id '{}'", fault.id));
        }
        let consistent = match fault.kind {
            FaultKind::Plus => fault.point >= 0.0,
            FaultKind::Minus => fault.point <= 0.0,
        };
        if !consistent {
            warnings.push(format!(
                "faults[{}]: point {} does not match type {:?}",
                fault.id, fault.point, fault.kind
            ));
        }
    }

    for entry in &snapshot.entries {
        if !entry.point_change.is_finite() {
            warnings.push(format!(
                "entries[{}].pointChange: must be finite, got {}",
                entry.id, entry.point_change
            ));
        }
        if !class_ids.contains(entry.class_id.as_str()) {
            warnings.push(format!(
                "entries[{}].classId: unknown class '{}'",
                entry.id, entry.class_id
            ));
        }
        if !week_ids.contains(entry.week_id.as_str()) {
            warnings.push(format!(
                "entries[{}].weekId: unknown week '{}'",
                entry.id, entry.week_id
            ));
        }
        if let Some(ref fault_id) = entry.fault_id {
            if !fault_ids.contains(fault_id.as_str()) {
                warnings.push(format!(
                    "entries[{}].faultId: unknown fault '{}'",
                    entry.id, fault_id
                ));
            }
        }
    }

    warnings
}
