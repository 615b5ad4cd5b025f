use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A school class taking part in the standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub grade: u32,
}

/// A school week. Roster order is chronological unless every week carries
/// an explicit `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FaultKind {
    Plus,
    Minus,
}

/// Catalog item describing why points were added or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    pub id: String,
    pub name: String,
    pub point: f64,
    #[serde(rename = "type")]
    pub kind: FaultKind,
}

/// One signed point change recorded against a class for a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: String,
    pub week_id: String,
    pub class_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_id: Option<String>,
    pub point_change: f64,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: String,
}

/// Everything the store hands to the engine in one read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub faults: Vec<Fault>,
    #[serde(default)]
    pub entries: Vec<ScoreEntry>,
}

impl Snapshot {
    /// Reference school roster: five classes, four weeks of September and
    /// October, the standard fault catalog, and an empty entry log.
    pub fn seed() -> Self {
        let class = |id: &str, name: &str, grade: u32| Class {
            id: id.to_string(),
            name: name.to_string(),
            grade,
        };
        let week = |id: &str, name: &str, month: &str| Week {
            id: id.to_string(),
            name: name.to_string(),
            month_id: Some(month.to_string()),
            position: None,
        };
        let fault = |id: &str, name: &str, point: f64, kind: FaultKind| Fault {
            id: id.to_string(),
            name: name.to_string(),
            point,
            kind,
        };

        Self {
            classes: vec![
                class("C_6A", "6A", 6),
                class("C_6B", "6B", 6),
                class("C_7A", "7A", 7),
                class("C_8A", "8A", 8),
                class("C_9A", "9A", 9),
            ],
            weeks: vec![
                week("W_01", "Tuần 1", "M_09"),
                week("W_02", "Tuần 2", "M_09"),
                week("W_03", "Tuần 3", "M_09"),
                week("W_04", "Tuần 4", "M_10"),
            ],
            faults: vec![
                fault("F_01", "Đi học muộn", -2.0, FaultKind::Minus),
                fault("F_02", "Không đồng phục", -2.0, FaultKind::Minus),
                fault("F_03", "Vệ sinh bẩn", -5.0, FaultKind::Minus),
                fault("F_04", "Nói chuyện riêng", -1.0, FaultKind::Minus),
                fault("F_05", "Đạt điểm tốt (Cả lớp)", 5.0, FaultKind::Plus),
                fault("F_06", "Tham gia phong trào", 10.0, FaultKind::Plus),
            ],
            entries: Vec::new(),
        }
    }

    /// Entries restricted to a single week, in log order.
    pub fn entries_for_week(&self, week_id: &str) -> Vec<ScoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.week_id == week_id)
            .cloned()
            .collect()
    }

    /// The last `n` entries of the log, newest first.
    pub fn recent_entries(&self, n: usize) -> Vec<&ScoreEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn find_class(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == class_id)
    }
}
