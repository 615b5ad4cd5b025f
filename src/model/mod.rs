pub mod storage;
pub mod types;

pub use storage::load_snapshot;
pub use types::{Class, Fault, FaultKind, ScoreEntry, Snapshot, Week};
