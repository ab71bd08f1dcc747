//! Check orchestration and aggregation.

pub mod checklist;
pub mod verdict;

pub use checklist::{Checklist, ChecklistProgress};
pub use verdict::Verdict;
