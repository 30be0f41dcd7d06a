use parking_lot::Mutex;

use super::repo_types::{DailyTotals, LogEntry};
use crate::parse::round2;

/// Today's intake, shared between request handlers.
///
/// Every operation takes the lock for its whole duration, so a reader never
/// observes a half-cleared log.
#[derive(Debug, Default)]
pub struct DailyLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: LogEntry) {
        self.entries.lock().push(entry);
    }

    /// Empties the log, returning how many entries were dropped.
    pub fn clear(&self) -> usize {
        std::mem::take(&mut *self.entries.lock()).len()
    }

    /// Snapshot in insertion order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Recomputed on every call; nothing is cached.
    pub fn totals(&self) -> DailyTotals {
        sum_rounded(&self.entries.lock())
    }

    /// Entries and their totals read under a single lock, so the rows
    /// always add up to the totals shown next to them.
    pub fn snapshot(&self) -> (Vec<LogEntry>, DailyTotals) {
        let entries = self.entries.lock();
        (entries.clone(), sum_rounded(&entries))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

fn sum_rounded(entries: &[LogEntry]) -> DailyTotals {
    let sum = entries.iter().fold(DailyTotals::default(), |mut acc, e| {
        acc.calories += e.calories;
        acc.protein += e.protein;
        acc.carbs += e.carbs;
        acc.fat += e.fat;
        acc.fiber += e.fiber;
        acc
    });
    DailyTotals {
        calories: round2(sum.calories),
        protein: round2(sum.protein),
        carbs: round2(sum.carbs),
        fat: round2(sum.fat),
        fiber: round2(sum.fiber),
    }
}
