use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lather_core::calendar::{days_in_month, first_of_month};
use lather_core::{CalendarOptions, Clock, Day, GridCell, SystemClock};
use lather_store::{KeyValueStore, StorageError};
use serde_json::Value;

use crate::error::LedgerError;
use crate::grid;

/// Storage key of the ledger. The value is a sorted JSON array of
/// `YYYY-MM-DD` strings with no duplicates.
pub const LEDGER_KEY: &str = "showerDates";

/// Deduplicated record of shower days.
///
/// The set is loaded at [`EventLedger::open`] and cached behind a mutex.
/// [`EventLedger::record`] merges into the value currently in the store
/// through [`KeyValueStore::update`] and then refreshes the cache, so neither
/// threads sharing a ledger nor separate ledgers on the same store lose days.
pub struct EventLedger {
    store: Arc<dyn KeyValueStore>,
    days: Mutex<BTreeSet<Day>>,
    options: CalendarOptions,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for EventLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLedger")
            .field("days", &self.lock().len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl EventLedger {
    /// Load the ledger from `store` using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the store cannot be read or holds
    /// something other than an array of canonical day strings.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        options: CalendarOptions,
    ) -> Result<Self, LedgerError> {
        Self::open_with_clock(store, options, Arc::new(SystemClock))
    }

    /// Load the ledger with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`EventLedger::open`].
    pub fn open_with_clock(
        store: Arc<dyn KeyValueStore>,
        options: CalendarOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let days = load(store.as_ref())?;
        tracing::debug!(days = days.len(), "ledger loaded");
        Ok(Self {
            store,
            days: Mutex::new(days),
            options,
            clock,
        })
    }

    /// Record `day`. Returns `true` if it was new, `false` if already present.
    ///
    /// The day is merged into the stored array as it is at the time of the
    /// call, not into the cached set, and is persisted before this returns.
    /// If persisting fails the cached set is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the stored value cannot be read or
    /// the write fails.
    pub fn record(&self, day: impl Into<Day>) -> Result<bool, LedgerError> {
        let day = day.into();
        let mut days = self.lock();

        let mut merged = None;
        self.store.update(LEDGER_KEY, &mut |current| {
            let mut latest = parse(current)?;
            let added = latest.insert(day);
            let replacement = added.then(|| to_value(&latest));
            merged = Some((latest, added));
            Ok(replacement)
        })?;

        let Some((latest, added)) = merged else {
            return Ok(false);
        };
        *days = latest;
        if added {
            tracing::info!(%day, total = days.len(), "recorded day");
        } else {
            tracing::debug!(%day, "day already recorded");
        }
        Ok(added)
    }

    /// Record the clock's current day.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the write fails.
    pub fn record_today(&self) -> Result<bool, LedgerError> {
        self.record(self.clock.today())
    }

    /// Every recorded day.
    #[must_use]
    pub fn all_dates(&self) -> BTreeSet<Day> {
        self.lock().clone()
    }

    #[must_use]
    pub fn contains(&self, day: impl Into<Day>) -> bool {
        self.lock().contains(&day.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of recorded days in `year`-`month`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Calendar`] if `month` is outside `1..=12`.
    pub fn count_in_month(&self, year: i32, month: u32) -> Result<usize, LedgerError> {
        let first = first_of_month(year, month)?;
        let length = days_in_month(year, month)?;
        let last = first + chrono::Days::new(u64::from(length - 1));
        Ok(self.count_in_range(Day::new(first), Day::new(last)))
    }

    /// Number of recorded days in `start..=end`. An inverted range counts zero.
    #[must_use]
    pub fn count_in_range(&self, start: Day, end: Day) -> usize {
        if start > end {
            return 0;
        }
        self.lock().range(start..=end).count()
    }

    /// Number of recorded days from one year ago through today.
    #[must_use]
    pub fn count_last_year(&self) -> usize {
        let today = self.clock.today();
        self.count_in_range(grid::year_before(today), today)
    }

    /// Month grid for the month containing `anchor`.
    #[must_use]
    pub fn build_month_grid(&self, anchor: impl Into<Day>) -> Vec<GridCell> {
        let days = self.lock();
        grid::month_grid(anchor.into(), self.clock.today(), self.options, |d| {
            days.contains(&d)
        })
    }

    /// One-year heatmap ending today.
    #[must_use]
    pub fn build_year_heatmap(&self) -> Vec<GridCell> {
        let days = self.lock();
        grid::year_heatmap(self.clock.today(), self.options, |d| days.contains(&d))
    }

    #[must_use]
    pub fn today(&self) -> Day {
        self.clock.today()
    }

    #[must_use]
    pub const fn options(&self) -> CalendarOptions {
        self.options
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<Day>> {
        self.days.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load(store: &dyn KeyValueStore) -> Result<BTreeSet<Day>, StorageError> {
    parse(store.get(LEDGER_KEY)?)
}

fn parse(value: Option<Value>) -> Result<BTreeSet<Day>, StorageError> {
    let Some(value) = value else {
        return Ok(BTreeSet::new());
    };
    let Value::Array(items) = value else {
        return Err(StorageError::corrupt(LEDGER_KEY, "expected an array of day strings"));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(raw) => raw
                .parse::<Day>()
                .map_err(|e| StorageError::corrupt(LEDGER_KEY, e.to_string())),
            other => Err(StorageError::corrupt(
                LEDGER_KEY,
                format!("expected a day string, found {other}"),
            )),
        })
        .collect()
}

fn to_value(days: &BTreeSet<Day>) -> Value {
    Value::Array(days.iter().map(|d| Value::String(d.to_string())).collect())
}

#[cfg(test)]
mod tests {
    use lather_core::FixedClock;
    use lather_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn day(raw: &str) -> Day {
        raw.parse().unwrap()
    }

    fn ledger_on(store: Arc<dyn KeyValueStore>, today: &str) -> EventLedger {
        EventLedger::open_with_clock(
            store,
            CalendarOptions::default(),
            Arc::new(FixedClock(day(today))),
        )
        .unwrap()
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::corrupt(key, "read-only"))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::corrupt(key, "read-only"))
        }
    }

    #[test]
    fn recording_twice_keeps_one_entry() {
        let store = Arc::new(MemoryStore::new());
        let ledger = ledger_on(store.clone(), "2024-03-10");

        assert!(ledger.record(day("2024-03-01")).unwrap());
        assert!(!ledger.record(day("2024-03-01")).unwrap());

        let all: Vec<String> = ledger.all_dates().iter().map(ToString::to_string).collect();
        assert_eq!(all, vec!["2024-03-01"]);
        assert_eq!(ledger.count_in_month(2024, 3).unwrap(), 1);
        assert_eq!(store.get(LEDGER_KEY).unwrap(), Some(json!(["2024-03-01"])));
    }

    #[test]
    fn record_today_uses_the_clock() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-10");
        assert!(ledger.record_today().unwrap());
        assert!(ledger.contains(day("2024-03-10")));
        assert!(!ledger.contains(day("2024-03-09")));
    }

    #[test]
    fn persisted_array_is_sorted_and_unique() {
        let store = Arc::new(MemoryStore::new());
        let ledger = ledger_on(store.clone(), "2024-03-10");
        for raw in ["2024-03-05", "2024-01-02", "2024-03-05", "2023-12-31"] {
            ledger.record(day(raw)).unwrap();
        }
        assert_eq!(
            store.get(LEDGER_KEY).unwrap(),
            Some(json!(["2023-12-31", "2024-01-02", "2024-03-05"]))
        );
    }

    #[test]
    fn count_in_month_only_counts_that_month() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-10");
        for raw in ["2024-02-29", "2024-03-01", "2024-03-31", "2023-03-15", "2024-04-01"] {
            ledger.record(day(raw)).unwrap();
        }
        assert_eq!(ledger.count_in_month(2024, 3).unwrap(), 2);
        assert_eq!(ledger.count_in_month(2024, 2).unwrap(), 1);
        assert_eq!(ledger.count_in_month(2023, 3).unwrap(), 1);
        assert_eq!(ledger.count_in_month(2024, 5).unwrap(), 0);
    }

    #[test]
    fn count_in_month_rejects_bad_month() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-10");
        assert!(matches!(
            ledger.count_in_month(2024, 13),
            Err(LedgerError::Calendar(_))
        ));
    }

    #[test]
    fn count_last_year_is_inclusive_window() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-15");
        for raw in ["2023-03-14", "2023-03-15", "2024-01-01", "2024-03-15", "2024-03-16"] {
            ledger.record(day(raw)).unwrap();
        }
        assert_eq!(ledger.count_last_year(), 3);
    }

    #[test]
    fn inverted_range_counts_zero() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-15");
        ledger.record(day("2024-03-01")).unwrap();
        assert_eq!(ledger.count_in_range(day("2024-03-31"), day("2024-03-01")), 0);
    }

    #[test]
    fn failed_persist_leaves_set_unchanged() {
        let ledger = ledger_on(Arc::new(ReadOnlyStore(MemoryStore::new())), "2024-03-10");
        let result = ledger.record(day("2024-03-01"));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert!(ledger.is_empty());
        assert!(!ledger.contains(day("2024-03-01")));
    }

    #[test]
    fn record_merges_days_written_by_another_ledger() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let first = ledger_on(Arc::clone(&store), "2024-03-10");
        let second = ledger_on(Arc::clone(&store), "2024-03-10");

        assert!(second.record(day("2024-03-01")).unwrap());
        assert!(first.record(day("2024-03-02")).unwrap());
        assert!(!first.record(day("2024-03-01")).unwrap());

        assert_eq!(first.len(), 2);
        assert_eq!(
            store.get(LEDGER_KEY).unwrap(),
            Some(json!(["2024-03-01", "2024-03-02"]))
        );
    }

    #[test]
    fn record_refuses_to_overwrite_a_corrupt_value() {
        let store = Arc::new(MemoryStore::new());
        let ledger = ledger_on(store.clone(), "2024-03-10");
        store.set(LEDGER_KEY, json!("not an array")).unwrap();

        assert!(matches!(
            ledger.record(day("2024-03-01")),
            Err(LedgerError::Storage(StorageError::Corrupt { .. }))
        ));
        assert_eq!(store.get(LEDGER_KEY).unwrap(), Some(json!("not an array")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn corrupt_entries_fail_open() {
        let store = Arc::new(MemoryStore::new());
        store.set(LEDGER_KEY, json!(["2024-03-01", "yesterday"])).unwrap();
        let result = EventLedger::open(store, CalendarOptions::default());
        assert!(matches!(
            result,
            Err(LedgerError::Storage(StorageError::Corrupt { .. }))
        ));
    }

    #[test]
    fn non_array_value_fails_open() {
        let store = Arc::new(MemoryStore::new());
        store.set(LEDGER_KEY, json!({"2024-03-01": true})).unwrap();
        assert!(EventLedger::open(store, CalendarOptions::default()).is_err());
    }

    #[test]
    fn stored_duplicates_collapse_on_load() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(LEDGER_KEY, json!(["2024-03-01", "2024-03-01"]))
            .unwrap();
        let ledger = ledger_on(store, "2024-03-10");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn month_grid_reflects_ledger() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-10");
        ledger.record(day("2024-03-10")).unwrap();

        let grid = ledger.build_month_grid(day("2024-03-01"));
        assert_eq!(grid.len(), 42);
        let hit = grid
            .iter()
            .find(|c| c.date() == Some(day("2024-03-10")))
            .unwrap();
        assert_eq!(
            *hit,
            GridCell::Day {
                date: day("2024-03-10"),
                is_today: true,
                has_event: true,
            }
        );
    }

    #[test]
    fn heatmap_counts_match_last_year() {
        let ledger = ledger_on(Arc::new(MemoryStore::new()), "2024-03-15");
        for raw in ["2023-03-01", "2023-06-01", "2024-03-15"] {
            ledger.record(day(raw)).unwrap();
        }
        let heatmap = ledger.build_year_heatmap();
        let marked = heatmap.iter().filter(|c| c.has_event()).count();
        assert_eq!(marked, ledger.count_last_year());
        assert_eq!(marked, 2);
    }
}
