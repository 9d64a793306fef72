//! Bookmarked employees.
//!
//! A [`BookmarkStore`] owns the set of bookmarked employee ids for a session
//! and writes it back to local storage after every change. The stored form
//! is a JSON array of integers under a single key.
//!
//! The in-memory set is authoritative. Unreadable stored data starts the
//! session empty, and a failed write leaves the store dirty until the next
//! successful write.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{Employee, EmployeeId};
use crate::storage::KeyValueStore;

/// Storage key holding the bookmark set.
pub const BOOKMARKS_KEY: &str = "hr-dashboard-bookmarks";

/// The set of bookmarked employee ids, synchronized with local storage.
#[derive(Debug)]
pub struct BookmarkStore<S> {
    storage: S,
    key: String,
    /// Insertion order, for display.
    order: Vec<EmployeeId>,
    members: HashSet<EmployeeId>,
    dirty: bool,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// Load bookmarks stored under [`BOOKMARKS_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, BOOKMARKS_KEY)
    }

    /// Load bookmarks stored under `key`.
    ///
    /// Never fails: a missing, empty, unreadable or malformed value yields an
    /// empty set and a warning in the log.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match storage.get(&key) {
            Ok(Some(raw)) => parse_ids(&key, &raw),
            Ok(None) => {
                debug!(key = %key, "No stored bookmarks");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read bookmarks, starting empty");
                Vec::new()
            }
        };

        let mut store = Self {
            storage,
            key,
            order: Vec::with_capacity(ids.len()),
            members: HashSet::with_capacity(ids.len()),
            dirty: false,
        };
        for id in ids {
            if store.members.insert(id) {
                store.order.push(id);
            }
        }
        debug!(count = store.order.len(), "Bookmarks loaded");
        store
    }

    /// Flip the bookmark state of `id` and persist the set.
    ///
    /// Returns the new membership: `true` if `id` is now bookmarked.
    pub fn toggle(&mut self, id: EmployeeId) -> bool {
        let bookmarked = if self.members.remove(&id) {
            self.order.retain(|&existing| existing != id);
            info!(id, "Bookmark removed");
            false
        } else {
            self.members.insert(id);
            self.order.push(id);
            info!(id, "Bookmark added");
            true
        };

        self.dirty = true;
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Failed to persist bookmarks, keeping them in memory");
        }
        bookmarked
    }

    /// Whether `id` is bookmarked.
    #[must_use]
    pub fn is_bookmarked(&self, id: EmployeeId) -> bool {
        self.members.contains(&id)
    }

    /// Bookmarked ids in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[EmployeeId] {
        &self.order
    }

    /// Number of bookmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is bookmarked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the last write to storage failed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The bookmarked subset of `employees`, in their original order.
    #[must_use]
    pub fn filter_bookmarked<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees
            .iter()
            .filter(|employee| self.is_bookmarked(employee.id))
            .collect()
    }

    /// Write the full set to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails. The
    /// store stays dirty in that case.
    pub fn persist(&mut self) -> Result<()> {
        let serialized = serde_json::to_string(&self.order)?;
        self.storage.set(&self.key, &serialized)?;
        self.dirty = false;
        Ok(())
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage backend back.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn parse_ids(key: &str, raw: &str) -> Vec<EmployeeId> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<EmployeeId>>(raw) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(key, error = %e, "Discarding malformed stored bookmarks");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::test_employee;
    use crate::storage::{MemoryStore, SqliteStore};
    use std::cell::Cell;
    use std::rc::Rc;

    /// A `MemoryStore` whose writes fail while the shared flag is set.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: Rc<Cell<bool>>,
    }

    impl FlakyStore {
        /// Store that starts out failing, plus the switch controlling it.
        fn failing() -> (Self, Rc<Cell<bool>>) {
            let switch = Rc::new(Cell::new(true));
            let store = Self {
                inner: MemoryStore::new(),
                fail_writes: Rc::clone(&switch),
            };
            (store, switch)
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(Error::storage_write(key, "quota exceeded"));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<bool> {
            self.inner.remove(key)
        }
    }

    /// Every read fails.
    #[derive(Debug, Default)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(Error::invalid_response(key, "storage unavailable"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn stored(store: &BookmarkStore<MemoryStore>) -> Option<String> {
        store.storage().get(BOOKMARKS_KEY).unwrap()
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = BookmarkStore::load(MemoryStore::new());
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_load_empty_string_is_empty() {
        let store = BookmarkStore::load(MemoryStore::with_entry(BOOKMARKS_KEY, ""));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        crate::logging::init_test_logging();
        for raw in ["not json", "{\"a\":1}", "[1, \"two\"]", "[1.5]"] {
            let store = BookmarkStore::load(MemoryStore::with_entry(BOOKMARKS_KEY, raw));
            assert!(store.is_empty(), "expected empty set for {raw:?}");
        }
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        let store = BookmarkStore::load(BrokenStore);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_collapses_duplicates() {
        let store = BookmarkStore::load(MemoryStore::with_entry(BOOKMARKS_KEY, "[3, 1, 3, 2, 1]"));
        assert_eq!(store.ids(), &[3, 1, 2]);
    }

    #[test]
    fn test_toggle_seven_twice() {
        let mut store = BookmarkStore::load(MemoryStore::new());

        assert!(store.toggle(7));
        assert!(store.is_bookmarked(7));
        assert_eq!(stored(&store).as_deref(), Some("[7]"));

        assert!(!store.toggle(7));
        assert!(!store.is_bookmarked(7));
        assert_eq!(stored(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_toggle_parity() {
        let mut store = BookmarkStore::load(MemoryStore::new());
        let sequence = [4, 9, 4, 4, 2, 9, 4, 11];

        for &id in &sequence {
            store.toggle(id);
        }

        for id in [2, 4, 9, 11, 13] {
            let toggles = sequence.iter().filter(|&&x| x == id).count();
            assert_eq!(store.is_bookmarked(id), toggles % 2 == 1, "id {id}");
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut store = BookmarkStore::load(MemoryStore::new());
        store.toggle(5);
        store.toggle(1);
        store.toggle(3);
        store.toggle(1);
        store.toggle(1);

        assert_eq!(store.ids(), &[5, 3, 1]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let mut store = BookmarkStore::load(MemoryStore::new());
        for id in [12, 3, 40] {
            store.toggle(id);
        }
        let before: HashSet<EmployeeId> = store.ids().iter().copied().collect();

        let reloaded = BookmarkStore::load(store.into_storage());
        let after: HashSet<EmployeeId> = reloaded.ids().iter().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_round_trip_through_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hrdash.db");

        {
            let mut store = BookmarkStore::load(SqliteStore::open(&path).unwrap());
            store.toggle(1);
            store.toggle(8);
        }

        let store = BookmarkStore::load(SqliteStore::open(&path).unwrap());
        assert_eq!(store.ids(), &[1, 8]);
    }

    #[test]
    fn test_custom_key() {
        let mut store = BookmarkStore::load_with_key(MemoryStore::new(), "other");
        store.toggle(2);

        assert_eq!(store.key(), "other");
        assert_eq!(store.storage().get("other").unwrap().as_deref(), Some("[2]"));
        assert!(store.storage().get(BOOKMARKS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let (storage, _switch) = FlakyStore::failing();
        let mut store = BookmarkStore::load(storage);

        assert!(store.toggle(3));
        assert!(store.is_bookmarked(3));
        assert!(store.is_dirty());
        assert!(store.persist().is_err());
        assert!(store.is_dirty());
    }

    #[test]
    fn test_dirty_cleared_by_successful_persist() {
        let (storage, switch) = FlakyStore::failing();
        let mut store = BookmarkStore::load(storage);

        assert!(store.toggle(7));
        assert!(store.is_dirty());
        assert!(store.storage().get(BOOKMARKS_KEY).unwrap().is_none());

        switch.set(false);
        store.persist().unwrap();

        assert!(!store.is_dirty());
        assert_eq!(
            store.storage().get(BOOKMARKS_KEY).unwrap().as_deref(),
            Some("[7]")
        );
    }

    #[test]
    fn test_dirty_cleared_by_next_successful_toggle() {
        let (storage, switch) = FlakyStore::failing();
        let mut store = BookmarkStore::load(storage);

        store.toggle(7);
        assert!(store.is_dirty());

        switch.set(false);
        assert!(store.toggle(8));

        assert!(!store.is_dirty());
        assert_eq!(
            store.storage().get(BOOKMARKS_KEY).unwrap().as_deref(),
            Some("[7,8]")
        );
    }

    #[test]
    fn test_filter_bookmarked() {
        let employees = vec![
            test_employee(1, "Sales", 3),
            test_employee(2, "Sales", 4),
            test_employee(3, "HR", 5),
        ];
        let mut store = BookmarkStore::load(MemoryStore::new());
        store.toggle(3);
        store.toggle(1);
        store.toggle(99);

        let ids: Vec<EmployeeId> = store
            .filter_bookmarked(&employees)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
