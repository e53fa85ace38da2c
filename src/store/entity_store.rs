// Entity Store - generic in-memory collection holding all live records of
// one type. The store exclusively owns its records: every read hands back a
// detached clone, and mutation happens only inside store write operations.

use std::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Implemented by every stored entity type. Supplies raw id access for the
/// store's id assignment and the label used in error messages.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn label() -> &'static str;
}

struct Inner<T> {
    records: Vec<T>,
    /// Highest id ever seen. Assigned ids are strictly increasing, so an id
    /// freed by deletion is never handed out again.
    high_water: i64,
}

pub struct EntityStore<T: Record> {
    inner: RwLock<Inner<T>>,
}

impl<T: Record> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                high_water: 0,
            }),
        }
    }

    /// Replace the collection wholesale with seed records.
    pub fn seed(&self, records: Vec<T>) {
        let mut inner = self.inner.write().unwrap();
        inner.high_water = records.iter().map(|r| r.id()).max().unwrap_or(0);
        inner.records = records;
    }

    /// Full detached copy of the collection, in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.inner.read().unwrap().records.clone()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.inner
            .read()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.inner.read().unwrap().records.iter().any(|r| r.id() == id)
    }

    /// Detached copies of every record matching the predicate.
    pub fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .unwrap()
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.inner
            .read()
            .unwrap()
            .records
            .iter()
            .find(|r| predicate(r))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record under a freshly assigned id and return its copy. The
    /// id is `max(existing ids) + 1` (1 for an empty store) and never one
    /// that an earlier record held.
    pub fn insert(&self, mut record: T) -> T {
        let mut inner = self.inner.write().unwrap();
        let id = inner.high_water + 1;
        inner.high_water = id;
        record.set_id(id);
        inner.records.push(record.clone());
        record
    }

    /// Mutate the record in place and return its updated copy.
    pub fn update_with(&self, id: i64, f: impl FnOnce(&mut T)) -> AppResult<T> {
        let mut inner = self.inner.write().unwrap();
        match inner.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                f(record);
                Ok(record.clone())
            }
            None => Err(AppError::NotFound(format!("{} not found", T::label()))),
        }
    }

    /// Remove the record and return the removed copy.
    pub fn remove(&self, id: i64) -> AppResult<T> {
        let mut inner = self.inner.write().unwrap();
        match inner.records.iter().position(|r| r.id() == id) {
            Some(index) => Ok(inner.records.remove(index)),
            None => Err(AppError::NotFound(format!("{} not found", T::label()))),
        }
    }

    /// Remove the first record matching the predicate.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> AppResult<T> {
        let mut inner = self.inner.write().unwrap();
        match inner.records.iter().position(|r| predicate(r)) {
            Some(index) => Ok(inner.records.remove(index)),
            None => Err(AppError::NotFound(format!("{} not found", T::label()))),
        }
    }
}

impl<T: Record> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
