use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::collection::{Collection, MutationError};
use crate::models::Stored;

struct State<T> {
    rows: Vec<Stored<T>>,
    create_calls: usize,
    update_calls: usize,
    /// Planned failures keyed by the 1-based create call they answer.
    failures: HashMap<usize, MutationError>,
    list_failure: Option<MutationError>,
}

/// Collection held in process memory. Used for dry runs and tests; failures
/// can be scheduled for a given call.
pub struct InMemoryCollection<T> {
    state: Mutex<State<T>>,
}

impl<T> InMemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                rows: Vec::new(),
                create_calls: 0,
                update_calls: 0,
                failures: HashMap::new(),
                list_failure: None,
            }),
        }
    }

    pub fn with_rows(rows: Vec<Stored<T>>) -> Self {
        let collection = Self::new();
        collection.lock().rows = rows;
        collection
    }

    /// Makes the `call`-th create (1-based) fail with `error`.
    pub fn fail_create(&self, call: usize, error: MutationError) {
        self.lock().failures.insert(call, error);
    }

    pub fn fail_list(&self, error: MutationError) {
        self.lock().list_failure = Some(error);
    }

    /// Number of create calls issued, failed ones included.
    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State<T>> {
        // A poisoned lock only means a test panicked mid-call; the rows are
        // still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone> InMemoryCollection<T> {
    pub fn rows(&self) -> Vec<Stored<T>> {
        self.lock().rows.clone()
    }
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Collection<T> for InMemoryCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    async fn list(&self) -> Result<Vec<Stored<T>>, MutationError> {
        let state = self.lock();
        match &state.list_failure {
            Some(error) => Err(error.clone()),
            None => Ok(state.rows.clone()),
        }
    }

    async fn create(&self, payload: &T) -> Result<Stored<T>, MutationError> {
        let mut state = self.lock();
        state.create_calls += 1;
        let call = state.create_calls;
        if let Some(error) = state.failures.remove(&call) {
            return Err(error);
        }
        let row = Stored {
            id: Uuid::new_v4(),
            created_at: Some(Utc::now()),
            data: payload.clone(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, payload: &T) -> Result<Stored<T>, MutationError> {
        let mut state = self.lock();
        state.update_calls += 1;
        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| MutationError::new("Record not found"))?;
        row.data = payload.clone();
        Ok(row.clone())
    }
}
