//! Create and edit flows behind the form screens.
//!
//! A flow validates form input, issues the mutation(s), then reports the
//! outcome through the snackbar and navigates back on success. Nothing else
//! is observable: validation failures stay inline on the form, and a failed
//! mutation keeps the user on the screen so they can retry.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::collection::{Collection, MutationError};
use super::notifications::{NotificationKind, NotificationStore};
use crate::models::Stored;
use crate::validation::{validate_form, FormErrors, FormSchema, FORM_KEY};

/// Screen stack the flows pop after a successful save.
pub trait Navigator: Send + Sync {
    fn back(&self);
}

/// Navigator that only counts `back` calls; used headless.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    backs: AtomicUsize,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn back_count(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reference collection a form needs before it can be filled in (coaches,
/// parents, courts...).
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<R> {
    Pending,
    Ready(Vec<Stored<R>>),
    Failed(String),
}

impl<R> Default for Reference<R> {
    fn default() -> Self {
        Reference::Pending
    }
}

impl<R> Reference<R>
where
    R: Serialize + DeserializeOwned + Send + Sync,
{
    /// Loads the collection. Failures are kept as state, never raised; the
    /// form shows an empty picker with the message.
    pub async fn load(collection: &dyn Collection<R>) -> Self {
        match collection.list().await {
            Ok(rows) => Reference::Ready(rows),
            Err(e) => {
                warn!("reference load failed: {e}");
                Reference::Failed(e.user_message().to_string())
            }
        }
    }
}

impl<R> Reference<R> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Reference::Pending)
    }

    /// Loaded with no rows.
    pub fn is_empty(&self) -> bool {
        matches!(self, Reference::Ready(rows) if rows.is_empty())
    }

    pub fn items(&self) -> &[Stored<R>] {
        match self {
            Reference::Ready(rows) => rows,
            _ => &[],
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// Input rejected; no mutation was issued.
    Invalid(FormErrors),
    /// Every record was saved, in input order.
    Saved(Vec<Stored<T>>),
    /// Mutation `failed_index` failed. Rows in `committed` were saved before
    /// it and stay saved; later items were never sent.
    Failed {
        error: MutationError,
        committed: Vec<Stored<T>>,
        failed_index: usize,
    },
}

impl<T> SubmitOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }

    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            SubmitOutcome::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

pub struct CreateFlow<'a, T: FormSchema + Send + Sync> {
    collection: &'a dyn Collection<T>,
    notifications: &'a NotificationStore,
    navigator: &'a dyn Navigator,
}

impl<'a, T: FormSchema + Send + Sync> CreateFlow<'a, T> {
    pub fn new(
        collection: &'a dyn Collection<T>,
        notifications: &'a NotificationStore,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            collection,
            notifications,
            navigator,
        }
    }

    pub async fn submit(&self, input: &Value) -> SubmitOutcome<T> {
        match validate_form::<T>(input) {
            Ok(payload) => self.create_all(vec![payload]).await,
            Err(errors) => {
                debug!(entity = T::LABEL, %errors, "form rejected");
                SubmitOutcome::Invalid(errors)
            }
        }
    }

    /// Creates one record per input from a single form interaction.
    ///
    /// Every item is validated before anything is sent. Mutations then run
    /// one at a time in input order; the first failure stops the batch.
    /// There is no rollback: rows saved before the failure remain.
    pub async fn submit_batch(&self, inputs: &[Value]) -> SubmitOutcome<T> {
        let mut errors = FormErrors::new();
        if inputs.is_empty() {
            errors.add(FORM_KEY, "Nothing to submit");
            return SubmitOutcome::Invalid(errors);
        }

        let mut payloads = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            match validate_form::<T>(input) {
                Ok(payload) => payloads.push(payload),
                Err(e) => errors.extend(e.prefixed(&format!("items[{index}]"))),
            }
        }
        if !errors.is_empty() {
            debug!(entity = T::LABEL, %errors, "batch rejected");
            return SubmitOutcome::Invalid(errors);
        }

        self.create_all(payloads).await
    }

    async fn create_all(&self, payloads: Vec<T>) -> SubmitOutcome<T> {
        let total = payloads.len();
        let mut committed = Vec::with_capacity(total);

        for (index, payload) in payloads.iter().enumerate() {
            match self.collection.create(payload).await {
                Ok(row) => committed.push(row),
                Err(error) => {
                    warn!(
                        entity = T::LABEL,
                        committed = committed.len(),
                        failed_index = index,
                        total,
                        "create failed: {error}"
                    );
                    self.notifications
                        .show(error.user_message(), NotificationKind::Error);
                    return SubmitOutcome::Failed {
                        error,
                        committed,
                        failed_index: index,
                    };
                }
            }
        }

        info!(entity = T::LABEL, count = total, "records created");
        self.notifications
            .show(created_message::<T>(total), NotificationKind::Success);
        self.navigator.back();
        SubmitOutcome::Saved(committed)
    }
}

/// Edit screens: same pipeline, one `update` call.
pub struct UpdateFlow<'a, T: FormSchema + Send + Sync> {
    collection: &'a dyn Collection<T>,
    notifications: &'a NotificationStore,
    navigator: &'a dyn Navigator,
}

impl<'a, T: FormSchema + Send + Sync> UpdateFlow<'a, T> {
    pub fn new(
        collection: &'a dyn Collection<T>,
        notifications: &'a NotificationStore,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            collection,
            notifications,
            navigator,
        }
    }

    pub async fn submit(&self, id: Uuid, input: &Value) -> SubmitOutcome<T> {
        let payload = match validate_form::<T>(input) {
            Ok(payload) => payload,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match self.collection.update(id, &payload).await {
            Ok(row) => {
                info!(entity = T::LABEL, %id, "record updated");
                self.notifications.show(
                    format!("{} updated", capitalize(T::LABEL)),
                    NotificationKind::Success,
                );
                self.navigator.back();
                SubmitOutcome::Saved(vec![row])
            }
            Err(error) => {
                warn!(entity = T::LABEL, %id, "update failed: {error}");
                self.notifications
                    .show(error.user_message(), NotificationKind::Error);
                SubmitOutcome::Failed {
                    error,
                    committed: Vec::new(),
                    failed_index: 0,
                }
            }
        }
    }
}

fn created_message<T: FormSchema>(count: usize) -> String {
    if count == 1 {
        format!("{} created", capitalize(T::LABEL))
    } else {
        format!("Created {count} {}", T::PLURAL)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
