//! Repositories over a [`KeyValueStore`].
//!
//! Each repository owns one key. Loads fail soft: a missing, unreadable or
//! corrupt value is logged and replaced by the default. Within a list, a
//! single entry that does not decode is skipped rather than discarding its
//! neighbours. Saves serialize the full record and issue exactly one `set`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::PersistenceError;
use crate::store::KeyValueStore;
use crate::types::{Banner, ChangeRequest, Project};

/// Key holding the JSON array of projects.
pub const PROJECTS_KEY: &str = "@glen_projects_v1";
/// Key holding the banner object.
pub const BANNER_KEY: &str = "@glen_banner_v1";
/// Key holding the JSON array of submitted change requests.
pub const REQUESTS_KEY: &str = "@requests";

fn load_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read store entry, using default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed store entry, using default");
            T::default()
        }
    }
}

/// Decodes each array entry on its own, dropping the ones that fail.
fn decode_entries<T: DeserializeOwned>(key: &str, entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "Skipping unreadable entry");
                None
            }
        })
        .collect()
}

fn save<S, T>(store: &S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json).map_err(|e| {
        tracing::error!(key, error = %e, "Failed to write store entry");
        PersistenceError::from(e)
    })
}

/// Canonical list of project records.
#[derive(Debug)]
pub struct ProjectRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ProjectRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the stored list. Empty when absent or not a JSON array.
    /// Records that do not decode are left out.
    pub fn load_all(&self) -> Vec<Project> {
        let entries: Vec<Value> = load_or_default(&self.store, PROJECTS_KEY);
        decode_entries(PROJECTS_KEY, entries)
    }

    /// Replaces the stored list in a single write.
    pub fn replace_all(&self, projects: &[Project]) -> Result<(), PersistenceError> {
        save(&self.store, PROJECTS_KEY, projects)?;
        tracing::info!(count = projects.len(), "Saved projects");
        Ok(())
    }

    /// Convenience lookup over [`load_all`](Self::load_all).
    pub fn find(&self, id: &str) -> Option<Project> {
        self.load_all().into_iter().find(|p| p.id == id)
    }
}

/// The single site-wide banner.
#[derive(Debug)]
pub struct BannerRepository<S> {
    store: S,
}

impl<S: KeyValueStore> BannerRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the banner. `{ text: "", color: "#cccccc" }` when absent or corrupt.
    pub fn load_banner(&self) -> Banner {
        load_or_default(&self.store, BANNER_KEY)
    }

    pub fn save_banner(&self, banner: &Banner) -> Result<(), PersistenceError> {
        save(&self.store, BANNER_KEY, banner)
    }
}

/// Local record of change requests sent to the administrator.
///
/// Entries are kept as raw JSON so requests logged by the mobile app, which
/// use a flat `{ ...values, timestamp, type }` layout, survive appends.
#[derive(Debug)]
pub struct RequestLog<S> {
    store: S,
}

impl<S: KeyValueStore> RequestLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Requests in the structured layout. Entries in other layouts are
    /// skipped.
    pub fn load_all(&self) -> Vec<ChangeRequest> {
        let entries: Vec<Value> = load_or_default(&self.store, REQUESTS_KEY);
        let total = entries.len();
        let requests: Vec<ChangeRequest> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if requests.len() < total {
            tracing::debug!(
                skipped = total - requests.len(),
                "Request log holds entries in another layout"
            );
        }
        requests
    }

    /// Appends a request to the stored log.
    ///
    /// Existing entries are carried over untouched. When the stored log
    /// cannot be read or is not a JSON array the append fails and nothing is
    /// written.
    pub fn append(&self, request: ChangeRequest) -> Result<(), PersistenceError> {
        let mut entries: Vec<Value> = match self.store.get(REQUESTS_KEY)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| {
                tracing::error!(key = REQUESTS_KEY, error = %source, "Request log is malformed");
                PersistenceError::Malformed {
                    key: REQUESTS_KEY.to_string(),
                    source,
                }
            })?,
        };
        entries.push(serde_json::to_value(&request)?);
        save(&self.store, REQUESTS_KEY, &entries)
    }
}
