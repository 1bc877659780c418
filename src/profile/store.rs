//! The key-value store capability behind the profile.
//!
//! The certificate core consumes the profile but does not own where it
//! lives; callers inject a [`ProfileStore`]. Two implementations are
//! provided: an in-memory map, and a JSON file for simple persistence
//! between runs.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{keys, Profile};
use crate::reason::Reason;

/// Errors raised by profile persistence.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile field '{0}' is missing from the store")]
    MissingField(&'static str),
    #[error("failed to access profile store at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("profile store content is not a valid JSON map: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Simple key-value storage for profile fields.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ProfileError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), ProfileError>;
    async fn remove(&self, key: &str) -> Result<(), ProfileError>;
    async fn keys(&self) -> Result<Vec<String>, ProfileError>;
}

/// Volatile in-memory store.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    fields: RwLock<HashMap<String, String>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.fields.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ProfileError> {
        self.fields.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ProfileError> {
        self.fields.write().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, ProfileError> {
        Ok(self.fields.read().keys().cloned().collect())
    }
}

/// Store persisted as a JSON object in a single file. Every write flushes
/// the whole map; the profile is a handful of short strings, so batching
/// is not worth the bookkeeping.
#[derive(Debug)]
pub struct JsonFileProfileStore {
    path: PathBuf,
    fields: RwLock<HashMap<String, String>>,
}

impl JsonFileProfileStore {
    /// Open the store, reading existing content. A missing file is an
    /// empty store, not an error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let path = path.into();
        let fields = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(ProfileError::Malformed)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(io_error(&path, source)),
        };

        Ok(Self {
            path,
            fields: RwLock::new(fields),
        })
    }

    async fn flush(&self) -> Result<(), ProfileError> {
        // Snapshot under the lock, write without it.
        let snapshot = self.fields.read().clone();
        let json = serde_json::to_vec_pretty(&snapshot).map_err(ProfileError::Malformed)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| io_error(&self.path, source))
    }
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.fields.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ProfileError> {
        self.fields.write().insert(key.to_string(), value.to_string());
        self.flush().await
    }

    async fn remove(&self, key: &str) -> Result<(), ProfileError> {
        self.fields.write().remove(key);
        self.flush().await
    }

    async fn keys(&self) -> Result<Vec<String>, ProfileError> {
        Ok(self.fields.read().keys().cloned().collect())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ProfileError {
    ProfileError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// A profile exists once its name has been saved.
pub async fn has_profile(store: &dyn ProfileStore) -> Result<bool, ProfileError> {
    Ok(store.get(keys::NAME).await?.is_some())
}

/// Assemble the profile from the store.
///
/// Returns `None` when no profile has been saved yet. A present profile
/// with a required field missing is a corrupted store and reported as
/// such; the optional fields degrade silently.
pub async fn load_profile(store: &dyn ProfileStore) -> Result<Option<Profile>, ProfileError> {
    if !has_profile(store).await? {
        return Ok(None);
    }

    let profile = Profile {
        name: required(store, keys::NAME).await?,
        birthday: required(store, keys::BIRTHDAY).await?,
        birthplace: store.get(keys::BIRTHPLACE).await?,
        address: required(store, keys::ADDRESS).await?,
        zipcode: required(store, keys::ZIPCODE).await?,
        town: required(store, keys::TOWN).await?,
        done_at: store.get(keys::DONE_AT).await?,
        signature: required(store, keys::SIGNATURE).await?,
    };

    Ok(Some(profile))
}

/// Persist every field of the profile.
pub async fn save_profile(store: &dyn ProfileStore, profile: &Profile) -> Result<(), ProfileError> {
    store.set(keys::NAME, &profile.name).await?;
    store.set(keys::BIRTHDAY, &profile.birthday).await?;
    store.set(keys::ADDRESS, &profile.address).await?;
    store.set(keys::ZIPCODE, &profile.zipcode).await?;
    store.set(keys::TOWN, &profile.town).await?;
    store.set(keys::SIGNATURE, &profile.signature).await?;

    match &profile.birthplace {
        Some(birthplace) => store.set(keys::BIRTHPLACE, birthplace).await?,
        None => store.remove(keys::BIRTHPLACE).await?,
    }
    match &profile.done_at {
        Some(done_at) => store.set(keys::DONE_AT, done_at).await?,
        None => store.remove(keys::DONE_AT).await?,
    }

    log::debug!("Profile for '{}' saved to the store", profile.name);
    Ok(())
}

/// The reason selected on the previous generation, when one was stored
/// and still parses as a known code.
pub async fn last_reason(store: &dyn ProfileStore) -> Result<Option<Reason>, ProfileError> {
    let stored = store.get(keys::LAST_REASON).await?;
    Ok(stored.as_deref().and_then(Reason::parse))
}

/// Remember the reason selected for this generation, so the next run can
/// preselect it. `None` is stored as the empty code.
pub async fn save_last_reason(
    store: &dyn ProfileStore,
    reason: Option<Reason>,
) -> Result<(), ProfileError> {
    store
        .set(keys::LAST_REASON, reason.map(|r| r.code()).unwrap_or(""))
        .await
}

async fn required(store: &dyn ProfileStore, key: &'static str) -> Result<String, ProfileError> {
    store.get(key).await?.ok_or(ProfileError::MissingField(key))
}
