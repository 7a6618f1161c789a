//! # Key-value storage — the persistence seam for both stores
//!
//! Session and favorites persistence is a handful of string blobs under fixed
//! keys. All reads and writes go through the [`KeyValueStore`] trait, so the
//! same store logic works against an in-memory map (tests), the filesystem
//! (desktop / mobile) or IndexedDB (web). Implementations live in sibling
//! modules ([`crate::memory`], [`crate::file_store`], `crate::idb`).
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`USER_TOKEN_KEY`] | Opaque session token. |
//! | [`USER_DATA_KEY`] | JSON-serialized [`crate::User`]. |
//! | [`FAVORITES_KEY`] | JSON list of course ids. |
//!
//! ## Helpers
//!
//! [`get_json`] / [`set_json`] wrap serde_json around a key. [`write_pair`]
//! writes two keys and restores the first one when the second write fails, so
//! a failed login never leaves a token without its user record.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub const USER_TOKEN_KEY: &str = "userToken";
pub const USER_DATA_KEY: &str = "userData";
pub const FAVORITES_KEY: &str = "favorites";

/// Async string key-value storage.
///
/// Removing a key that does not exist must succeed.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>>;
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>>;
}

/// Read and deserialize a JSON value. `Ok(None)` when the key is absent.
pub async fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize a value to JSON and store it under `key`.
pub async fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}

/// Write `first` then `second`. If the second write fails, the first key is
/// put back to what it held before (or removed if it was absent) and the
/// second write's error is returned.
pub async fn write_pair<S: KeyValueStore>(
    store: &S,
    first: (&str, &str),
    second: (&str, &str),
) -> Result<()> {
    let (first_key, first_value) = first;
    let (second_key, second_value) = second;

    let previous = store.get(first_key).await?;
    store.set(first_key, first_value).await?;

    if let Err(err) = store.set(second_key, second_value).await {
        let rollback = match previous.as_deref() {
            Some(old) => store.set(first_key, old).await,
            None => store.remove(first_key).await,
        };
        if let Err(rollback_err) = rollback {
            tracing::warn!(
                key = first_key,
                error = %rollback_err,
                "failed to roll back paired write"
            );
        }
        return Err(err);
    }
    Ok(())
}
