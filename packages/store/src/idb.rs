//! # IndexedDB key-value store — browser-side persistence
//!
//! [`IdbStore`] is the [`KeyValueStore`] implementation used on the **web
//! platform**, where there is no secure device storage. It persists entries
//! into the browser's IndexedDB via the [`rexie`] crate.
//!
//! ## Database schema
//!
//! One IndexedDB database (default name `"unicourse"`, version 1) with a single
//! object store:
//!
//! | IndexedDB store | Key | Value |
//! |-----------------|-----|-------|
//! | `"entries"` | storage key (e.g. `"userToken"`) | string (via `serde_wasm_bindgen`) |
//!
//! ## Connection management
//!
//! `IdbStore` only holds the database name and opens a fresh [`Rexie`]
//! connection per operation; `Rexie` is not `Clone` and the browser caches
//! IndexedDB connections internally.

use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use wasm_bindgen::JsValue;

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;

const DEFAULT_DB_NAME: &str = "unicourse";
const DB_VERSION: u32 = 1;
const ENTRIES_STORE: &str = "entries";

fn idb_err(err: rexie::Error) -> StoreError {
    StoreError::storage(format!("indexeddb: {err}"))
}

/// IndexedDB-backed KeyValueStore for the web platform.
#[derive(Clone, Debug)]
pub struct IdbStore {
    db_name: String,
}

impl Default for IdbStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdbStore {
    /// Store backed by the default `"unicourse"` database.
    pub fn new() -> Self {
        Self::with_name(DEFAULT_DB_NAME)
    }

    /// Store backed by a database with the given name.
    pub fn with_name(db_name: &str) -> Self {
        Self {
            db_name: db_name.to_string(),
        }
    }

    async fn open_db(&self) -> Result<Rexie> {
        Rexie::builder(&self.db_name)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(ENTRIES_STORE))
            .build()
            .await
            .map_err(idb_err)
    }
}

impl KeyValueStore for IdbStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadOnly)
            .map_err(idb_err)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_err)?;

        let Some(js_val) = store.get(JsValue::from_str(key)).await.map_err(idb_err)? else {
            return Ok(None);
        };
        let value: String = serde_wasm_bindgen::from_value(js_val)
            .map_err(|e| StoreError::storage(format!("indexeddb value for {key}: {e}")))?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(idb_err)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_err)?;

        let js_key = JsValue::from_str(key);
        let js_val = JsValue::from_str(value);
        store.put(&js_val, Some(&js_key)).await.map_err(idb_err)?;
        tx.done().await.map_err(idb_err)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(idb_err)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_err)?;

        store.delete(JsValue::from_str(key)).await.map_err(idb_err)?;
        tx.done().await.map_err(idb_err)?;
        Ok(())
    }
}
