//! Platform storage selection.
//!
//! Both stores persist through a [`store::KeyValueStore`] picked once at
//! startup:
//! - **Web** (WASM + `web` feature): IndexedDB via [`store::IdbStore`]
//! - **Desktop / Mobile** (native): files via [`store::FileStore`]
//! - **WASM without `web`**: in-memory [`store::MemoryStore`], nothing survives a reload

use store::UniCourseConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::IdbStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

pub type AppSession = store::SessionStore<PlatformStore, api::MockAuthBackend>;
pub type AppCatalog = store::CatalogStore<PlatformStore, api::MockCatalog>;

/// Create the platform-appropriate store for `config.storage.namespace`.
///
/// - **Web**: IndexedDB database named after the namespace
/// - **Desktop/Mobile**: `<data_dir>/<namespace>/`
pub fn make_storage(config: &UniCourseConfig) -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::IdbStore::with_name(&config.storage.namespace)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        let _ = config;
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(&config.storage.namespace);
        store::FileStore::new(base)
    }
}

pub fn make_session(config: &UniCourseConfig) -> AppSession {
    store::SessionStore::new(make_storage(config), api::MockAuthBackend::new(&config.auth))
}

pub fn make_catalog(config: &UniCourseConfig) -> AppCatalog {
    store::CatalogStore::new(make_storage(config), api::MockCatalog::new(&config.catalog))
}
