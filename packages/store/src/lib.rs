pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod kv;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use catalog::{CatalogState, CatalogStore, CourseSource};
pub use config::UniCourseConfig;
pub use error::StoreError;
pub use kv::KeyValueStore;
pub use models::{Course, CourseFilters, CourseSchedule, User};
pub use session::{AuthBackend, AuthGrant, SessionPhase, SessionState, SessionStore};
