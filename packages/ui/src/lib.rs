//! This crate wires the session and catalog stores into the Dioxus component tree.
//!
//! Wrap the app in [`SessionProvider`] and [`CatalogProvider`]; screens then use
//! [`use_session`], [`use_catalog`] and [`use_favorites`]. To override the
//! on-disk `unicourse.toml`, provide a [`store::UniCourseConfig`] context above
//! the providers.

use dioxus::prelude::*;
use store::UniCourseConfig;

mod config;
pub use config::load_config;
#[cfg(not(target_arch = "wasm32"))]
pub use config::load_config_from;

mod storage;
pub use storage::{make_catalog, make_session, make_storage, AppCatalog, AppSession, PlatformStore};

mod auth;
pub use auth::{use_session, LogoutButton, SessionHandle, SessionProvider};

mod catalog;
pub use catalog::{use_catalog, use_favorites, CatalogHandle, CatalogProvider, FavoriteButton, Favorites};

/// The config from context if one was provided, otherwise `unicourse.toml`.
pub fn use_config() -> UniCourseConfig {
    use_hook(|| try_consume_context::<UniCourseConfig>().unwrap_or_else(load_config))
}
