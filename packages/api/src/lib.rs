//! # API crate — the in-process mock backend
//!
//! There is no server behind the app yet. This crate stands in for one: it
//! implements the [`store::AuthBackend`] and [`store::CourseSource`] seams with
//! fixed data and simulated round-trip latency, so the stores and the screens
//! built on them behave as they would against a network service.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`MockAuthBackend`]: the single accepted credential pair, registration with timestamp-derived ids, the mock session token. |
//! | [`catalog`] | [`MockCatalog`]: the built-in course collection, filter and search over it. |
//! | [`latency`] | Platform-aware simulated delay (`tokio` natively, `gloo-timers` on WASM). |
//!
//! Swapping in a real backend means providing other implementations of the two
//! traits; nothing in `store` changes.

pub mod auth;
pub mod catalog;
pub mod latency;

pub use auth::MockAuthBackend;
pub use catalog::MockCatalog;
pub use store::{Course, CourseFilters, User, UniCourseConfig};
