//! Catalog context, favorites hook and favorite toggle button.

use dioxus::prelude::*;
use store::error::Result;
use store::{CatalogState, Course, CourseFilters};

use crate::storage::{make_catalog, AppCatalog};
use crate::use_config;

/// The catalog store plus a signal mirroring its state, shared by context.
#[derive(Clone)]
pub struct CatalogHandle {
    store: AppCatalog,
    state: Signal<CatalogState>,
}

impl CatalogHandle {
    /// Current catalog state. Reading it subscribes the calling component.
    pub fn state(&self) -> CatalogState {
        self.state.read().clone()
    }

    fn sync(&self) {
        let mut state = self.state;
        state.set(self.store.snapshot());
    }

    fn mark_loading(&self) {
        let mut state = self.state;
        let mut current = state.write();
        current.loading = true;
        current.error = None;
    }

    pub async fn fetch_courses(&self, filters: CourseFilters) -> Result<Vec<Course>> {
        self.mark_loading();
        let result = self.store.fetch_courses(filters).await;
        self.sync();
        result
    }

    pub async fn search_courses(&self, query: String) -> Result<Vec<Course>> {
        self.mark_loading();
        let result = self.store.search_courses(&query).await;
        self.sync();
        result
    }

    pub async fn load_favorites(&self) -> Result<Vec<String>> {
        let result = self.store.load_favorites().await;
        self.sync();
        result
    }

    pub async fn save_favorites(&self, ids: Vec<String>) -> Result<Vec<String>> {
        let result = self.store.save_favorites(ids).await;
        self.sync();
        result
    }

    pub async fn toggle_favorite_and_persist(&self, id: String) -> Result<bool> {
        let result = self.store.toggle_favorite_and_persist(&id).await;
        self.sync();
        result
    }

    pub fn set_search_query(&self, text: String) {
        self.store.set_search_query(text);
        self.sync();
    }

    pub fn set_filters(&self, filters: CourseFilters) {
        self.store.set_filters(filters);
        self.sync();
    }

    pub fn clear_favorites(&self) {
        self.store.clear_favorites();
        self.sync();
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
        self.sync();
    }
}

/// Get the catalog handle provided by [`CatalogProvider`].
pub fn use_catalog() -> CatalogHandle {
    use_context::<CatalogHandle>()
}

/// Provider component that owns the catalog store. Loads the persisted
/// favorites and the unfiltered course list on mount.
#[component]
pub fn CatalogProvider(children: Element) -> Element {
    let config = use_config();
    let store = use_hook(|| make_catalog(&config));
    let state = use_signal(CatalogState::default);
    let handle = use_context_provider(|| CatalogHandle { store, state });

    let _ = use_resource(move || {
        let handle = handle.clone();
        async move {
            if let Err(e) = handle.load_favorites().await {
                tracing::error!("Failed to load favorites: {}", e);
            }
            if let Err(e) = handle.fetch_courses(CourseFilters::default()).await {
                tracing::error!("Failed to fetch courses: {}", e);
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Favorites view over the catalog for course cards and the Favorites tab.
#[derive(Clone)]
pub struct Favorites {
    catalog: CatalogHandle,
}

impl Favorites {
    pub fn ids(&self) -> Vec<String> {
        self.catalog.state.read().favorites.clone()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.catalog.state.read().is_favorite(id)
    }

    /// Loaded courses that are favorites, in list order.
    pub fn courses(&self) -> Vec<Course> {
        self.catalog
            .state
            .read()
            .favorite_courses()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Toggle and persist in the background.
    pub fn toggle(&self, id: String) {
        let catalog = self.catalog.clone();
        spawn(async move {
            if let Err(e) = catalog.toggle_favorite_and_persist(id).await {
                tracing::error!("Failed to save favorites: {}", e);
            }
        });
    }
}

pub fn use_favorites() -> Favorites {
    Favorites {
        catalog: use_catalog(),
    }
}

/// Heart toggle shown on course cards and the detail screen.
#[component]
pub fn FavoriteButton(
    course_id: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let favorites = use_favorites();
    let active = favorites.is_favorite(&course_id);
    let label = if active { "Remove from favorites" } else { "Add to favorites" };

    rsx! {
        button {
            class: "{class}",
            title: "{label}",
            onclick: move |_| favorites.toggle(course_id.clone()),
            if active { "♥" } else { "♡" }
        }
    }
}
