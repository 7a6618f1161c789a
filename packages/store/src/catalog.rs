//! # Catalog store — courses, search/filter criteria and favorites
//!
//! [`CatalogStore`] holds the currently loaded course list, the search text
//! and filter criteria the UI is showing, and the favorites set. Courses come
//! from a [`CourseSource`]; favorites are persisted through a
//! [`KeyValueStore`] under [`FAVORITES_KEY`] as a JSON list of ids.
//!
//! ## Operations
//!
//! | Method | I/O | Notes |
//! |--------|-----|-------|
//! | [`fetch_courses`](CatalogStore::fetch_courses) | source | Replaces the loaded list. |
//! | [`search_courses`](CatalogStore::search_courses) | source | Replaces the loaded list. |
//! | [`load_favorites`](CatalogStore::load_favorites) / [`save_favorites`](CatalogStore::save_favorites) | storage | |
//! | [`toggle_favorite`](CatalogStore::toggle_favorite) | none | Caller persists. |
//! | [`toggle_favorite_and_persist`](CatalogStore::toggle_favorite_and_persist) | storage | Toggle + save in one call. |
//! | [`clear_favorites`](CatalogStore::clear_favorites) | none | Does **not** persist. |
//! | `set_search_query` / `set_filters` / `clear_error` | none | |
//!
//! Fetch and search requests are never cancelled. When two overlap, whichever
//! finishes last overwrites the course list, regardless of issue order.
//!
//! Favorites may reference courses that are not in the loaded list (filtered
//! out, or gone from the catalog). They are kept.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;
use crate::kv::{self, KeyValueStore, FAVORITES_KEY};
use crate::models::{Course, CourseFilters};

/// Where courses come from.
pub trait CourseSource {
    /// Courses matching `filters`, out of the full collection.
    fn fetch(&self, filters: &CourseFilters) -> impl Future<Output = Result<Vec<Course>>>;
    /// Courses matching `query`, out of the full collection.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Course>>>;
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Whether `course` satisfies every set criterion.
pub fn matches_filters(course: &Course, filters: &CourseFilters) -> bool {
    if let Some(department) = filters.department.as_deref().filter(|d| !d.trim().is_empty()) {
        if !contains_ignore_case(&course.department, &department.to_lowercase()) {
            return false;
        }
    }
    if let Some(semester) = filters.semester.as_deref().filter(|s| !s.trim().is_empty()) {
        if !course.semester.eq_ignore_ascii_case(semester) {
            return false;
        }
    }
    if let Some(year) = filters.year.filter(|&y| y != 0) {
        if course.year != year {
            return false;
        }
    }
    if let Some(credits) = filters.credits.filter(|&c| c != 0) {
        if course.credits != credits {
            return false;
        }
    }
    true
}

/// Whether `query` appears in the title, description, instructor or any tag.
pub fn matches_query(course: &Course, query: &str) -> bool {
    let q = query.to_lowercase();
    contains_ignore_case(&course.title, &q)
        || contains_ignore_case(&course.description, &q)
        || contains_ignore_case(&course.instructor, &q)
        || course.tags.iter().any(|tag| contains_ignore_case(tag, &q))
}

pub fn filter_courses(courses: &[Course], filters: &CourseFilters) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| matches_filters(c, filters))
        .cloned()
        .collect()
}

/// Blank or whitespace-only queries return every course.
pub fn search_courses(courses: &[Course], query: &str) -> Vec<Course> {
    if query.trim().is_empty() {
        return courses.to_vec();
    }
    courses
        .iter()
        .filter(|c| matches_query(c, query))
        .cloned()
        .collect()
}

/// Drop repeated ids, keeping first occurrence order.
fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Snapshot of the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub courses: Vec<Course>,
    pub favorites: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub filters: CourseFilters,
}

impl CatalogState {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish(&mut self, outcome: &Result<Vec<Course>>) {
        self.loading = false;
        match outcome {
            Ok(courses) => self.courses = courses.clone(),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Remove `id` if present, append it otherwise. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        match self.favorites.iter().position(|f| f == id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(id.to_string());
                true
            }
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Loaded courses that are favorites, in list order.
    pub fn favorite_courses(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| self.is_favorite(&c.id))
            .collect()
    }
}

/// Owns the course list and favorites, persisting favorites through `S`.
#[derive(Clone)]
pub struct CatalogStore<S, C> {
    storage: S,
    source: C,
    state: Arc<Mutex<CatalogState>>,
}

impl<S: KeyValueStore, C: CourseSource> CatalogStore<S, C> {
    pub fn new(storage: S, source: C) -> Self {
        Self {
            storage,
            source,
            state: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> CatalogState {
        self.lock().clone()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<T>(&self, f: impl FnOnce(&mut CatalogState) -> T) -> T {
        f(&mut self.lock())
    }

    /// Load courses matching `filters` and make them the current list.
    pub async fn fetch_courses(&self, filters: CourseFilters) -> Result<Vec<Course>> {
        tracing::debug!(?filters, "fetch courses");
        self.update(CatalogState::begin);
        let outcome = self.source.fetch(&filters).await;
        self.update(|s| s.finish(&outcome));
        outcome
    }

    /// Load courses matching `query` and make them the current list.
    pub async fn search_courses(&self, query: &str) -> Result<Vec<Course>> {
        tracing::debug!(query, "search courses");
        self.update(CatalogState::begin);
        let outcome = self.source.search(query).await;
        self.update(|s| s.finish(&outcome));
        outcome
    }

    /// Replace the in-memory favorites with the persisted set. A missing key
    /// loads as empty.
    pub async fn load_favorites(&self) -> Result<Vec<String>> {
        match kv::get_json::<Vec<String>, _>(&self.storage, FAVORITES_KEY).await {
            Ok(stored) => {
                let ids = dedup_ids(stored.unwrap_or_default());
                self.update(|s| s.favorites = ids.clone());
                Ok(ids)
            }
            Err(err) => {
                tracing::warn!(error = %err, "favorites not loaded");
                self.update(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// Persist `ids` as the favorites set and adopt it in memory once written.
    pub async fn save_favorites(&self, ids: Vec<String>) -> Result<Vec<String>> {
        let ids = dedup_ids(ids);
        match kv::set_json(&self.storage, FAVORITES_KEY, &ids).await {
            Ok(()) => {
                self.update(|s| s.favorites = ids.clone());
                Ok(ids)
            }
            Err(err) => {
                tracing::warn!(error = %err, "favorites not saved");
                self.update(|s| s.error = Some(err.to_string()));
                Err(err)
            }
        }
    }

    /// In-memory toggle only. Returns whether `id` is now a favorite.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        self.update(|s| s.toggle_favorite(id))
    }

    /// Toggle and persist the resulting set. The in-memory toggle stands even
    /// if the write fails.
    pub async fn toggle_favorite_and_persist(&self, id: &str) -> Result<bool> {
        let (now_favorite, ids) = self.update(|s| (s.toggle_favorite(id), s.favorites.clone()));
        if let Err(err) = kv::set_json(&self.storage, FAVORITES_KEY, &ids).await {
            tracing::warn!(id, error = %err, "favorite toggle not persisted");
            self.update(|s| s.error = Some(err.to_string()));
            return Err(err);
        }
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.lock().is_favorite(id)
    }

    pub fn favorites(&self) -> Vec<String> {
        self.lock().favorites.clone()
    }

    pub fn favorite_courses(&self) -> Vec<Course> {
        self.lock().favorite_courses().into_iter().cloned().collect()
    }

    pub fn course(&self, id: &str) -> Option<Course> {
        self.lock().course(id).cloned()
    }

    pub fn set_search_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.search_query = text);
    }

    pub fn set_filters(&self, filters: CourseFilters) {
        self.update(|s| s.filters = filters);
    }

    /// Empties favorites in memory. Call [`save_favorites`](Self::save_favorites)
    /// to make that durable.
    pub fn clear_favorites(&self) {
        self.update(|s| s.favorites.clear());
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::StoreError;
    use crate::kv::testing::FlakyStore;
    use crate::memory::MemoryStore;
    use crate::models::CourseSchedule;

    fn course(id: &str, title: &str, semester: &str, year: u32, credits: u32, tags: &[&str]) -> Course {
        Course {
            id: id.into(),
            title: title.into(),
            description: format!("All about {title}"),
            instructor: "Dr. Test".into(),
            department: "Computer Science".into(),
            credits,
            semester: semester.into(),
            year,
            enrollment_count: 10,
            max_capacity: 20,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: None,
            schedule: vec![CourseSchedule {
                day: "Monday".into(),
                start_time: "10:00".into(),
                end_time: "11:30".into(),
                location: "CS-101".into(),
            }],
        }
    }

    fn sample() -> Vec<Course> {
        vec![
            course("1", "Compilers", "Fall", 2024, 4, &["Languages"]),
            course("2", "Databases", "Fall", 2024, 3, &["SQL"]),
            course("3", "Graphics", "Spring", 2024, 4, &["Rendering"]),
            course("4", "Networks", "Spring", 2023, 4, &["TCP"]),
        ]
    }

    /// Serves `sample()` with an optional per-call delay keyed by query.
    #[derive(Clone, Default)]
    struct SampleSource {
        slow_query: Option<(String, Duration)>,
        failing: bool,
    }

    impl CourseSource for SampleSource {
        async fn fetch(&self, filters: &CourseFilters) -> Result<Vec<Course>> {
            if self.failing {
                return Err(StoreError::storage("catalog offline"));
            }
            Ok(filter_courses(&sample(), filters))
        }

        async fn search(&self, query: &str) -> Result<Vec<Course>> {
            if let Some((slow, delay)) = &self.slow_query {
                if slow == query {
                    tokio::time::sleep(*delay).await;
                }
            }
            Ok(search_courses(&sample(), query))
        }
    }

    fn store() -> CatalogStore<MemoryStore, SampleSource> {
        CatalogStore::new(MemoryStore::new(), SampleSource::default())
    }

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_filter_year_and_credits() {
        let filters = CourseFilters::new().year(2024).credits(4);
        let found = filter_courses(&sample(), &filters);
        assert_eq!(ids(&found), ["1", "3"]);
        assert!(found.iter().all(|c| c.year == 2024 && c.credits == 4));
    }

    #[test]
    fn test_filter_semester_and_department_ignore_case() {
        let found = filter_courses(&sample(), &CourseFilters::new().semester("spring"));
        assert_eq!(ids(&found), ["3", "4"]);

        // Department is a substring match, semester is not
        let found = filter_courses(&sample(), &CourseFilters::new().department("computer"));
        assert_eq!(found.len(), 4);
        assert!(filter_courses(&sample(), &CourseFilters::new().semester("spr")).is_empty());
    }

    #[test]
    fn test_unset_filters_do_not_narrow() {
        let filters = CourseFilters::new().department("").year(0);
        assert_eq!(filter_courses(&sample(), &filters).len(), 4);
    }

    #[test]
    fn test_search_fields() {
        assert_eq!(ids(&search_courses(&sample(), "GRAPH")), ["3"]);
        assert_eq!(ids(&search_courses(&sample(), "sql")), ["2"]);
        assert_eq!(ids(&search_courses(&sample(), "all about")).len(), 4);
        assert_eq!(ids(&search_courses(&sample(), "dr. test")).len(), 4);
    }

    #[test]
    fn test_search_blank_and_missing() {
        assert_eq!(search_courses(&sample(), "").len(), 4);
        assert_eq!(search_courses(&sample(), "   ").len(), 4);
        assert!(search_courses(&sample(), "nonexistent-xyz").is_empty());
    }

    #[test]
    fn test_dedup_ids_keeps_order() {
        let ids = dedup_ids(vec!["3".into(), "1".into(), "3".into(), "2".into(), "1".into()]);
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_fetch_replaces_courses() {
        let catalog = store();
        let found = catalog
            .fetch_courses(CourseFilters::new().year(2024).credits(4))
            .await
            .unwrap();
        let state = catalog.snapshot();
        assert_eq!(state.courses, found);
        assert!(!state.loading);
        assert_eq!(state.error, None);

        catalog.search_courses("").await.unwrap();
        assert_eq!(catalog.snapshot().courses.len(), 4);
        catalog.search_courses("nonexistent-xyz").await.unwrap();
        assert!(catalog.snapshot().courses.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_courses() {
        let catalog = CatalogStore::new(
            MemoryStore::new(),
            SampleSource {
                failing: true,
                ..Default::default()
            },
        );
        assert!(catalog.fetch_courses(CourseFilters::new()).await.is_err());
        let state = catalog.snapshot();
        assert!(!state.loading);
        assert!(state.courses.is_empty());
        assert!(state.error.is_some());

        catalog.clear_error();
        assert_eq!(catalog.snapshot().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_searches_last_completion_wins() {
        let catalog = CatalogStore::new(
            MemoryStore::new(),
            SampleSource {
                slow_query: Some(("compilers".into(), Duration::from_secs(2))),
                ..Default::default()
            },
        );

        // Issued first, finishes last
        let slow = catalog.search_courses("compilers");
        let fast = catalog.search_courses("graphics");
        let (slow, fast) = tokio::join!(slow, fast);
        assert_eq!(ids(&fast.unwrap()), ["3"]);
        assert_eq!(ids(&slow.unwrap()), ["1"]);

        assert_eq!(ids(&catalog.snapshot().courses), ["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_is_loading_until_it_settles() {
        let catalog = CatalogStore::new(
            MemoryStore::new(),
            SampleSource {
                slow_query: Some(("compilers".into(), Duration::from_secs(1))),
                ..Default::default()
            },
        );
        assert!(!catalog.snapshot().loading);

        let search = catalog.search_courses("compilers");
        tokio::pin!(search);
        tokio::select! {
            biased;
            _ = &mut search => panic!("search finished before its delay"),
            _ = std::future::ready(()) => {}
        }
        let state = catalog.snapshot();
        assert!(state.loading);
        assert_eq!(state.error, None);

        assert_eq!(ids(&search.await.unwrap()), ["1"]);
        assert!(!catalog.snapshot().loading);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let catalog = store();
        assert!(catalog.toggle_favorite("3"));
        assert_eq!(catalog.favorites(), ["3"]);
        assert!(!catalog.toggle_favorite("3"));
        assert!(catalog.favorites().is_empty());

        catalog.toggle_favorite("1");
        catalog.toggle_favorite("2");
        catalog.toggle_favorite("1");
        catalog.toggle_favorite("1");
        assert_eq!(catalog.favorites(), ["2", "1"]);
    }

    #[tokio::test]
    async fn test_toggle_does_not_persist() {
        let catalog = store();
        catalog.toggle_favorite("3");
        assert!(catalog.storage().is_empty());

        let reloaded = catalog.load_favorites().await.unwrap();
        assert!(reloaded.is_empty());
        assert!(catalog.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_favorites() {
        let storage = MemoryStore::new();
        let catalog = CatalogStore::new(storage.clone(), SampleSource::default());
        let saved = catalog
            .save_favorites(vec!["2".into(), "4".into(), "2".into()])
            .await
            .unwrap();
        assert_eq!(saved, ["2", "4"]);

        let fresh = CatalogStore::new(storage, SampleSource::default());
        assert_eq!(fresh.load_favorites().await.unwrap(), ["2", "4"]);
        assert!(fresh.is_favorite("4"));
    }

    #[tokio::test]
    async fn test_load_favorites_malformed_sets_error() {
        let catalog = store();
        catalog.storage().set(FAVORITES_KEY, "{oops").await.unwrap();
        catalog.toggle_favorite("1");

        assert!(catalog.load_favorites().await.unwrap_err().is_storage());
        let state = catalog.snapshot();
        assert!(state.error.is_some());
        assert_eq!(state.favorites, ["1"]);
    }

    #[tokio::test]
    async fn test_clear_favorites_is_memory_only() {
        let catalog = store();
        catalog.save_favorites(vec!["1".into(), "3".into()]).await.unwrap();

        catalog.clear_favorites();
        assert!(catalog.favorites().is_empty());

        // Still on disk until saved
        assert_eq!(catalog.load_favorites().await.unwrap(), ["1", "3"]);

        catalog.clear_favorites();
        catalog.save_favorites(catalog.favorites()).await.unwrap();
        assert!(catalog.load_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_and_persist() {
        let catalog = store();
        assert!(catalog.toggle_favorite_and_persist("3").await.unwrap());
        assert_eq!(
            catalog.storage().get(FAVORITES_KEY).await.unwrap().as_deref(),
            Some(r#"["3"]"#)
        );
        assert!(!catalog.toggle_favorite_and_persist("3").await.unwrap());
        assert_eq!(catalog.load_favorites().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_toggle_and_persist_failure_keeps_toggle() {
        let storage = FlakyStore::new();
        storage.fail_writes_to(FAVORITES_KEY);
        let catalog = CatalogStore::new(storage, SampleSource::default());

        assert!(catalog.toggle_favorite_and_persist("2").await.is_err());
        assert!(catalog.is_favorite("2"));
        assert!(catalog.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn test_orphaned_favorites_survive_filtering() {
        let catalog = store();
        catalog.save_favorites(vec!["1".into(), "4".into()]).await.unwrap();
        catalog
            .fetch_courses(CourseFilters::new().year(2024))
            .await
            .unwrap();

        assert_eq!(catalog.favorites(), ["1", "4"]);
        let favs = catalog.favorite_courses();
        assert_eq!(ids(&favs), ["1"]);
        assert!(catalog.course("4").is_none());
        assert_eq!(catalog.course("1").unwrap().title, "Compilers");
    }

    #[test]
    fn test_setters() {
        let catalog = store();
        catalog.set_search_query("data");
        catalog.set_filters(CourseFilters::new().semester("Fall"));
        let state = catalog.snapshot();
        assert_eq!(state.search_query, "data");
        assert_eq!(state.filters.semester.as_deref(), Some("Fall"));
        assert!(state.courses.is_empty());
    }
}
