//! # Domain models for users and courses
//!
//! Defines the value types held by [`crate::SessionStore`] and
//! [`crate::CatalogStore`]. All of them are `Serialize + Deserialize`; the
//! persisted forms use camelCase field names so that `userData` written by
//! earlier app builds keeps parsing.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The signed-in student. Created on login, registration or session restore. |
//! | [`Course`] | A read-only catalog entry with enrollment counts, tags and weekly schedule. |
//! | [`CourseSchedule`] | One weekly meeting: day, `"HH:MM"` start/end and room. |
//! | [`CourseFilters`] | Optional department / semester / year / credits criteria. |

use serde::{Deserialize, Serialize};

/// The authenticated student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_authenticated: bool,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            is_authenticated: true,
        }
    }

    /// Up to two uppercase initials for the profile avatar: "John Doe" -> "JD".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// A weekly class meeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchedule {
    pub day: String,
    /// 24-hour "HH:MM"
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

/// A course in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub department: String,
    pub credits: u32,
    /// "Fall" / "Spring"
    pub semester: String,
    pub year: u32,
    pub enrollment_count: u32,
    pub max_capacity: u32,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub schedule: Vec<CourseSchedule>,
}

impl Course {
    /// Enrollment as a percentage of capacity. A zero-capacity course counts as full.
    pub fn enrollment_percentage(&self) -> f64 {
        if self.max_capacity == 0 {
            return 100.0;
        }
        f64::from(self.enrollment_count) * 100.0 / f64::from(self.max_capacity)
    }

    pub fn seats_left(&self) -> u32 {
        self.max_capacity.saturating_sub(self.enrollment_count)
    }
}

/// Catalog filter criteria. Every field is optional and the set ones combine
/// with AND. Blank strings and zero numbers are treated as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

impl CourseFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = Some(semester.into());
        self
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    /// True when no criterion would narrow the list.
    pub fn is_empty(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.department)
            && blank(&self.semester)
            && self.year.unwrap_or(0) == 0
            && self.credits.unwrap_or(0) == 0
    }
}
