//! # Mock course catalog
//!
//! [`MockCatalog`] serves a fixed collection of Computer Science courses for
//! the current academic year. Both [`CourseSource`] operations work over the
//! whole collection (not over whatever the UI loaded last) and cannot fail.
//!
//! | Operation | Latency (default) | Matching |
//! |-----------|-------------------|----------|
//! | `fetch` | 1000 ms | [`store::catalog::filter_courses`] |
//! | `search` | 500 ms | [`store::catalog::search_courses`] |

use std::sync::Arc;
use std::time::Duration;

use store::catalog::{filter_courses, search_courses};
use store::config::CatalogConfig;
use store::error::Result;
use store::{Course, CourseFilters, CourseSchedule, CourseSource};

use crate::latency;

#[derive(Clone, Debug)]
pub struct MockCatalog {
    courses: Arc<Vec<Course>>,
    fetch_latency: Duration,
    search_latency: Duration,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new(&CatalogConfig::default())
    }
}

impl MockCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            courses: Arc::new(mock_courses()),
            fetch_latency: config.fetch_latency(),
            search_latency: config.search_latency(),
        }
    }

    /// Serve `courses` instead of the built-in collection.
    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = Arc::new(courses);
        self
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

impl CourseSource for MockCatalog {
    async fn fetch(&self, filters: &CourseFilters) -> Result<Vec<Course>> {
        latency::simulate(self.fetch_latency).await;
        Ok(filter_courses(&self.courses, filters))
    }

    async fn search(&self, query: &str) -> Result<Vec<Course>> {
        latency::simulate(self.search_latency).await;
        Ok(search_courses(&self.courses, query))
    }
}

fn meeting(day: &str, start: &str, end: &str, room: &str) -> CourseSchedule {
    CourseSchedule {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        location: room.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    title: &str,
    description: &str,
    instructor: &str,
    credits: u32,
    semester: &str,
    enrollment: (u32, u32),
    tags: &[&str],
    schedule: Vec<CourseSchedule>,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructor: instructor.to_string(),
        department: "Computer Science".to_string(),
        credits,
        semester: semester.to_string(),
        year: 2024,
        enrollment_count: enrollment.0,
        max_capacity: enrollment.1,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: Some("https://via.placeholder.com/300x200".to_string()),
        schedule,
    }
}

/// The built-in collection.
pub fn mock_courses() -> Vec<Course> {
    vec![
        course(
            "1",
            "Software Engineering",
            "Comprehensive course covering software development lifecycle, design patterns, and project management.",
            "Dr. Sarah Johnson",
            4,
            "Fall",
            (45, 50),
            &["Programming", "Design", "Management"],
            vec![
                meeting("Monday", "10:00", "11:30", "CS-101"),
                meeting("Wednesday", "10:00", "11:30", "CS-101"),
            ],
        ),
        course(
            "2",
            "Database Systems",
            "Study of database design, SQL, NoSQL databases, and data management principles.",
            "Prof. Michael Chen",
            3,
            "Fall",
            (38, 40),
            &["Database", "SQL", "Data Management"],
            vec![
                meeting("Tuesday", "14:00", "15:30", "CS-102"),
                meeting("Thursday", "14:00", "15:30", "CS-102"),
            ],
        ),
        course(
            "3",
            "Machine Learning",
            "Introduction to machine learning algorithms, neural networks, and AI applications.",
            "Dr. Emily Rodriguez",
            4,
            "Spring",
            (32, 35),
            &["AI", "Machine Learning", "Python"],
            vec![
                meeting("Monday", "13:00", "14:30", "CS-103"),
                meeting("Friday", "13:00", "14:30", "CS-103"),
            ],
        ),
        course(
            "4",
            "Web Development",
            "Full-stack web development using modern frameworks and technologies.",
            "Mr. David Wilson",
            3,
            "Fall",
            (42, 45),
            &["Web", "JavaScript", "React"],
            vec![
                meeting("Tuesday", "11:00", "12:30", "CS-104"),
                meeting("Thursday", "11:00", "12:30", "CS-104"),
            ],
        ),
        course(
            "5",
            "Mobile App Development",
            "Native and cross-platform mobile application development for iOS and Android.",
            "Ms. Lisa Brown",
            4,
            "Spring",
            (28, 30),
            &["Mobile", "React Native", "iOS", "Android"],
            vec![
                meeting("Wednesday", "15:00", "16:30", "CS-105"),
                meeting("Friday", "15:00", "16:30", "CS-105"),
            ],
        ),
    ]
}
