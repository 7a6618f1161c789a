//! Display helpers for course cards and detail screens.

use std::cmp::Ordering;

use crate::models::Course;

/// "HH:MM" (24h) to "h:MM AM/PM". Input that does not parse is returned as-is.
pub fn format_time(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour24) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };
    let hour12 = match hour24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let suffix = if hour24 >= 12 { "PM" } else { "AM" };
    format!("{hour12}:{minutes} {suffix}")
}

/// "Monday 10:00 AM-11:30 AM, Wednesday 10:00 AM-11:30 AM"
pub fn format_schedule(course: &Course) -> String {
    if course.schedule.is_empty() {
        return "Schedule not available".to_string();
    }
    course
        .schedule
        .iter()
        .map(|s| {
            format!(
                "{} {}-{}",
                s.day,
                format_time(&s.start_time),
                format_time(&s.end_time)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnrollmentStatus {
    Full,
    AlmostFull,
    Available,
}

impl EnrollmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::AlmostFull => "Almost Full",
            Self::Available => "Available",
        }
    }
}

/// Status plus the badge colour to render it with.
pub fn enrollment_status(course: &Course) -> (EnrollmentStatus, &'static str) {
    let pct = course.enrollment_percentage();
    if pct >= 100.0 {
        (EnrollmentStatus::Full, "#FF3B30")
    } else if pct >= 90.0 {
        (EnrollmentStatus::AlmostFull, "#FF9500")
    } else if pct >= 70.0 {
        (EnrollmentStatus::Available, "#FF9500")
    } else {
        (EnrollmentStatus::Available, "#34C759")
    }
}

/// Keep the first `length` characters and append "..." when cut.
pub fn truncate_text(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// "machine LEARNING" -> "Machine Learning"
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseSort {
    /// A-Z
    Title,
    /// A-Z
    Instructor,
    /// Most credits first
    Credits,
    /// Fullest first
    Enrollment,
}

pub fn sort_courses(courses: &[Course], by: CourseSort) -> Vec<Course> {
    let mut sorted = courses.to_vec();
    sorted.sort_by(|a, b| match by {
        CourseSort::Title => a.title.cmp(&b.title),
        CourseSort::Instructor => a.instructor.cmp(&b.instructor),
        CourseSort::Credits => b.credits.cmp(&a.credits),
        CourseSort::Enrollment => b
            .enrollment_percentage()
            .partial_cmp(&a.enrollment_percentage())
            .unwrap_or(Ordering::Equal),
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseSchedule;

    fn course(title: &str, instructor: &str, credits: u32, enrolled: u32, capacity: u32) -> Course {
        Course {
            id: title.to_lowercase(),
            title: title.into(),
            description: String::new(),
            instructor: instructor.into(),
            department: "Computer Science".into(),
            credits,
            semester: "Fall".into(),
            year: 2024,
            enrollment_count: enrolled,
            max_capacity: capacity,
            tags: vec![],
            image_url: None,
            schedule: vec![],
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("00:30"), "12:30 AM");
        assert_eq!(format_time("09:05"), "9:05 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("13:05"), "1:05 PM");
        assert_eq!(format_time("23:59"), "11:59 PM");
        assert_eq!(format_time("noon"), "noon");
    }

    #[test]
    fn test_format_schedule() {
        let mut c = course("Software Engineering", "Dr. Sarah Johnson", 4, 45, 50);
        assert_eq!(format_schedule(&c), "Schedule not available");

        c.schedule = vec![
            CourseSchedule {
                day: "Monday".into(),
                start_time: "10:00".into(),
                end_time: "11:30".into(),
                location: "CS-101".into(),
            },
            CourseSchedule {
                day: "Wednesday".into(),
                start_time: "13:00".into(),
                end_time: "14:30".into(),
                location: "CS-101".into(),
            },
        ];
        assert_eq!(
            format_schedule(&c),
            "Monday 10:00 AM-11:30 AM, Wednesday 1:00 PM-2:30 PM"
        );
    }

    #[test]
    fn test_enrollment_status_thresholds() {
        let status = |enrolled| enrollment_status(&course("X", "Y", 3, enrolled, 100));
        assert_eq!(status(100), (EnrollmentStatus::Full, "#FF3B30"));
        assert_eq!(status(90), (EnrollmentStatus::AlmostFull, "#FF9500"));
        assert_eq!(status(70), (EnrollmentStatus::Available, "#FF9500"));
        assert_eq!(status(69), (EnrollmentStatus::Available, "#34C759"));
        assert_eq!(EnrollmentStatus::AlmostFull.label(), "Almost Full");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly", 7), "exactly");
        assert_eq!(truncate_text("Database Systems", 8), "Database...");
        // Multi-byte characters are not split
        assert_eq!(truncate_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("machine LEARNING"), "Machine Learning");
        assert_eq!(capitalize_words("web  dev"), "Web  Dev");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_sort_courses() {
        let courses = vec![
            course("Networks", "Ms. Lee", 3, 10, 40),
            course("Algorithms", "Dr. Zhou", 4, 39, 40),
            course("Compilers", "Mr. Adams", 2, 20, 40),
        ];
        let titles = |v: Vec<Course>| v.into_iter().map(|c| c.title).collect::<Vec<_>>();

        assert_eq!(
            titles(sort_courses(&courses, CourseSort::Title)),
            ["Algorithms", "Compilers", "Networks"]
        );
        assert_eq!(
            titles(sort_courses(&courses, CourseSort::Instructor)),
            ["Algorithms", "Compilers", "Networks"]
        );
        assert_eq!(
            titles(sort_courses(&courses, CourseSort::Credits)),
            ["Algorithms", "Networks", "Compilers"]
        );
        assert_eq!(
            titles(sort_courses(&courses, CourseSort::Enrollment)),
            ["Algorithms", "Compilers", "Networks"]
        );
        // Input untouched
        assert_eq!(courses[0].title, "Networks");
    }
}
