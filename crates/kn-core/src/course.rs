use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a course, e.g. `CS61A` or `MATH104`.
///
/// The id doubles as structured data: the leading alphabetic run names the
/// subject and the first digit run carries the course number that level
/// buckets are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Create a course id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading alphabetic run of the id (`CS61A` → `CS`).
    ///
    /// Used as the department fallback when a course record carries no
    /// explicit department.
    pub fn subject(&self) -> &str {
        let end = self
            .0
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// The first contiguous digit run of the id (`CS61A` → `61`), or `None`
    /// if the id contains no digits (or the run overflows a `u32`).
    pub fn number(&self) -> Option<u32> {
        let start = self.0.find(|c: char| c.is_ascii_digit())?;
        let rest = &self.0[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse().ok()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CourseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Division bucket a course falls into, derived from its course number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Lower division, course numbers 1–99.
    Lower,
    /// Upper division, course numbers 100–199.
    Upper,
    /// Graduate, course numbers 200 and above.
    Graduate,
}

impl Level {
    /// The bucket for a course number. Numbers outside the documented
    /// ranges (i.e. 0) belong to no bucket.
    pub fn of_number(number: u32) -> Option<Self> {
        match number {
            0 => None,
            1..=99 => Some(Self::Lower),
            100..=199 => Some(Self::Upper),
            _ => Some(Self::Graduate),
        }
    }

    /// The bucket for a course id, or `None` when the id carries no
    /// parseable number. Such courses match no level bucket and are only
    /// visible while the level dimension is unrestricted.
    pub fn of(id: &CourseId) -> Option<Self> {
        id.number().and_then(Self::of_number)
    }

    /// Parse a bucket name as used on the CLI (`lower`, `upper`, `graduate`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lower" => Some(Self::Lower),
            "upper" => Some(Self::Upper),
            "graduate" | "grad" => Some(Self::Graduate),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
            Self::Graduate => write!(f, "graduate"),
        }
    }
}

/// A point in the 3D layout space assigned by the external force layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Vec3 {
    /// The origin of the layout space.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a point from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the origin.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// This point scaled by a factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

/// One academic offering: a node in the prerequisite graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier for this course.
    pub id: CourseId,
    /// Display name, e.g. `Data Structures and Program Design`.
    pub name: String,
    /// Department the course belongs to, if recorded in the dataset.
    pub department: Option<String>,
    /// Unit count, if recorded in the dataset.
    pub units: Option<f64>,
    /// Position assigned by the external force layout. Read-only here;
    /// absent until the layout has run.
    pub position: Option<Vec3>,
}

impl Course {
    /// Create a course with only id and name set.
    pub fn new(id: impl Into<CourseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            units: None,
            position: None,
        }
    }

    /// The department this course is filtered and colored by: the explicit
    /// department when present, otherwise the id's subject prefix.
    pub fn department(&self) -> &str {
        self.department.as_deref().unwrap_or_else(|| self.id.subject())
    }

    /// The label shown in search results and matched against queries:
    /// `"<id> - <name>"`.
    pub fn search_label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_is_leading_alpha_run() {
        assert_eq!(CourseId::new("CS61A").subject(), "CS");
        assert_eq!(CourseId::new("MATH104").subject(), "MATH");
        assert_eq!(CourseId::new("61A").subject(), "");
    }

    #[test]
    fn number_is_first_digit_run() {
        assert_eq!(CourseId::new("CS61A").number(), Some(61));
        assert_eq!(CourseId::new("CS170").number(), Some(170));
        assert_eq!(CourseId::new("SEMINAR").number(), None);
    }

    #[test]
    fn level_bucket_boundaries() {
        assert_eq!(Level::of_number(1), Some(Level::Lower));
        assert_eq!(Level::of_number(99), Some(Level::Lower));
        assert_eq!(Level::of_number(100), Some(Level::Upper));
        assert_eq!(Level::of_number(199), Some(Level::Upper));
        assert_eq!(Level::of_number(200), Some(Level::Graduate));
        assert_eq!(Level::of_number(375), Some(Level::Graduate));
        assert_eq!(Level::of_number(0), None);
    }

    #[test]
    fn level_of_id_without_number_is_none() {
        assert_eq!(Level::of(&CourseId::new("COLLOQUIUM")), None);
        assert_eq!(Level::of(&CourseId::new("CS61A")), Some(Level::Lower));
    }

    #[test]
    fn level_parse_names() {
        assert_eq!(Level::parse("lower"), Some(Level::Lower));
        assert_eq!(Level::parse("Upper"), Some(Level::Upper));
        assert_eq!(Level::parse("graduate"), Some(Level::Graduate));
        assert_eq!(Level::parse("sophomore"), None);
    }

    #[test]
    fn department_falls_back_to_subject() {
        let mut course = Course::new("CS61A", "Data Structures");
        assert_eq!(course.department(), "CS");
        course.department = Some("Computer Science".to_string());
        assert_eq!(course.department(), "Computer Science");
    }

    #[test]
    fn search_label_joins_id_and_name() {
        let course = Course::new("CS61A", "Data Structures");
        assert_eq!(course.search_label(), "CS61A - Data Structures");
    }

    #[test]
    fn vec3_magnitude() {
        assert!((Vec3::new(3.0, 4.0, 0.0).magnitude() - 5.0).abs() < f64::EPSILON);
        assert_eq!(Vec3::ORIGIN.magnitude(), 0.0);
    }
}
