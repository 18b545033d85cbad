use std::collections::{BTreeMap, HashMap};

use crate::course::{Course, CourseId};
use crate::edge::{CourseRef, EdgeEndpoint, PrerequisiteEdge};
use crate::error::{KnError, KnResult};

/// The course graph. Owns all courses and prerequisite edges.
///
/// Built once (see [`crate::dataset::Dataset::into_graph`]) and read-only
/// afterwards: there is no mutable access once construction is done, which
/// is what lets the engine rank and filter over it without synchronization.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: Vec<Course>,
    edges: Vec<PrerequisiteEdge>,

    // Indexes
    by_id: HashMap<CourseId, usize>,
    edges_from: HashMap<usize, Vec<usize>>,
    edges_to: HashMap<usize, Vec<usize>>,
}

impl CourseGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a course. Returns its table reference.
    pub fn add_course(&mut self, course: Course) -> KnResult<CourseRef> {
        if self.by_id.contains_key(&course.id) {
            return Err(KnError::DuplicateCourse(course.id.clone()));
        }

        let index = self.courses.len();
        self.by_id.insert(course.id.clone(), index);
        self.courses.push(course);
        Ok(CourseRef(index))
    }

    /// Add a prerequisite edge. Both endpoints must name known courses;
    /// the stored edge always carries resolved endpoints.
    pub fn add_edge(&mut self, edge: PrerequisiteEdge) -> KnResult<usize> {
        let source = self.resolve_endpoint(&edge.source)?;
        let target = self.resolve_endpoint(&edge.target)?;

        let index = self.edges.len();
        self.edges_from.entry(source.0).or_default().push(index);
        self.edges_to.entry(target.0).or_default().push(index);
        self.edges.push(PrerequisiteEdge {
            source: EdgeEndpoint::Resolved(source),
            target: EdgeEndpoint::Resolved(target),
        });
        Ok(index)
    }

    fn resolve_endpoint(&self, endpoint: &EdgeEndpoint) -> KnResult<CourseRef> {
        endpoint.course_ref(self).ok_or_else(|| {
            let missing = match endpoint {
                EdgeEndpoint::Id(id) => id.clone(),
                EdgeEndpoint::Resolved(r) => CourseId::new(format!("#{}", r.0)),
            };
            KnError::UnresolvedEndpoint { missing }
        })
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a course by id.
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.by_id.get(id).map(|&i| &self.courses[i])
    }

    /// Get a course's table reference by id.
    pub fn course_ref(&self, id: &CourseId) -> Option<CourseRef> {
        self.by_id.get(id).map(|&i| CourseRef(i))
    }

    /// Get a course by table reference.
    pub fn course_at(&self, r: CourseRef) -> Option<&Course> {
        self.courses.get(r.0)
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All edges in insertion order. Stored endpoints are always resolved.
    pub fn edges(&self) -> &[PrerequisiteEdge] {
        &self.edges
    }

    /// Indices of edges leaving a course (it is a prerequisite of those
    /// edges' targets).
    pub fn outgoing(&self, r: CourseRef) -> &[usize] {
        self.edges_from.get(&r.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices of edges arriving at a course (its prerequisites).
    pub fn incoming(&self, r: CourseRef) -> &[usize] {
        self.edges_to.get(&r.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Both endpoints of an edge as table references.
    pub fn endpoints(&self, edge_index: usize) -> Option<(CourseRef, CourseRef)> {
        let edge = self.edges.get(edge_index)?;
        Some((edge.source.course_ref(self)?, edge.target.course_ref(self)?))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Courses that must be taken before the given course.
    pub fn prerequisites(&self, id: &CourseId) -> Vec<&Course> {
        let Some(r) = self.course_ref(id) else {
            return Vec::new();
        };
        self.incoming(r)
            .iter()
            .filter_map(|&e| self.edges[e].source.resolve(self))
            .collect()
    }

    /// Courses that require the given course.
    pub fn postrequisites(&self, id: &CourseId) -> Vec<&Course> {
        let Some(r) = self.course_ref(id) else {
            return Vec::new();
        };
        self.outgoing(r)
            .iter()
            .filter_map(|&e| self.edges[e].target.resolve(self))
            .collect()
    }

    /// Department name → course count, sorted by name.
    pub fn departments(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for course in &self.courses {
            *counts.entry(course.department().to_string()).or_insert(0) += 1;
        }
        counts
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of courses in the graph.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of prerequisite edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
