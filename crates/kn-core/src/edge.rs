use serde::{Deserialize, Serialize};

use crate::course::{Course, CourseId};
use crate::graph::CourseGraph;

/// Index of a course in its graph's course table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseRef(pub usize);

/// One endpoint of a prerequisite edge.
///
/// Datasets reference courses by bare id; once an edge is inserted into a
/// [`CourseGraph`] its endpoints are resolved to table references. Both
/// shapes are one type so nothing downstream branches on which form it got
/// — everything goes through [`EdgeEndpoint::resolve`] and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeEndpoint {
    /// A bare course id, not yet resolved against a graph.
    Id(CourseId),
    /// A reference into a graph's course table.
    Resolved(CourseRef),
}

impl EdgeEndpoint {
    /// Resolve this endpoint to a course table reference in `graph`.
    pub fn course_ref(&self, graph: &CourseGraph) -> Option<CourseRef> {
        match self {
            Self::Id(id) => graph.course_ref(id),
            Self::Resolved(r) => Some(*r),
        }
    }

    /// Resolve this endpoint to the course it names in `graph`.
    pub fn resolve<'g>(&self, graph: &'g CourseGraph) -> Option<&'g Course> {
        self.course_ref(graph).and_then(|r| graph.course_at(r))
    }

    /// The id this endpoint names, resolving through `graph` if needed.
    pub fn course_id<'a>(&'a self, graph: &'a CourseGraph) -> Option<&'a CourseId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Resolved(r) => graph.course_at(*r).map(|c| &c.id),
        }
    }
}

/// A directed prerequisite relation: `source` is required before `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    /// The prerequisite course.
    pub source: EdgeEndpoint,
    /// The course that requires it.
    pub target: EdgeEndpoint,
}

impl PrerequisiteEdge {
    /// Create an unresolved edge between two course ids.
    pub fn between(source: impl Into<CourseId>, target: impl Into<CourseId>) -> Self {
        Self {
            source: EdgeEndpoint::Id(source.into()),
            target: EdgeEndpoint::Id(target.into()),
        }
    }
}
