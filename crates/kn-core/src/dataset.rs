use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::course::{Course, CourseId, Vec3};
use crate::edge::PrerequisiteEdge;
use crate::error::KnResult;
use crate::graph::CourseGraph;

/// One node record as it appears in the dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    /// Course id.
    pub id: String,
    /// Course display name.
    pub name: String,
    /// Department, if the scraper recorded one.
    #[serde(default)]
    pub department: Option<String>,
    /// Unit count, if recorded.
    #[serde(default)]
    pub units: Option<f64>,
    /// Layout x coordinate, present once the force layout has run.
    #[serde(default)]
    pub x: Option<f64>,
    /// Layout y coordinate.
    #[serde(default)]
    pub y: Option<f64>,
    /// Layout z coordinate.
    #[serde(default)]
    pub z: Option<f64>,
}

/// One link record as it appears in the dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    /// Id of the prerequisite course.
    pub source: String,
    /// Id of the course that requires it.
    pub target: String,
}

/// The dataset boundary: `{nodes, links}` as loaded from disk.
///
/// Loaded once at process start and converted into a [`CourseGraph`];
/// nothing is ever written back.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// All course records.
    pub nodes: Vec<NodeRecord>,
    /// All prerequisite link records.
    pub links: Vec<LinkRecord>,
}

impl Dataset {
    /// Parse a dataset from a JSON string.
    pub fn from_json(json: &str) -> KnResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> KnResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the validated course graph. Every link endpoint must name a
    /// node in the dataset; a dangling reference is a load error, the one
    /// place it is not silently dropped.
    pub fn into_graph(self) -> KnResult<CourseGraph> {
        let mut graph = CourseGraph::new();

        for node in self.nodes {
            let position = match (node.x, node.y, node.z) {
                (Some(x), Some(y), Some(z)) => Some(Vec3::new(x, y, z)),
                _ => None,
            };
            graph.add_course(Course {
                id: CourseId::new(node.id),
                name: node.name,
                department: node.department,
                units: node.units,
                position,
            })?;
        }

        for link in self.links {
            graph.add_edge(PrerequisiteEdge::between(link.source, link.target))?;
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KnError;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "CS61A", "name": "Data Structures", "department": "CS", "units": 4,
             "x": 10.0, "y": -4.0, "z": 2.5},
            {"id": "CS61B", "name": "More Data Structures"},
            {"id": "MATH1A", "name": "Calculus"}
        ],
        "links": [
            {"source": "CS61A", "target": "CS61B"},
            {"source": "MATH1A", "target": "CS61B"}
        ]
    }"#;

    #[test]
    fn parses_and_builds_graph() {
        let graph = Dataset::from_json(SAMPLE).unwrap().into_graph().unwrap();
        assert_eq!(graph.course_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let prereqs = graph.prerequisites(&CourseId::new("CS61B"));
        assert_eq!(prereqs.len(), 2);
    }

    #[test]
    fn optional_fields_default_to_none() {
        let graph = Dataset::from_json(SAMPLE).unwrap().into_graph().unwrap();
        let course = graph.course(&CourseId::new("CS61B")).unwrap();
        assert!(course.department.is_none());
        assert!(course.units.is_none());
        assert!(course.position.is_none());
    }

    #[test]
    fn position_requires_all_three_coordinates() {
        let json = r#"{
            "nodes": [{"id": "CS61A", "name": "Data Structures", "x": 1.0, "y": 2.0}],
            "links": []
        }"#;
        let graph = Dataset::from_json(json).unwrap().into_graph().unwrap();
        let course = graph.course(&CourseId::new("CS61A")).unwrap();
        assert!(course.position.is_none());

        let graph = Dataset::from_json(SAMPLE).unwrap().into_graph().unwrap();
        let course = graph.course(&CourseId::new("CS61A")).unwrap();
        let position = course.position.unwrap();
        assert!((position.x - 10.0).abs() < f64::EPSILON);
        assert!((position.z - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn dangling_link_is_a_load_error() {
        let json = r#"{
            "nodes": [{"id": "CS61A", "name": "Data Structures"}],
            "links": [{"source": "CS61A", "target": "CS61B"}]
        }"#;
        let result = Dataset::from_json(json).unwrap().into_graph();
        assert!(matches!(result, Err(KnError::UnresolvedEndpoint { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = Dataset::from_json("{\"nodes\": [}");
        assert!(matches!(result, Err(KnError::Dataset(_))));
    }
}
