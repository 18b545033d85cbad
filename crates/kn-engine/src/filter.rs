use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use kn_core::{Course, CourseGraph, CourseId, CourseRef, Level};

/// The user's department/level selection.
///
/// Policy, fixed and tested: an empty selection set places no restriction
/// on that dimension. Filtering by department alone never implicitly
/// excludes by level, and vice versa; clearing both selections shows the
/// whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    departments: BTreeSet<String>,
    levels: BTreeSet<Level>,
}

impl FilterState {
    /// A selection with no restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given departments (case-insensitive).
    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given level buckets.
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    /// Add or remove a department from the selection.
    pub fn toggle_department(&mut self, department: &str) {
        let key = department.to_lowercase();
        if !self.departments.remove(&key) {
            self.departments.insert(key);
        }
    }

    /// Add or remove a level bucket from the selection.
    pub fn toggle_level(&mut self, level: Level) {
        if !self.levels.remove(&level) {
            self.levels.insert(level);
        }
    }

    /// Drop all restrictions.
    pub fn clear(&mut self) {
        self.departments.clear();
        self.levels.clear();
    }

    /// The selected departments (lowercased by [`FilterState::normalized`]).
    pub fn departments(&self) -> &BTreeSet<String> {
        &self.departments
    }

    /// The selected level buckets.
    pub fn levels(&self) -> &BTreeSet<Level> {
        &self.levels
    }

    /// `true` when neither dimension is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.departments.is_empty() && self.levels.is_empty()
    }

    /// Recovery for malformed selections: blank department entries are
    /// dropped and the rest lowercased. A selection that normalizes to
    /// empty is simply unrestricted — never an error.
    pub fn normalized(&self) -> Self {
        Self {
            departments: self
                .departments
                .iter()
                .filter(|d| !d.trim().is_empty())
                .map(|d| d.trim().to_lowercase())
                .collect(),
            levels: self.levels.clone(),
        }
    }

    fn passes(&self, course: &Course) -> bool {
        if !self.departments.is_empty()
            && !self.departments.contains(&course.department().to_lowercase())
        {
            return false;
        }

        if !self.levels.is_empty() {
            // A course with no parseable number matches no level bucket.
            match Level::of(&course.id) {
                Some(level) if self.levels.contains(&level) => {}
                _ => return false,
            }
        }

        true
    }
}

/// An index-based subset of a [`CourseGraph`]: the courses passing a
/// filter plus the edges whose endpoints both survived. Edges with a
/// hidden endpoint are dropped silently — that is the documented outcome,
/// not an error.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    nodes: Vec<CourseRef>,
    node_set: HashSet<usize>,
    edges: Vec<usize>,
    edge_set: HashSet<usize>,
}

/// Apply a selection to a graph. Pure: the graph is untouched and the same
/// inputs always produce the same view.
pub fn filter(graph: &CourseGraph, state: &FilterState) -> GraphView {
    let state = state.normalized();

    let mut view = GraphView::default();
    for (index, course) in graph.courses().iter().enumerate() {
        if state.passes(course) {
            view.nodes.push(CourseRef(index));
            view.node_set.insert(index);
        }
    }

    for index in 0..graph.edge_count() {
        let Some((source, target)) = graph.endpoints(index) else {
            continue;
        };
        if view.node_set.contains(&source.0) && view.node_set.contains(&target.0) {
            view.edges.push(index);
            view.edge_set.insert(index);
        }
    }

    view
}

impl GraphView {
    /// `true` when the course survived the filter.
    pub fn contains(&self, r: CourseRef) -> bool {
        self.node_set.contains(&r.0)
    }

    /// `true` when the course with this id survived the filter.
    pub fn contains_id(&self, graph: &CourseGraph, id: &CourseId) -> bool {
        graph.course_ref(id).is_some_and(|r| self.contains(r))
    }

    /// The surviving courses in graph order.
    pub fn courses<'g>(&self, graph: &'g CourseGraph) -> Vec<&'g Course> {
        self.nodes
            .iter()
            .filter_map(|&r| graph.course_at(r))
            .collect()
    }

    /// Indices (into the graph's edge table) of the surviving edges.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Number of surviving courses.
    pub fn course_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of surviving edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Prerequisites of a course, restricted to surviving edges. This is
    /// what a detail panel links to, so it never offers a hidden course.
    pub fn prerequisites<'g>(&self, graph: &'g CourseGraph, id: &CourseId) -> Vec<&'g Course> {
        let Some(r) = graph.course_ref(id) else {
            return Vec::new();
        };
        graph
            .incoming(r)
            .iter()
            .filter(|&&e| self.edge_set.contains(&e))
            .filter_map(|&e| graph.edges()[e].source.resolve(graph))
            .collect()
    }

    /// Postrequisites of a course, restricted to surviving edges.
    pub fn postrequisites<'g>(&self, graph: &'g CourseGraph, id: &CourseId) -> Vec<&'g Course> {
        let Some(r) = graph.course_ref(id) else {
            return Vec::new();
        };
        graph
            .outgoing(r)
            .iter()
            .filter(|&&e| self.edge_set.contains(&e))
            .filter_map(|&e| graph.edges()[e].target.resolve(graph))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kn_core::PrerequisiteEdge;
    use proptest::prelude::*;

    fn sample_graph() -> CourseGraph {
        let mut graph = CourseGraph::new();
        for (id, name, department) in [
            ("CS101", "Intro to Programs", Some("CS")),
            ("CS102", "Program Structures", Some("CS")),
            ("CS103", "Discrete Structures", Some("Math & CS")),
            ("CS170", "Efficient Algorithms", Some("CS")),
            ("CS270", "Combinatorial Algorithms", Some("CS")),
            ("STAT20", "Introduction to Probability", None),
            ("COLLOQUIUM", "Departmental Colloquium", Some("CS")),
        ] {
            let mut course = Course::new(id, name);
            course.department = department.map(str::to_string);
            graph.add_course(course).unwrap();
        }
        for (source, target) in [
            ("CS101", "CS102"),
            ("CS102", "CS103"),
            ("CS102", "CS170"),
            ("CS170", "CS270"),
            ("STAT20", "CS170"),
        ] {
            graph
                .add_edge(PrerequisiteEdge::between(source, target))
                .unwrap();
        }
        graph
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let graph = sample_graph();
        let view = filter(&graph, &FilterState::new());
        assert_eq!(view.course_count(), graph.course_count());
        assert_eq!(view.edge_count(), graph.edge_count());
    }

    #[test]
    fn department_filter_drops_edges_with_hidden_endpoints() {
        let graph = sample_graph();
        // "Math & CS" holds only CS103; restricting to plain CS hides it,
        // so CS102→CS103 must disappear along with it.
        let state = FilterState::new().with_departments(["CS"]);
        let view = filter(&graph, &state);

        assert!(!view.contains_id(&graph, &CourseId::new("CS103")));
        assert!(!view.contains_id(&graph, &CourseId::new("STAT20")));
        for &e in view.edges() {
            let (source, target) = graph.endpoints(e).unwrap();
            assert!(view.contains(source));
            assert!(view.contains(target));
        }
        // CS102→CS103 and STAT20→CS170 are gone, the CS-internal chain stays.
        assert_eq!(view.edge_count(), 3);
    }

    #[test]
    fn chain_loses_tail_edge_when_endpoint_hidden() {
        let mut graph = CourseGraph::new();
        for (id, department) in [("CS101", "CS"), ("CS102", "CS"), ("CS103", "EE")] {
            let mut course = Course::new(id, id);
            course.department = Some(department.to_string());
            graph.add_course(course).unwrap();
        }
        graph
            .add_edge(PrerequisiteEdge::between("CS101", "CS102"))
            .unwrap();
        graph
            .add_edge(PrerequisiteEdge::between("CS102", "CS103"))
            .unwrap();

        let view = filter(&graph, &FilterState::new().with_departments(["CS"]));
        assert_eq!(view.course_count(), 2);
        assert_eq!(view.edge_count(), 1);
        let (source, target) = graph.endpoints(view.edges()[0]).unwrap();
        assert_eq!(graph.course_at(source).unwrap().id.as_str(), "CS101");
        assert_eq!(graph.course_at(target).unwrap().id.as_str(), "CS102");
    }

    #[test]
    fn level_filter_uses_numeric_buckets() {
        let graph = sample_graph();
        // STAT20 is the only lower-division course; CS101 is 101 and upper.
        let view = filter(&graph, &FilterState::new().with_levels([Level::Lower]));
        assert!(view.contains_id(&graph, &CourseId::new("STAT20")));
        assert!(!view.contains_id(&graph, &CourseId::new("CS101")));
        assert!(!view.contains_id(&graph, &CourseId::new("CS270")));
        assert_eq!(view.course_count(), 1);

        let view = filter(&graph, &FilterState::new().with_levels([Level::Upper]));
        assert!(view.contains_id(&graph, &CourseId::new("CS101")));
        assert!(view.contains_id(&graph, &CourseId::new("CS170")));
        assert!(!view.contains_id(&graph, &CourseId::new("CS270")));
        assert!(!view.contains_id(&graph, &CourseId::new("STAT20")));

        let view = filter(&graph, &FilterState::new().with_levels([Level::Graduate]));
        assert!(view.contains_id(&graph, &CourseId::new("CS270")));
        assert_eq!(view.course_count(), 1);
    }

    #[test]
    fn course_without_number_matches_no_level_bucket() {
        let graph = sample_graph();
        let unrestricted = filter(&graph, &FilterState::new());
        assert!(unrestricted.contains_id(&graph, &CourseId::new("COLLOQUIUM")));

        let any_level = FilterState::new().with_levels([Level::Lower, Level::Upper, Level::Graduate]);
        let view = filter(&graph, &any_level);
        assert!(!view.contains_id(&graph, &CourseId::new("COLLOQUIUM")));
    }

    #[test]
    fn department_filter_does_not_restrict_level() {
        let graph = sample_graph();
        let view = filter(&graph, &FilterState::new().with_departments(["CS"]));
        // Upper, graduate, and unleveled CS courses all survive.
        assert!(view.contains_id(&graph, &CourseId::new("CS101")));
        assert!(view.contains_id(&graph, &CourseId::new("CS270")));
        assert!(view.contains_id(&graph, &CourseId::new("COLLOQUIUM")));
    }

    #[test]
    fn department_matching_is_case_insensitive() {
        let graph = sample_graph();
        let view = filter(&graph, &FilterState::new().with_departments(["cs"]));
        assert!(view.contains_id(&graph, &CourseId::new("CS101")));

        let view = filter(&graph, &FilterState::new().with_departments(["MATH & cs"]));
        assert!(view.contains_id(&graph, &CourseId::new("CS103")));
    }

    #[test]
    fn blank_department_entries_are_ignored() {
        let graph = sample_graph();
        let state = FilterState::new().with_departments(["", "   "]);
        let view = filter(&graph, &state);
        // Normalizes to an unrestricted selection.
        assert_eq!(view.course_count(), graph.course_count());
    }

    #[test]
    fn toggles_flip_membership() {
        let mut state = FilterState::new();
        state.toggle_department("CS");
        state.toggle_level(Level::Upper);
        assert!(!state.is_unrestricted());
        state.toggle_department("CS");
        state.toggle_level(Level::Upper);
        assert!(state.is_unrestricted());
    }

    #[test]
    fn view_scoped_neighbor_queries() {
        let graph = sample_graph();
        let view = filter(&graph, &FilterState::new().with_departments(["CS"]));

        // STAT20 is hidden, so CS170's in-view prerequisites shrink to CS102.
        let prereqs = view.prerequisites(&graph, &CourseId::new("CS170"));
        assert_eq!(prereqs.len(), 1);
        assert_eq!(prereqs[0].id.as_str(), "CS102");

        // CS103 is hidden, so CS102's in-view postrequisites shrink to CS170.
        let postreqs = view.postrequisites(&graph, &CourseId::new("CS102"));
        assert_eq!(postreqs.len(), 1);
        assert_eq!(postreqs[0].id.as_str(), "CS170");
    }

    proptest! {
        #[test]
        fn filtered_edges_always_keep_both_endpoints(
            departments in proptest::collection::btree_set("[A-Z]{2}", 0..3),
            levels in proptest::collection::btree_set(
                prop_oneof![Just(Level::Lower), Just(Level::Upper), Just(Level::Graduate)],
                0..3,
            ),
        ) {
            let graph = sample_graph();
            let state = FilterState::new()
                .with_departments(departments)
                .with_levels(levels);
            let view = filter(&graph, &state);

            for &e in view.edges() {
                let (source, target) = graph.endpoints(e).unwrap();
                prop_assert!(view.contains(source));
                prop_assert!(view.contains(target));
            }
        }
    }
}
