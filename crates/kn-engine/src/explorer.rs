use tracing::{debug, warn};

use kn_core::{CourseGraph, CourseId, Level};

use crate::camera::{CameraDirective, CameraRig, FOCUS_STANDOFF, OVERVIEW_DISTANCE_FACTOR};
use crate::error::{ExploreError, ExploreResult};
use crate::filter::{FilterState, GraphView, filter};
use crate::fuzzy;
use crate::rating::{RatingError, RatingRecord};

/// Tunables for an exploration session.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Maximum number of ranked results to keep per query.
    pub result_limit: usize,
    /// Camera standoff distance when focusing a course.
    pub camera_standoff: f64,
    /// Overview distance per cube root of the node count.
    pub overview_factor: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            result_limit: 10,
            camera_standoff: FOCUS_STANDOFF,
            overview_factor: OVERVIEW_DISTANCE_FACTOR,
        }
    }
}

impl ExplorerConfig {
    /// Set the ranked-result limit.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Set the camera standoff distance.
    pub fn with_camera_standoff(mut self, standoff: f64) -> Self {
        self.camera_standoff = standoff;
        self
    }

    /// Set the overview distance factor.
    pub fn with_overview_factor(mut self, factor: f64) -> Self {
        self.overview_factor = factor;
        self
    }
}

/// Where the interaction currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No query, no selection.
    Idle,
    /// A non-empty query is live, nothing selected yet.
    Searching,
    /// A course is selected and the camera aims at it.
    Focused(CourseId),
}

/// One ranked search hit, owned by the explorer state.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCourse {
    /// The matched course's id.
    pub id: CourseId,
    /// Its display label.
    pub label: String,
    /// Its fuzzy score.
    pub score: f64,
}

/// What the rating panel should show.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingSlot {
    /// Nothing selected, nothing to show.
    Empty,
    /// A fetch for the given generation is in flight.
    Pending {
        /// Generation of the selection the fetch belongs to.
        generation: u64,
    },
    /// The fetched record for the current selection.
    Ready(RatingRecord),
    /// The provider was unreachable; the rest of the flow is unaffected.
    Unavailable,
}

/// A rating fetch the surface must run on the explorer's behalf. The
/// generation tag is what makes late responses discardable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRequest {
    /// The course to fetch a rating for.
    pub course_id: CourseId,
    /// The selection generation this request belongs to.
    pub generation: u64,
}

/// Outcome of handing a rating response back to the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingApply {
    /// The response matched the current selection and was applied.
    Applied,
    /// The response belonged to a superseded selection and was discarded.
    Stale,
}

/// Something the explorer did that a surface may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    /// The interaction mode changed.
    ModeChanged {
        /// Previous mode.
        from: Mode,
        /// New mode.
        to: Mode,
    },
    /// The ranked result list was recomputed.
    ResultsUpdated {
        /// Number of results now held.
        count: usize,
    },
    /// The camera should transition.
    CameraMoved(CameraDirective),
    /// A rating arrived for the current selection.
    RatingResolved {
        /// The rated course.
        course_id: CourseId,
    },
    /// The provider failed for the current selection.
    RatingUnavailable {
        /// The course the fetch was for.
        course_id: CourseId,
    },
    /// A late response for a superseded selection was dropped.
    RatingDiscarded {
        /// Generation of the dropped response.
        generation: u64,
    },
    /// The active filter hid the focused course, forcing a return to idle.
    FocusHiddenByFilter {
        /// The course that was focused.
        course_id: CourseId,
    },
}

/// The exploration controller.
///
/// Sole owner of all mutable interaction state: query, ranked results,
/// filter selection, camera, rating slot, and the selection generation
/// counter. The course graph itself is immutable and passed in by
/// reference on every operation; everything here runs synchronously in
/// response to one discrete user event at a time. Surfaces observe by
/// reading the accessors and draining the event log — there are no
/// globals and no callbacks.
#[derive(Debug)]
pub struct Explorer {
    config: ExplorerConfig,
    mode: Mode,
    query: String,
    results: Vec<RankedCourse>,
    filter: FilterState,
    view: GraphView,
    camera: CameraRig,
    rating: RatingSlot,
    generation: u64,
    events: Vec<ExplorerEvent>,
}

impl Explorer {
    /// Create an explorer over a loaded graph, starting idle at the
    /// overview camera with no filter restrictions.
    pub fn new(graph: &CourseGraph, config: ExplorerConfig) -> Self {
        let mut camera = CameraRig::new(graph.course_count())
            .with_standoff(config.camera_standoff)
            .with_overview_factor(config.overview_factor);
        camera.overview(graph.course_count());

        Self {
            config,
            mode: Mode::Idle,
            query: String::new(),
            results: Vec::new(),
            filter: FilterState::new(),
            view: filter(graph, &FilterState::new()),
            camera,
            rating: RatingSlot::Empty,
            generation: 0,
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // User events
    // -----------------------------------------------------------------------

    /// The query text changed. Ranks against the currently filtered node
    /// set; an empty query is "no search" and returns to idle. Editing
    /// while focused drops the selection and pulls the camera back.
    pub fn edit_query(&mut self, graph: &CourseGraph, query: &str) {
        if matches!(self.mode, Mode::Focused(_)) {
            self.rating = RatingSlot::Empty;
            let directive = self.camera.overview(graph.course_count());
            self.events.push(ExplorerEvent::CameraMoved(directive));
        }

        self.query = query.to_string();
        if self.query.trim().is_empty() {
            self.results.clear();
            self.events.push(ExplorerEvent::ResultsUpdated { count: 0 });
            self.set_mode(Mode::Idle);
        } else {
            self.rerank(graph);
            self.set_mode(Mode::Searching);
        }
    }

    /// A course was picked — from the ranked results or from a
    /// prerequisite/postrequisite link; both re-enter `Focused` the same
    /// way. Bumps the selection generation and returns the rating fetch
    /// the surface must run. A course hidden by the active filter is
    /// rejected without touching any state.
    pub fn select(&mut self, graph: &CourseGraph, id: &CourseId) -> ExploreResult<RatingRequest> {
        let course = graph
            .course(id)
            .ok_or_else(|| ExploreError::CourseNotFound(id.clone()))?;
        if !self.view.contains_id(graph, id) {
            return Err(ExploreError::CourseNotVisible(id.clone()));
        }

        self.generation += 1;
        self.query = course.search_label();
        self.rating = RatingSlot::Pending {
            generation: self.generation,
        };
        self.set_mode(Mode::Focused(id.clone()));

        match course.position {
            Some(position) => {
                let before = self.camera.directive();
                let directive = self.camera.focus(position);
                if directive != before {
                    self.events.push(ExplorerEvent::CameraMoved(directive));
                }
            }
            None => warn!(course = %id, "selected course has no layout position; camera unchanged"),
        }

        Ok(RatingRequest {
            course_id: id.clone(),
            generation: self.generation,
        })
    }

    /// A rating response came back. Applied only if it belongs to the
    /// current selection generation; anything else is a late response for
    /// a superseded selection and is discarded (last selection wins).
    pub fn apply_rating(
        &mut self,
        generation: u64,
        result: Result<RatingRecord, RatingError>,
    ) -> RatingApply {
        let course_id = match &self.mode {
            Mode::Focused(id) if generation == self.generation => id.clone(),
            _ => {
                debug!(
                    response = generation,
                    current = self.generation,
                    "discarding rating response for a superseded selection"
                );
                self.events
                    .push(ExplorerEvent::RatingDiscarded { generation });
                return RatingApply::Stale;
            }
        };

        match result {
            Ok(record) => {
                self.rating = RatingSlot::Ready(record);
                self.events
                    .push(ExplorerEvent::RatingResolved { course_id });
            }
            Err(err) => {
                debug!(course = %course_id, error = %err, "rating provider unavailable");
                self.rating = RatingSlot::Unavailable;
                self.events
                    .push(ExplorerEvent::RatingUnavailable { course_id });
            }
        }
        RatingApply::Applied
    }

    /// Replace the filter selection wholesale.
    pub fn set_filter(&mut self, graph: &CourseGraph, state: FilterState) {
        self.filter = state.normalized();
        self.apply_filter(graph);
    }

    /// Toggle one department in the selection.
    pub fn toggle_department(&mut self, graph: &CourseGraph, department: &str) {
        self.filter.toggle_department(department);
        self.apply_filter(graph);
    }

    /// Toggle one level bucket in the selection.
    pub fn toggle_level(&mut self, graph: &CourseGraph, level: Level) {
        self.filter.toggle_level(level);
        self.apply_filter(graph);
    }

    /// Explicit clear: back to idle. Pulls the camera out only when a
    /// course was focused.
    pub fn clear(&mut self, graph: &CourseGraph) {
        let was_focused = matches!(self.mode, Mode::Focused(_));
        self.query.clear();
        self.results.clear();
        self.events.push(ExplorerEvent::ResultsUpdated { count: 0 });
        self.rating = RatingSlot::Empty;
        self.set_mode(Mode::Idle);
        if was_focused {
            let directive = self.camera.overview(graph.course_count());
            self.events.push(ExplorerEvent::CameraMoved(directive));
        }
    }

    // -----------------------------------------------------------------------
    // Observation
    // -----------------------------------------------------------------------

    /// Current interaction mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current ranked results.
    pub fn results(&self) -> &[RankedCourse] {
        &self.results
    }

    /// Current filter selection.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// The filtered view of the graph.
    pub fn view(&self) -> &GraphView {
        &self.view
    }

    /// The camera directive the surface should currently honor.
    pub fn camera(&self) -> CameraDirective {
        self.camera.directive()
    }

    /// What the rating panel should show.
    pub fn rating(&self) -> &RatingSlot {
        &self.rating
    }

    /// The current selection generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<ExplorerEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn set_mode(&mut self, to: Mode) {
        if self.mode != to {
            let from = std::mem::replace(&mut self.mode, to.clone());
            self.events.push(ExplorerEvent::ModeChanged { from, to });
        }
    }

    fn rerank(&mut self, graph: &CourseGraph) {
        let matches = fuzzy::rank(
            self.view.courses(graph),
            &self.query,
            self.config.result_limit,
        );
        self.results = matches
            .into_iter()
            .map(|m| RankedCourse {
                id: m.course.id.clone(),
                label: m.course.search_label(),
                score: m.score,
            })
            .collect();
        self.events.push(ExplorerEvent::ResultsUpdated {
            count: self.results.len(),
        });
    }

    fn apply_filter(&mut self, graph: &CourseGraph) {
        self.view = filter(graph, &self.filter);
        if !self.query.trim().is_empty() && !matches!(self.mode, Mode::Focused(_)) {
            self.rerank(graph);
        }

        // A focused course must never stay on screen while the filter
        // hides it from the graph.
        if let Mode::Focused(id) = self.mode.clone()
            && !self.view.contains_id(graph, &id)
        {
            self.events
                .push(ExplorerEvent::FocusHiddenByFilter { course_id: id });
            self.query.clear();
            self.results.clear();
            self.rating = RatingSlot::Empty;
            self.set_mode(Mode::Idle);
            let directive = self.camera.overview(graph.course_count());
            self.events.push(ExplorerEvent::CameraMoved(directive));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{RatingProvider, SyntheticRatings, synthesize};
    use kn_core::{Course, Level, PrerequisiteEdge, Vec3};

    fn sample_graph() -> CourseGraph {
        let mut graph = CourseGraph::new();
        let specs: &[(&str, &str, &str, Option<Vec3>)] = &[
            ("CS101", "Intro to Programs", "CS", Some(Vec3::new(10.0, 20.0, 20.0))),
            ("CS102", "Program Structures", "CS", Some(Vec3::new(-30.0, 0.0, 40.0))),
            ("CS170", "Efficient Algorithms", "CS", Some(Vec3::new(0.0, 50.0, 0.0))),
            ("STAT20", "Introduction to Probability", "STAT", Some(Vec3::new(5.0, 5.0, 5.0))),
            ("CS199", "Directed Study", "CS", None),
            ("CS200", "Grounded Origin Seminar", "CS", Some(Vec3::ORIGIN)),
        ];
        for (id, name, department, position) in specs {
            let mut course = Course::new(*id, *name);
            course.department = Some(department.to_string());
            course.position = *position;
            graph.add_course(course).unwrap();
        }
        for (source, target) in [("CS101", "CS102"), ("CS102", "CS170"), ("STAT20", "CS170")] {
            graph
                .add_edge(PrerequisiteEdge::between(source, target))
                .unwrap();
        }
        graph
    }

    fn explorer(graph: &CourseGraph) -> Explorer {
        Explorer::new(graph, ExplorerConfig::default())
    }

    #[test]
    fn starts_idle_at_overview() {
        let graph = sample_graph();
        let explorer = explorer(&graph);
        assert_eq!(*explorer.mode(), Mode::Idle);
        assert_eq!(explorer.camera().look_at, Vec3::ORIGIN);
        assert_eq!(*explorer.rating(), RatingSlot::Empty);
        assert_eq!(explorer.view().course_count(), graph.course_count());
    }

    #[test]
    fn editing_query_enters_searching() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.edit_query(&graph, "cs1");
        assert_eq!(*explorer.mode(), Mode::Searching);
        assert!(!explorer.results().is_empty());
        assert!(explorer.results().iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn clearing_query_returns_to_idle() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.edit_query(&graph, "cs1");
        explorer.edit_query(&graph, "");
        assert_eq!(*explorer.mode(), Mode::Idle);
        assert!(explorer.results().is_empty());
    }

    #[test]
    fn ranking_respects_the_active_filter() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.set_filter(&graph, FilterState::new().with_departments(["CS"]));
        explorer.edit_query(&graph, "intro");
        // "Introduction to Probability" is hidden; only the CS intro matches.
        assert!(explorer.results().iter().all(|r| r.id.as_str() != "STAT20"));
        assert!(explorer.results().iter().any(|r| r.id.as_str() == "CS101"));
    }

    #[test]
    fn select_focuses_and_issues_generation_tagged_request() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.edit_query(&graph, "cs101");
        let request = explorer.select(&graph, &CourseId::new("CS101")).unwrap();

        assert_eq!(*explorer.mode(), Mode::Focused(CourseId::new("CS101")));
        assert_eq!(request.generation, 1);
        assert_eq!(request.course_id.as_str(), "CS101");
        assert_eq!(
            *explorer.rating(),
            RatingSlot::Pending { generation: 1 }
        );
        // |(10,20,20)| = 30, ratio = 1 + 100/30; camera aims at the course.
        assert_eq!(explorer.camera().look_at, Vec3::new(10.0, 20.0, 20.0));
    }

    #[test]
    fn select_unknown_course_is_rejected() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let result = explorer.select(&graph, &CourseId::new("CS999"));
        assert!(matches!(result, Err(ExploreError::CourseNotFound(_))));
        assert_eq!(*explorer.mode(), Mode::Idle);
    }

    #[test]
    fn select_hidden_course_is_rejected_without_state_change() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.set_filter(&graph, FilterState::new().with_departments(["CS"]));
        let generation_before = explorer.generation();

        let result = explorer.select(&graph, &CourseId::new("STAT20"));
        assert!(matches!(result, Err(ExploreError::CourseNotVisible(_))));
        assert_eq!(*explorer.mode(), Mode::Idle);
        assert_eq!(explorer.generation(), generation_before);
    }

    #[test]
    fn rating_response_applies_to_current_selection() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let request = explorer.select(&graph, &CourseId::new("CS101")).unwrap();

        let record = SyntheticRatings.fetch(&request.course_id).unwrap();
        let outcome = explorer.apply_rating(request.generation, Ok(record.clone()));
        assert_eq!(outcome, RatingApply::Applied);
        assert_eq!(*explorer.rating(), RatingSlot::Ready(record));
    }

    #[test]
    fn late_response_for_superseded_selection_is_discarded() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);

        // Select A; its fetch is in flight when B is selected.
        let request_a = explorer.select(&graph, &CourseId::new("CS101")).unwrap();
        let request_b = explorer.select(&graph, &CourseId::new("CS102")).unwrap();

        // B's response lands first.
        let record_b = synthesize(&request_b.course_id);
        assert_eq!(
            explorer.apply_rating(request_b.generation, Ok(record_b.clone())),
            RatingApply::Applied
        );

        // A's response arrives late and must not overwrite B's.
        let record_a = synthesize(&request_a.course_id);
        assert_eq!(
            explorer.apply_rating(request_a.generation, Ok(record_a)),
            RatingApply::Stale
        );
        assert_eq!(*explorer.rating(), RatingSlot::Ready(record_b));
        assert!(
            explorer
                .drain_events()
                .iter()
                .any(|e| matches!(e, ExplorerEvent::RatingDiscarded { generation } if *generation == request_a.generation))
        );
    }

    #[test]
    fn provider_failure_is_an_explicit_unavailable_state() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let request = explorer.select(&graph, &CourseId::new("CS101")).unwrap();
        let camera_before = explorer.camera();

        let outcome = explorer.apply_rating(
            request.generation,
            Err(RatingError::Unavailable("connect timeout".into())),
        );
        assert_eq!(outcome, RatingApply::Applied);
        assert_eq!(*explorer.rating(), RatingSlot::Unavailable);
        // Selection and camera are unaffected by the failure.
        assert_eq!(*explorer.mode(), Mode::Focused(CourseId::new("CS101")));
        assert_eq!(explorer.camera(), camera_before);
    }

    #[test]
    fn filter_hiding_focused_course_forces_idle_and_overview() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("STAT20")).unwrap();
        explorer.drain_events();

        explorer.set_filter(&graph, FilterState::new().with_departments(["CS"]));

        assert_eq!(*explorer.mode(), Mode::Idle);
        assert_eq!(*explorer.rating(), RatingSlot::Empty);
        assert_eq!(explorer.camera().look_at, Vec3::ORIGIN);
        let events = explorer.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            ExplorerEvent::FocusHiddenByFilter { course_id } if course_id.as_str() == "STAT20"
        )));
    }

    #[test]
    fn filter_keeping_focused_course_stays_focused() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("CS101")).unwrap();

        explorer.set_filter(&graph, FilterState::new().with_departments(["CS"]));
        assert_eq!(*explorer.mode(), Mode::Focused(CourseId::new("CS101")));
    }

    #[test]
    fn level_toggle_hiding_focused_course_forces_idle() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("CS170")).unwrap();

        // Restrict to lower division; CS170 is upper.
        explorer.toggle_level(&graph, Level::Lower);
        assert_eq!(*explorer.mode(), Mode::Idle);
    }

    #[test]
    fn prerequisite_link_reselection_re_enters_focused() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("CS102")).unwrap();

        let prereqs = explorer.view().prerequisites(&graph, &CourseId::new("CS102"));
        assert_eq!(prereqs.len(), 1);
        let prereq_id = prereqs[0].id.clone();

        let request = explorer.select(&graph, &prereq_id).unwrap();
        assert_eq!(*explorer.mode(), Mode::Focused(prereq_id));
        assert_eq!(request.generation, 2);
    }

    #[test]
    fn clear_from_focused_unfocuses() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("CS101")).unwrap();
        explorer.clear(&graph);

        assert_eq!(*explorer.mode(), Mode::Idle);
        assert_eq!(explorer.query(), "");
        assert_eq!(explorer.camera().look_at, Vec3::ORIGIN);
    }

    #[test]
    fn editing_query_while_focused_drops_selection() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.select(&graph, &CourseId::new("CS101")).unwrap();

        explorer.edit_query(&graph, "stat");
        assert_eq!(*explorer.mode(), Mode::Searching);
        assert_eq!(*explorer.rating(), RatingSlot::Empty);
        assert_eq!(explorer.camera().look_at, Vec3::ORIGIN);
    }

    #[test]
    fn course_without_position_still_focuses_without_camera_move() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let camera_before = explorer.camera();
        explorer.drain_events();

        let request = explorer.select(&graph, &CourseId::new("CS199")).unwrap();
        assert_eq!(*explorer.mode(), Mode::Focused(CourseId::new("CS199")));
        assert_eq!(request.generation, 1);
        assert_eq!(explorer.camera(), camera_before);
        assert!(
            !explorer
                .drain_events()
                .iter()
                .any(|e| matches!(e, ExplorerEvent::CameraMoved(_)))
        );
    }

    #[test]
    fn course_at_origin_focuses_without_camera_move() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let camera_before = explorer.camera();

        explorer.select(&graph, &CourseId::new("CS200")).unwrap();
        assert_eq!(*explorer.mode(), Mode::Focused(CourseId::new("CS200")));
        assert_eq!(explorer.camera(), camera_before);
    }

    #[test]
    fn generations_increase_monotonically() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        let g1 = explorer.select(&graph, &CourseId::new("CS101")).unwrap().generation;
        let g2 = explorer.select(&graph, &CourseId::new("CS102")).unwrap().generation;
        let g3 = explorer.select(&graph, &CourseId::new("CS101")).unwrap().generation;
        assert!(g1 < g2 && g2 < g3);
    }

    #[test]
    fn drain_events_empties_the_log() {
        let graph = sample_graph();
        let mut explorer = explorer(&graph);
        explorer.edit_query(&graph, "cs");
        assert!(!explorer.drain_events().is_empty());
        assert!(explorer.drain_events().is_empty());
    }
}
