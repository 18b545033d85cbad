use kn_core::{CourseGraph, CourseId, Level};
use kn_engine::{Explorer, ExplorerConfig, ExplorerEvent, Mode, RatingProvider, SyntheticRatings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Results,
    Filters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// A selectable prerequisite/postrequisite link in the detail pane.
#[derive(Debug, Clone)]
pub struct DetailLink {
    pub course_id: CourseId,
    pub label: String,
    pub prerequisite: bool,
}

/// The three level rows shown at the top of the filter pane.
pub const LEVEL_ROWS: [Level; 3] = [Level::Lower, Level::Upper, Level::Graduate];

pub struct App {
    pub graph: CourseGraph,
    pub explorer: Explorer,
    pub input_mode: InputMode,
    pub active_pane: ActivePane,
    pub show_help: bool,

    // Cursors
    pub results_cursor: usize,
    pub link_cursor: usize,
    pub filter_cursor: usize,

    // Filter pane data (census order is stable for the process lifetime)
    pub departments: Vec<(String, usize)>,

    // One-line event feedback shown in the status bar
    pub status: String,
}

impl App {
    pub fn new(graph: CourseGraph) -> Self {
        let explorer = Explorer::new(&graph, ExplorerConfig::default());
        let departments: Vec<(String, usize)> = graph
            .departments()
            .into_iter()
            .collect();
        Self {
            graph,
            explorer,
            input_mode: InputMode::Normal,
            active_pane: ActivePane::Results,
            show_help: false,
            results_cursor: 0,
            link_cursor: 0,
            filter_cursor: 0,
            departments,
            status: String::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.explorer.edit_query(&self.graph, "");
        self.results_cursor = 0;
        self.after_update();
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.explorer.clear(&self.graph);
        self.results_cursor = 0;
        self.after_update();
    }

    pub fn confirm_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn search_push(&mut self, c: char) {
        let query = format!("{}{}", self.explorer.query(), c);
        self.explorer.edit_query(&self.graph, &query);
        self.results_cursor = 0;
        self.after_update();
    }

    pub fn search_backspace(&mut self) {
        let mut query = self.explorer.query().to_string();
        query.pop();
        self.explorer.edit_query(&self.graph, &query);
        self.results_cursor = 0;
        self.after_update();
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    pub fn is_focused(&self) -> bool {
        matches!(self.explorer.mode(), Mode::Focused(_))
    }

    pub fn selected_result_id(&self) -> Option<CourseId> {
        self.explorer
            .results()
            .get(self.results_cursor)
            .map(|r| r.id.clone())
    }

    pub fn select_result(&mut self) {
        if let Some(id) = self.selected_result_id() {
            self.select_course(&id);
        }
    }

    /// The detail pane's selectable links: the focused course's
    /// prerequisites and postrequisites within the filtered view.
    pub fn focused_links(&self) -> Vec<DetailLink> {
        let Mode::Focused(id) = self.explorer.mode() else {
            return Vec::new();
        };
        let view = self.explorer.view();
        let mut links = Vec::new();
        for course in view.prerequisites(&self.graph, id) {
            links.push(DetailLink {
                course_id: course.id.clone(),
                label: course.search_label(),
                prerequisite: true,
            });
        }
        for course in view.postrequisites(&self.graph, id) {
            links.push(DetailLink {
                course_id: course.id.clone(),
                label: course.search_label(),
                prerequisite: false,
            });
        }
        links
    }

    pub fn select_link(&mut self) {
        let links = self.focused_links();
        if let Some(link) = links.get(self.link_cursor) {
            let id = link.course_id.clone();
            self.select_course(&id);
        }
    }

    fn select_course(&mut self, id: &CourseId) {
        match self.explorer.select(&self.graph, id) {
            Ok(request) => {
                // The synthesizer answers instantly, but its response goes
                // through the same generation guard a slow provider's would.
                let response = SyntheticRatings.fetch(&request.course_id);
                self.explorer.apply_rating(request.generation, response);
                self.link_cursor = 0;
            }
            Err(e) => self.status = e.to_string(),
        }
        self.after_update();
    }

    pub fn clear(&mut self) {
        self.explorer.clear(&self.graph);
        self.results_cursor = 0;
        self.link_cursor = 0;
        self.after_update();
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    pub fn filter_row_count(&self) -> usize {
        LEVEL_ROWS.len() + self.departments.len()
    }

    pub fn toggle_filter_row(&mut self) {
        if self.filter_cursor < LEVEL_ROWS.len() {
            let level = LEVEL_ROWS[self.filter_cursor];
            self.explorer.toggle_level(&self.graph, level);
        } else if let Some((department, _)) =
            self.departments.get(self.filter_cursor - LEVEL_ROWS.len())
        {
            let department = department.clone();
            self.explorer.toggle_department(&self.graph, &department);
        }
        self.results_cursor = 0;
        self.after_update();
    }

    pub fn toggle_level(&mut self, level: Level) {
        self.explorer.toggle_level(&self.graph, level);
        self.results_cursor = 0;
        self.after_update();
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Filters => {
                if self.filter_cursor + 1 < self.filter_row_count() {
                    self.filter_cursor += 1;
                }
            }
            ActivePane::Results => {
                if matches!(self.explorer.mode(), Mode::Focused(_)) {
                    let count = self.focused_links().len();
                    if self.link_cursor + 1 < count {
                        self.link_cursor += 1;
                    }
                } else if self.results_cursor + 1 < self.explorer.results().len() {
                    self.results_cursor += 1;
                }
            }
        }
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Filters => self.filter_cursor = self.filter_cursor.saturating_sub(1),
            ActivePane::Results => {
                if matches!(self.explorer.mode(), Mode::Focused(_)) {
                    self.link_cursor = self.link_cursor.saturating_sub(1);
                } else {
                    self.results_cursor = self.results_cursor.saturating_sub(1);
                }
            }
        }
    }

    pub fn next_pane(&mut self) {
        self.active_pane = match self.active_pane {
            ActivePane::Results => ActivePane::Filters,
            ActivePane::Filters => ActivePane::Results,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    /// Drain engine events into the status line and re-clamp cursors.
    fn after_update(&mut self) {
        for event in self.explorer.drain_events() {
            match event {
                ExplorerEvent::CameraMoved(directive) => {
                    self.status = format!(
                        "camera → ({:.0}, {:.0}, {:.0}) over {} ms",
                        directive.position.x,
                        directive.position.y,
                        directive.position.z,
                        directive.transition_ms
                    );
                }
                ExplorerEvent::FocusHiddenByFilter { course_id } => {
                    self.status = format!("{course_id} hidden by filter; selection cleared");
                }
                ExplorerEvent::RatingDiscarded { .. } => {
                    self.status = "stale rating response discarded".to_string();
                }
                ExplorerEvent::RatingUnavailable { course_id } => {
                    self.status = format!("ratings unavailable for {course_id}");
                }
                _ => {}
            }
        }

        let results = self.explorer.results().len();
        if self.results_cursor >= results && results > 0 {
            self.results_cursor = results - 1;
        }
        let links = self.focused_links().len();
        if self.link_cursor >= links && links > 0 {
            self.link_cursor = links - 1;
        }
    }
}
