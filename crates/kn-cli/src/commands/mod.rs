pub mod departments;
pub mod filter;
pub mod info;
pub mod rate;
pub mod search;
pub mod show;

use std::path::Path;

use kn_core::{CourseGraph, Dataset, Level};
use kn_engine::FilterState;

/// Load a dataset file and build the immutable course graph every command
/// works against.
pub fn load_graph(data: &Path) -> Result<CourseGraph, String> {
    Dataset::load(data)
        .and_then(Dataset::into_graph)
        .map_err(|e| format!("could not load dataset {}: {e}", data.display()))
}

/// Build a filter selection from CLI flags. Unrecognized level names are
/// warned about and skipped — a malformed selection entry never fails the
/// command, it just doesn't restrict anything.
pub fn filter_from_flags(departments: &[String], levels: &[String]) -> FilterState {
    let parsed: Vec<Level> = levels
        .iter()
        .filter_map(|name| {
            let level = Level::parse(name);
            if level.is_none() {
                eprintln!("warning: unknown level \"{name}\" ignored (expected lower, upper, or graduate)");
            }
            level
        })
        .collect();

    FilterState::new()
        .with_departments(departments.iter().cloned())
        .with_levels(parsed)
}
