use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use kn_core::Level;
use kn_engine::filter;

pub fn run(data: &Path, departments: &[String], levels: &[String]) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    let state = super::filter_from_flags(departments, levels);
    let view = filter(&graph, &state);

    if view.course_count() == 0 {
        println!("  No courses pass the filter.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Course", "Name", "Department", "Level"]);

    for course in view.courses(&graph) {
        let level = Level::of(&course.id)
            .map(|l| l.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            course.id.as_str().to_string(),
            course.name.clone(),
            course.department().to_string(),
            level,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} of {} courses, {} of {} edges survive",
        view.course_count(),
        graph.course_count(),
        view.edge_count(),
        graph.edge_count()
    );

    Ok(())
}
