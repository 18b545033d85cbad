use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use kn_engine::{filter, fuzzy};

pub fn run(
    data: &Path,
    query: &str,
    limit: usize,
    departments: &[String],
    levels: &[String],
) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    let state = super::filter_from_flags(departments, levels);
    let view = filter(&graph, &state);
    let ranked = fuzzy::rank(view.courses(&graph), query, limit);

    if ranked.is_empty() {
        println!("  No courses match \"{}\".", query);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Course", "Name", "Score"]);

    for m in &ranked {
        table.add_row(vec![
            m.course.id.as_str().to_string(),
            m.course.name.clone(),
            format!("{:.3}", m.score),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} matches for \"{}\"", ranked.len(), query);

    Ok(())
}
