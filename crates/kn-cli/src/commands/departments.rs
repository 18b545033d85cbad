use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(data: &Path) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    let departments = graph.departments();
    if departments.is_empty() {
        println!("  No departments found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Department", "Courses"]);

    for (name, count) in &departments {
        table.add_row(vec![name.clone(), count.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} departments", departments.len());

    Ok(())
}
