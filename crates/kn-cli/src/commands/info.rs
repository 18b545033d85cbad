use std::path::Path;

use kn_core::Level;

pub fn run(data: &Path) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    println!("  {} courses, {} prerequisite edges", graph.course_count(), graph.edge_count());
    println!("  {} departments", graph.departments().len());
    println!();

    let mut lower = 0;
    let mut upper = 0;
    let mut graduate = 0;
    let mut unleveled = 0;
    for course in graph.courses() {
        match Level::of(&course.id) {
            Some(Level::Lower) => lower += 1,
            Some(Level::Upper) => upper += 1,
            Some(Level::Graduate) => graduate += 1,
            None => unleveled += 1,
        }
    }

    println!("  lower division:    {lower}");
    println!("  upper division:    {upper}");
    println!("  graduate:          {graduate}");
    if unleveled > 0 {
        println!("  without a number:  {unleveled}");
    }

    Ok(())
}
