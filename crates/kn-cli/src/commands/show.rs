use std::path::Path;

use colored::Colorize;

use kn_core::{CourseId, Level};
use kn_engine::{RatingProvider, SyntheticRatings};

pub fn run(data: &Path, course_id: &str) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    let id = CourseId::new(course_id);
    let course = graph
        .course(&id)
        .ok_or_else(|| format!("course not found: \"{}\"", course_id))?;

    // Header
    println!("  {} [{}]", course.search_label().bold(), course.department().dimmed());
    if let Some(level) = Level::of(&course.id) {
        println!("  level:  {level}");
    }
    if let Some(units) = course.units {
        println!("  units:  {units}");
    }
    println!();

    // Rating
    match SyntheticRatings.fetch(&id) {
        Ok(rating) => {
            println!("  overall:     {:.1} / 5", rating.overall);
            println!("  difficulty:  {:.1} / 5", rating.difficulty);
            println!("  workload:    {:.1} / 5", rating.workload);
            println!("  usefulness:  {:.1} / 5", rating.usefulness);
            println!(
                "  {} reviews, {} comments",
                rating.review_count, rating.comment_count
            );
        }
        Err(e) => println!("  {} ({e})", "ratings unavailable".dimmed()),
    }

    // Prerequisite links
    println!();
    let prereqs = graph.prerequisites(&id);
    if prereqs.is_empty() {
        println!("  {} (none)", "Prerequisites:".dimmed());
    } else {
        println!("  {}", "Prerequisites:".dimmed());
        for prereq in &prereqs {
            println!("    {}", prereq.search_label());
        }
    }

    let postreqs = graph.postrequisites(&id);
    if postreqs.is_empty() {
        println!("  {} (none)", "Postrequisites:".dimmed());
    } else {
        println!("  {}", "Postrequisites:".dimmed());
        for postreq in &postreqs {
            println!("    {}", postreq.search_label());
        }
    }

    Ok(())
}
