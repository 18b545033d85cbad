use std::path::Path;

use kn_core::CourseId;
use kn_engine::{RatingProvider, SyntheticRatings};

pub fn run(data: &Path, course_id: &str, json: bool) -> Result<(), String> {
    let graph = super::load_graph(data)?;

    let id = CourseId::new(course_id);
    if graph.course(&id).is_none() {
        return Err(format!("course not found: \"{}\"", course_id));
    }

    let rating = SyntheticRatings
        .fetch(&id)
        .map_err(|e| e.to_string())?;

    if json {
        let rendered = serde_json::to_string_pretty(&rating)
            .map_err(|e| format!("could not serialize rating: {e}"))?;
        println!("{rendered}");
    } else {
        println!("  {course_id}");
        println!("  overall:     {:.2}", rating.overall);
        println!("  difficulty:  {:.2}", rating.difficulty);
        println!("  workload:    {:.2}", rating.workload);
        println!("  usefulness:  {:.2}", rating.usefulness);
        println!("  reviews:     {}", rating.review_count);
        println!("  comments:    {}", rating.comment_count);
    }

    Ok(())
}
