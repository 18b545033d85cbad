use kn_core::CourseId;

/// Alias for `Result<T, ExploreError>`.
pub type ExploreResult<T> = Result<T, ExploreError>;

/// Errors the exploration controller can hand back to a surface. Nothing
/// here ever terminates the process; every variant is a handleable result.
#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    /// The requested course id does not exist in the graph.
    #[error("course not found: \"{0}\"")]
    CourseNotFound(CourseId),

    /// The course exists but the active filter hides it; a hidden course
    /// is never allowed to become the focused selection.
    #[error("course \"{0}\" is hidden by the active filter")]
    CourseNotVisible(CourseId),
}
