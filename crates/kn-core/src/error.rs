use crate::course::CourseId;

/// Alias for `Result<T, KnError>`.
pub type KnResult<T> = Result<T, KnError>;

/// Errors that can occur when building or reading a course graph.
#[derive(Debug, thiserror::Error)]
pub enum KnError {
    /// A course with the same id already exists in the graph.
    #[error("course already exists: \"{0}\"")]
    DuplicateCourse(CourseId),

    /// The requested course id does not exist in the graph.
    #[error("course not found: \"{0}\"")]
    CourseNotFound(CourseId),

    /// An edge references a course id that is absent from the graph.
    #[error("edge endpoint \"{missing}\" does not name a known course")]
    UnresolvedEndpoint {
        /// The id that could not be resolved.
        missing: CourseId,
    },

    /// The dataset JSON could not be parsed.
    #[error("dataset parse error: {0}")]
    Dataset(#[from] serde_json::Error),

    /// The dataset file could not be read.
    #[error("dataset io error: {0}")]
    Io(#[from] std::io::Error),
}
