//! Core types for Kursnetz: courses, prerequisite edges, and the course graph.
//!
//! This crate defines the data model the exploration engine runs against. A
//! [`CourseGraph`] is built once from a dataset file (or programmatically)
//! and is immutable for the rest of the process — the engine only ever reads
//! from it.

/// Course records, identifiers, level buckets, and 3D positions.
pub mod course;
/// Dataset boundary: the JSON shape courses and links are loaded from.
pub mod dataset;
/// Prerequisite edges and their polymorphic endpoints.
pub mod edge;
/// Error types used throughout the crate.
pub mod error;
/// The course graph that owns courses and prerequisite edges.
pub mod graph;

/// Re-export course types.
pub use course::{Course, CourseId, Level, Vec3};
/// Re-export dataset types.
pub use dataset::Dataset;
/// Re-export edge types.
pub use edge::{CourseRef, EdgeEndpoint, PrerequisiteEdge};
/// Re-export error types.
pub use error::{KnError, KnResult};
/// Re-export the graph type.
pub use graph::CourseGraph;
