//! Course exploration engine for Kursnetz.
//!
//! Four pure leaves — fuzzy ranking, graph filtering, rating synthesis, and
//! camera-focus geometry — wired together by the [`Explorer`] state machine.
//! The engine computes; it never renders. Surfaces (the CLI, the TUI, or a
//! 3D frontend) feed it discrete user events, read the resulting state, and
//! own the frame loop.

/// Camera focus and overview directive computation.
pub mod camera;
/// Error types used throughout the crate.
pub mod error;
/// The exploration state machine that owns all interaction state.
pub mod explorer;
/// Department/level graph filtering.
pub mod filter;
/// Fuzzy subsequence scoring and ranking.
pub mod fuzzy;
/// Synthetic rating generation and the rating provider boundary.
pub mod rating;

/// Re-export camera types.
pub use camera::{CameraDirective, CameraRig, TRANSITION_MS};
/// Re-export error types.
pub use error::{ExploreError, ExploreResult};
/// Re-export explorer types.
pub use explorer::{Explorer, ExplorerConfig, ExplorerEvent, Mode, RankedCourse, RatingApply, RatingRequest, RatingSlot};
/// Re-export filter types.
pub use filter::{FilterState, GraphView, filter};
/// Re-export rating types.
pub use rating::{RatingError, RatingProvider, RatingRecord, SyntheticRatings, synthesize};
