use serde::{Deserialize, Serialize};

use kn_core::CourseId;

/// Lower bound of the four rating scales.
pub const RATING_MIN: f64 = 1.0;
/// Upper bound of the four rating scales.
pub const RATING_MAX: f64 = 5.0;

/// Per-course evaluation metrics.
///
/// Today these are synthesized (see [`synthesize`]); the shape and ranges
/// are the contract a future live provider must honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Overall rating, clamped to [1, 5].
    pub overall: f64,
    /// Difficulty, clamped to [1, 5].
    pub difficulty: f64,
    /// Weekly workload rating, clamped to [1, 5]. Tracks difficulty.
    pub workload: f64,
    /// Usefulness, clamped to [1, 5]. Tracks the overall rating.
    pub usefulness: f64,
    /// Number of reviews behind the ratings.
    pub review_count: u32,
    /// Number of free-text comments.
    pub comment_count: u32,
}

/// Failure at the rating provider boundary. Surfaces see this as an
/// explicit "unavailable" state; it never escapes as a panic and never
/// interrupts the selection/camera/graph flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RatingError {
    /// The provider could not be reached (or timed out).
    #[error("rating provider unavailable: {0}")]
    Unavailable(String),
}

/// The rating lookup boundary. [`SyntheticRatings`] satisfies it today; a
/// live evaluation service can replace it without the engine noticing.
pub trait RatingProvider {
    /// Fetch the rating record for a course.
    fn fetch(&self, id: &CourseId) -> Result<RatingRecord, RatingError>;
}

/// The deterministic stand-in provider: ratings are synthesized from the
/// course id alone, so the same id yields the same record in every call
/// and every process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticRatings;

impl RatingProvider for SyntheticRatings {
    fn fetch(&self, id: &CourseId) -> Result<RatingRecord, RatingError> {
        Ok(synthesize(id))
    }
}

/// Synthesize the rating record for a course id.
///
/// id-determinism is a load-bearing contract: ratings must be reproducible
/// across calls and processes, which is why this is a fixed hash and not an
/// RNG. Nominal ranges: overall in [3, 5], difficulty in [2, 4], workload
/// and usefulness within ±0.3 of the value they track; everything clamped
/// to [1, 5]. Lower-division courses (number below 100) carry more reviews.
pub fn synthesize(id: &CourseId) -> RatingRecord {
    let seed = id_seed(id);

    let overall = 3.0 + 2.0 * unit(seed, 0);
    let difficulty = 2.0 + 2.0 * unit(seed, 1);
    let workload = difficulty + 0.6 * (unit(seed, 2) - 0.5);
    let usefulness = overall + 0.6 * (unit(seed, 3) - 0.5);

    let lower_division = id.number().is_some_and(|n| n < 100);
    let (review_base, comment_base) = if lower_division {
        (80.0, 40.0)
    } else {
        (30.0, 15.0)
    };

    RatingRecord {
        overall: clamp(overall),
        difficulty: clamp(difficulty),
        workload: clamp(workload),
        usefulness: clamp(usefulness),
        review_count: (review_base * (0.5 + unit(seed, 4))).floor() as u32,
        comment_count: (comment_base * (0.5 + unit(seed, 5))).floor() as u32,
    }
}

fn clamp(value: f64) -> f64 {
    value.clamp(RATING_MIN, RATING_MAX)
}

/// Integer seed accumulated from the id's bytes (31-polynomial, wrapping).
fn id_seed(id: &CourseId) -> u64 {
    id.as_str()
        .bytes()
        .fold(0u64, |hash, byte| hash.wrapping_mul(31).wrapping_add(byte as u64))
}

/// The `draw`-th unit-interval value for a seed, via the splitmix64
/// finalizer. Stable across calls, processes, and platforms.
fn unit(seed: u64, draw: u64) -> f64 {
    let mut z = seed.wrapping_add(draw.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    // 53 significant bits, the full precision of an f64 mantissa.
    (z >> 11) as f64 / (1u64 << 53) as f64
}
