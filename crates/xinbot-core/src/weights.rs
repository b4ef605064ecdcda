//! Ranking weights and limits, defined in one place so tuning is a
//! one-line change.

/// Core term present in the title.
pub const CORE_TITLE_WEIGHT: f32 = 10.0;
/// Per occurrence of a core term in the body text.
pub const CORE_BODY_WEIGHT: f32 = 4.0;
/// Expanded term present in the title.
pub const EXPANDED_TITLE_WEIGHT: f32 = 5.0;
/// Per occurrence of an expanded term in the body text.
pub const EXPANDED_BODY_WEIGHT: f32 = 2.0;
/// Residual term present in the title.
pub const OTHER_TITLE_WEIGHT: f32 = 1.0;
/// Per occurrence of a residual term in the body text.
pub const OTHER_BODY_WEIGHT: f32 = 0.5;

/// Per core-term occurrence inside a single subtitle segment.
pub const SEGMENT_CORE_WEIGHT: f32 = 1.0;
/// Per expanded-term occurrence, only counted when a segment has no core hit.
pub const SEGMENT_EXPANDED_WEIGHT: f32 = 0.5;
/// Bonus per window of consecutive core-hit segments.
pub const CONTINUITY_BONUS: f32 = 2.0;
/// Window length for the continuity bonus.
pub const CONTINUITY_WINDOW: usize = 3;

/// Minimum cosine similarity for a vector-only result to be admitted.
pub const SIMILARITY_FLOOR: f32 = 0.25;
/// Boost applied to a lexical score when the vector set agrees.
pub const VECTOR_BOOST_WEIGHT: f32 = 20.0;
/// Score multiplier for vector-only admissions.
pub const VECTOR_ADMIT_WEIGHT: f32 = 10.0;

/// Recommendations per page.
pub const PAGE_SIZE: usize = 5;
/// Nearby-point search radius in kilometres.
pub const NEARBY_MAX_KM: f64 = 5.0;
/// Nearby-point result cutoff.
pub const NEARBY_TOP_K: usize = 5;
/// Per-session history cap; oldest entries are evicted first.
pub const HISTORY_CAP: usize = 50;
