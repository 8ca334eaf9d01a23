//! Telemetry metric name constants.
//!
//! Centralised metric names for namecast operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `namecast_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `status`: outcome: "ok" or "error"
//! - `final_label`: winning label after refinement
//! - `stage`: where input was rejected: "classify" or "refine"

/// Total name classifications.
///
/// Labels: `status` ("ok" | "error").
pub const CLASSIFICATIONS_TOTAL: &str = "namecast_classifications_total";

/// Total completed refinements.
///
/// Labels: `final_label`.
pub const REFINEMENTS_TOTAL: &str = "namecast_refinements_total";

/// Refinements where the target label was missing from the distribution
/// and the positional fallback was used.
pub const LABEL_FALLBACKS_TOTAL: &str = "namecast_label_fallbacks_total";

/// Session lookups that found no linked classification.
pub const SESSION_MISSES_TOTAL: &str = "namecast_session_misses_total";

/// Requests rejected by input validation.
///
/// Labels: `stage` ("classify" | "refine").
pub const INPUT_REJECTIONS_TOTAL: &str = "namecast_input_rejections_total";
