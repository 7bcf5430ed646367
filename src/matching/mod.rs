pub mod aggregate;
pub mod criteria;
pub mod education;
pub mod experience;
pub mod fallback;
pub mod location;
pub mod pipeline;
pub mod skills;

/// Status ladder shared by the dimension scorers (scores on a 0–100 scale).
/// Neutral outcomes set "UNKNOWN" explicitly instead of going through here.
pub(crate) fn status_from_score(score: f64) -> &'static str {
    if score >= 90.0 {
        "PERFECT_MATCH"
    } else if score >= 70.0 {
        "MATCH"
    } else if score >= 40.0 {
        "PARTIAL_MATCH"
    } else {
        "MISS"
    }
}

/// Round to two decimals; all persisted scores use this.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
