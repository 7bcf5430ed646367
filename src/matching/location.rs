use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationScore {
    pub score: f64,
    pub status: &'static str,
    pub details: String,
}

/// Heuristic string match between a job location and a candidate's
/// city/state. This is not geocoding: remote postings are treated as
/// location-agnostic and unknown locations score neutral.
pub fn score_location(
    job_location: Option<&str>,
    candidate_city: Option<&str>,
    candidate_state: Option<&str>,
) -> LocationScore {
    let job = job_location.map(str::trim).filter(|s| !s.is_empty());
    let city = candidate_city.map(str::trim).filter(|s| !s.is_empty());
    let state = candidate_state.map(str::trim).filter(|s| !s.is_empty());

    if let (Some(job), Some(city)) = (job, city) {
        if job.eq_ignore_ascii_case(city) {
            return LocationScore {
                score: 100.0,
                status: "PERFECT_MATCH",
                details: format!("candidate city matches job location ({job})"),
            };
        }
    }

    if let (Some(job), Some(state)) = (job, state) {
        if job.to_lowercase().contains(&state.to_lowercase()) {
            return LocationScore {
                score: 80.0,
                status: "MATCH",
                details: format!("candidate state {state} appears in job location {job}"),
            };
        }
    }

    if let Some(job) = job {
        let lowered = job.to_lowercase();
        if lowered.contains("remote") || lowered.contains("work from home") {
            return LocationScore {
                score: 90.0,
                status: "PERFECT_MATCH",
                details: "remote posting; location-agnostic".to_string(),
            };
        }
    }

    if job.is_none() || (city.is_none() && state.is_none()) {
        return LocationScore {
            score: 50.0,
            status: "UNKNOWN",
            details: "location unknown on one side; neutral score".to_string(),
        };
    }

    LocationScore {
        score: 30.0,
        status: "MISS",
        details: "different non-remote locations".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_city_match_is_case_insensitive() {
        let result = score_location(Some("Austin"), Some("austin"), None);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.status, "PERFECT_MATCH");
    }

    #[test]
    fn state_inside_job_location_scores_eighty() {
        let result = score_location(Some("Dallas, Texas"), Some("Houston"), Some("Texas"));
        assert_eq!(result.score, 80.0);
    }

    #[test]
    fn remote_postings_are_location_agnostic() {
        let result = score_location(Some("Remote"), None, None);
        assert_eq!(result.score, 90.0);

        let result = score_location(Some("Work From Home (US)"), Some("Boise"), Some("Idaho"));
        assert_eq!(result.score, 90.0);
    }

    #[test]
    fn missing_location_scores_neutral() {
        assert_eq!(score_location(None, Some("Austin"), None).score, 50.0);
        assert_eq!(score_location(Some("Austin"), None, None).score, 50.0);
        assert_eq!(score_location(Some(""), Some("Austin"), None).score, 50.0);
    }

    #[test]
    fn different_onsite_locations_score_thirty() {
        let result = score_location(Some("Seattle"), Some("Miami"), Some("Florida"));
        assert_eq!(result.score, 30.0);
        assert_eq!(result.status, "MISS");
    }

    #[test]
    fn city_match_wins_over_remote_keyword() {
        let result = score_location(Some("remote"), Some("Remote"), None);
        assert_eq!(result.score, 100.0);
    }
}
