use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::vocabulary::{aliases, is_technical_term, normalize_skill_set};

/// Flat features pulled from one free-text document (job description or
/// resume). Pure function of the input text and the static vocabulary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextFeatures {
    pub skills: Vec<String>,
    pub years_of_experience: Option<u32>,
}

lazy_static! {
    // "5+ years", "5 + years", "5 years"
    static ref YEARS_RE: Regex = Regex::new(r"(\d{1,2})\s*\+?\s*years?").unwrap();
    // "minimum 5 years", "minimum of 5 years"
    static ref MINIMUM_YEARS_RE: Regex =
        Regex::new(r"minimum(?:\s+of)?\s+(\d{1,2})\s*years?").unwrap();
    // "at least 5 years"
    static ref AT_LEAST_YEARS_RE: Regex = Regex::new(r"at\s+least\s+(\d{1,2})\s*years?").unwrap();
}

/// Extract skills and a years-of-experience figure from free text, merging
/// in an explicit skill list when one is provided. Empty input yields empty
/// outputs, never an error.
pub fn extract_features(text: &str, explicit_skills: Option<&[String]>) -> TextFeatures {
    let mut skills: HashSet<String> = match explicit_skills {
        Some(list) => normalize_skill_set(list),
        None => HashSet::new(),
    };
    skills.extend(extract_skills(text));

    let mut sorted: Vec<String> = skills.into_iter().collect();
    sorted.sort();

    TextFeatures {
        skills: sorted,
        years_of_experience: extract_years_of_experience(text),
    }
}

/// Scan lowercased text for vocabulary terms at word boundaries.
pub fn extract_skills(text: &str) -> HashSet<String> {
    let mut found = HashSet::new();
    if text.trim().is_empty() {
        return found;
    }

    let haystack = text.to_lowercase();
    for (alias, canonical) in aliases() {
        if contains_term(&haystack, alias) {
            found.insert(canonical.to_string());
        }
    }
    found
}

/// Maximum years-of-experience figure across all recognized patterns,
/// or `None` when the text states no figure.
pub fn extract_years_of_experience(text: &str) -> Option<u32> {
    if text.trim().is_empty() {
        return None;
    }

    let haystack = text.to_lowercase();
    let mut max_years: Option<u32> = None;
    for re in [&*YEARS_RE, &*MINIMUM_YEARS_RE, &*AT_LEAST_YEARS_RE] {
        for caps in re.captures_iter(&haystack) {
            if let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                max_years = Some(max_years.map_or(value, |current| current.max(value)));
            }
        }
    }
    max_years
}

/// Ratio of the job text's technical vocabulary terms that also appear in
/// the resume text. Neutral 0.5 when the job text names no technical terms.
pub fn technical_term_overlap(job_text: &str, resume_text: &str) -> f64 {
    let job_terms: HashSet<String> = extract_skills(job_text)
        .into_iter()
        .filter(|term| is_technical_term(term))
        .collect();

    if job_terms.is_empty() {
        return 0.5;
    }

    let resume_terms = extract_skills(resume_text);
    let shared = job_terms.intersection(&resume_terms).count();
    shared as f64 / job_terms.len() as f64
}

/// Word-boundary containment check. Hyphens are part of terms so compound
/// skills like "problem-solving" survive; other punctuation acts as a
/// boundary.
fn contains_term(haystack: &str, term: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();
        let before_ok = begin == 0
            || haystack[..begin]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric() && c != '-');
        let after_ok = end == haystack.len()
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric() && c != '-');
        if before_ok && after_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}
