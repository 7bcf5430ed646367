pub mod preprocess;
pub mod tfidf;

use serde::Serialize;
use std::collections::HashSet;

use crate::extraction::{extract_years_of_experience, technical_term_overlap};
use preprocess::preprocess;
use tfidf::document_similarity;

/// Blend weights for the five fallback signals. Must sum to 1.0.
const W_SKILL: f64 = 0.35;
const W_EXPERIENCE: f64 = 0.25;
const W_TECHNICAL: f64 = 0.25;
const W_SEMANTIC: f64 = 0.10;
const W_EDUCATION: f64 = 0.05;

const SENIORITY_TERMS: &[&str] = &["senior", "lead", "principal", "staff", "architect", "head"];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "bachelors",
    "master",
    "masters",
    "phd",
    "doctorate",
    "mba",
    "degree",
    "diploma",
];

/// Text-only compatibility score, used when structured skill lists are
/// unavailable on either side. All component scores are on a 0–1 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackScore {
    pub blended: f64,
    pub skill_overlap: f64,
    pub experience: f64,
    pub technical_overlap: f64,
    pub semantic: f64,
    pub education_overlap: f64,
    pub details: String,
}

/// Score a candidate's resume text against a job's raw text.
///
/// Five signals: keyword overlap as a skill proxy, an experience-years
/// ratio with a seniority-keyword adjustment, fixed-vocabulary technical
/// term overlap, TF-IDF cosine similarity, and education-keyword overlap.
/// The blend is capped at 1.0.
pub fn score_text_similarity(job_text: &str, resume_text: &str) -> FallbackScore {
    let job_tokens = preprocess(job_text);
    let resume_tokens = preprocess(resume_text);

    let skill_overlap = keyword_overlap(&job_tokens, &resume_tokens);
    let experience = experience_proxy(job_text, resume_text);
    let technical = technical_term_overlap(job_text, resume_text);
    let semantic = document_similarity(&job_tokens, &resume_tokens);
    let education_overlap = education_keyword_overlap(job_text, resume_text);

    let blended = (W_SKILL * skill_overlap
        + W_EXPERIENCE * experience
        + W_TECHNICAL * technical
        + W_SEMANTIC * semantic
        + W_EDUCATION * education_overlap)
        .min(1.0);

    let details = format!(
        "text-similarity blend: skills {:.0}%, experience {:.0}%, technical {:.0}%, semantic {:.0}%, education {:.0}%",
        skill_overlap * 100.0,
        experience * 100.0,
        technical * 100.0,
        semantic * 100.0,
        education_overlap * 100.0
    );

    FallbackScore {
        blended,
        skill_overlap,
        experience,
        technical_overlap: technical,
        semantic,
        education_overlap,
        details,
    }
}

/// Shared unique tokens over unique job tokens; neutral 0.5 when the job
/// text preprocesses to nothing.
fn keyword_overlap(job_tokens: &[String], resume_tokens: &[String]) -> f64 {
    let job_set: HashSet<&str> = job_tokens.iter().map(String::as_str).collect();
    if job_set.is_empty() {
        return 0.5;
    }
    let resume_set: HashSet<&str> = resume_tokens.iter().map(String::as_str).collect();
    job_set.intersection(&resume_set).count() as f64 / job_set.len() as f64
}

/// Experience ratio on a 0–1 scale, same shape as the structured experience
/// scorer, adjusted by a seniority-keyword bonus: both texts mention
/// seniority terms -> +10%, neither -> +5%, exactly one -> -10%.
fn experience_proxy(job_text: &str, resume_text: &str) -> f64 {
    let required = extract_years_of_experience(job_text);
    let candidate = extract_years_of_experience(resume_text);

    let base = match (required, candidate) {
        (None, _) => 1.0,
        (Some(_), None) => 0.5,
        (Some(req), Some(cand)) => {
            let req = req as f64;
            let cand = cand as f64;
            if req <= 0.0 {
                1.0
            } else if cand >= req {
                (cand / req).min(1.2).min(1.0)
            } else {
                (cand / req * 0.8).max(0.0)
            }
        }
    };

    let job_senior = mentions_seniority(job_text);
    let resume_senior = mentions_seniority(resume_text);
    let adjusted = match (job_senior, resume_senior) {
        (true, true) => base * 1.10,
        (false, false) => base * 1.05,
        _ => base * 0.90,
    };

    adjusted.clamp(0.0, 1.0)
}

fn mentions_seniority(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SENIORITY_TERMS.iter().any(|term| lowered.contains(term))
}

/// Overlap of the job's education keywords found in the resume; neutral
/// 0.5 when the job text states no education requirement.
fn education_keyword_overlap(job_text: &str, resume_text: &str) -> f64 {
    let job_lower = job_text.to_lowercase();
    let resume_lower = resume_text.to_lowercase();

    let job_keywords: Vec<&str> = EDUCATION_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| job_lower.contains(kw))
        .collect();
    if job_keywords.is_empty() {
        return 0.5;
    }

    let shared = job_keywords
        .iter()
        .filter(|kw| resume_lower.contains(*kw))
        .count();
    shared as f64 / job_keywords.len() as f64
}
