use std::sync::{Arc, Once};

use shortlist::logging;
use shortlist::matching::criteria::ScoringCriteria;
use shortlist::matching::pipeline::RankingEngine;
use shortlist::store::{BatchStatus, HrUpdate, InMemoryStore, RecordStatus};
use shortlist::{CandidateProfile, EducationLevel, JobPosting};

fn engine() -> RankingEngine {
    static LOGGING: Once = Once::new();
    LOGGING.call_once(|| {
        logging::init_tracing_subscriber("shortlist");
        logging::install_tracing_panic_hook("shortlist");
    });
    RankingEngine::new(Arc::new(InMemoryStore::new()))
}

fn backend_job() -> JobPosting {
    JobPosting {
        id: 42,
        title: "Backend Engineer".into(),
        company: "Acme".into(),
        required_skills: vec!["python".into(), "django".into(), "sql".into()],
        min_experience_years: 3.0,
        education_tier: None,
        location: Some("Remote".into()),
        raw_text: Some(
            "Senior backend engineer. Minimum 5 years with Python, Django and AWS. \
             Bachelor degree required."
                .into(),
        ),
    }
}

fn candidate_a() -> CandidateProfile {
    CandidateProfile {
        id: 10,
        skills: vec!["python".into(), "django".into(), "sql".into(), "aws".into()],
        total_experience_years: 5.0,
        highest_education: Some(EducationLevel::Master),
        ..CandidateProfile::default()
    }
}

fn candidate_b() -> CandidateProfile {
    CandidateProfile {
        id: 11,
        skills: vec!["python".into()],
        total_experience_years: 1.0,
        highest_education: Some(EducationLevel::Bachelor),
        ..CandidateProfile::default()
    }
}

fn resume_only_candidate() -> CandidateProfile {
    CandidateProfile {
        id: 12,
        total_experience_years: 7.0,
        raw_resume_text: Some(
            "Senior engineer with 7+ years building Python and Django services on AWS. \
             Bachelor of Science degree."
                .into(),
        ),
        ..CandidateProfile::default()
    }
}

#[test]
fn full_ranking_run_persists_ordered_records_and_batch() {
    let engine = engine();
    let batch = engine
        .rank_candidates(
            &backend_job(),
            &[candidate_b(), candidate_a()],
            None,
            Some("hr-17"),
        )
        .unwrap();

    assert_eq!(batch.status, BatchStatus::Completed);
    assert_eq!(batch.criteria_id, "system-default");
    assert_eq!(batch.initiator.as_deref(), Some("hr-17"));
    assert!(batch.completed_at.is_some());

    let stored = engine.store().get_batch(&batch.id).unwrap().unwrap();
    assert_eq!(stored.status, BatchStatus::Completed);
    assert_eq!(stored.ranked_count, 2);

    let top = engine.store().top_matches(42, 10).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].candidate_id, 10);
    assert_eq!(top[0].overall_score, 99.0);
    assert_eq!(top[0].skill_score, Some(100.0));
    assert_eq!(top[1].candidate_id, 11);
    assert_eq!(top[1].overall_score, 48.33);
    assert_eq!(top[1].missing_skills, vec!["django", "sql"]);
    assert_eq!(top[1].skill_gap_percentage, 66.67);
    assert!(top.iter().all(|r| r.batch_id == batch.id));
    assert!(top.iter().all(|r| r.status == RecordStatus::Active));
}

#[test]
fn score_breakdown_json_carries_every_dimension() {
    let engine = engine();
    engine
        .rank_candidates(&backend_job(), &[candidate_a()], None, None)
        .unwrap();

    let top = engine.store().top_matches(42, 1).unwrap();
    let breakdown = &top[0].score_breakdown;
    assert_eq!(breakdown["kind"], "structured");
    assert_eq!(breakdown["skill"]["score"], 100.0);
    assert_eq!(breakdown["experience"]["gap_status"], "overqualified");
    assert_eq!(breakdown["location"]["score"], 90.0);
    assert!(breakdown["skill"]["details"].as_str().is_some());
}

#[test]
fn resume_only_candidate_ranks_via_text_similarity() {
    let engine = engine();
    let batch = engine
        .rank_candidates(
            &backend_job(),
            &[candidate_b(), resume_only_candidate()],
            None,
            None,
        )
        .unwrap();
    assert_eq!(batch.status, BatchStatus::Completed);

    let top = engine.store().top_matches(42, 10).unwrap();
    let fallback = top.iter().find(|r| r.candidate_id == 12).unwrap();
    assert!(fallback.text_similarity_score.is_some());
    assert!(fallback.skill_score.is_none());
    assert_eq!(fallback.score_breakdown["kind"], "text_fallback");

    let structured = top.iter().find(|r| r.candidate_id == 11).unwrap();
    assert!(structured.text_similarity_score.is_none());
    assert!(structured.skill_score.is_some());
}

#[test]
fn failed_candidates_are_counted_but_do_not_block_the_rest() {
    let engine = engine();
    let unscoreable = CandidateProfile {
        id: 13,
        total_experience_years: 2.0,
        ..CandidateProfile::default()
    };
    let negative_years = CandidateProfile {
        id: 14,
        skills: vec!["python".into()],
        total_experience_years: -3.0,
        ..CandidateProfile::default()
    };

    let batch = engine
        .rank_candidates(
            &backend_job(),
            &[candidate_a(), unscoreable, candidate_b(), negative_years],
            None,
            None,
        )
        .unwrap();

    assert_eq!(batch.status, BatchStatus::Partial);
    assert_eq!(batch.total_candidates, 4);
    assert_eq!(batch.ranked_count, 2);
    assert_eq!(batch.failed_count, 2);
    assert_eq!(batch.success_rate(), 0.5);

    let top = engine.store().top_matches(42, 10).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].rank_position, 1);
    assert_eq!(top[1].rank_position, 2);
    assert!(top.iter().all(|r| r.total_candidates == 2));
}

#[test]
fn reranking_leaves_at_most_one_active_record_per_pair() {
    let engine = engine();
    engine
        .rank_candidates(&backend_job(), &[candidate_a(), candidate_b()], None, None)
        .unwrap();
    engine
        .rank_candidates(&backend_job(), &[candidate_a(), candidate_b()], None, None)
        .unwrap();

    let top = engine.store().top_matches(42, 10).unwrap();
    assert_eq!(top.len(), 2);
    for candidate_id in [10, 11] {
        let active = top.iter().filter(|r| r.candidate_id == candidate_id).count();
        assert_eq!(active, 1);
    }
}

#[test]
fn hr_decisions_survive_until_the_next_ranking_run() {
    let engine = engine();
    engine
        .rank_candidates(&backend_job(), &[candidate_a()], None, None)
        .unwrap();

    let record_id = engine.store().top_matches(42, 1).unwrap()[0].id.clone();
    engine
        .store()
        .update_hr_fields(
            &record_id,
            &HrUpdate {
                is_shortlisted: Some(true),
                is_rejected: None,
                notes: Some("strong fit".into()),
            },
        )
        .unwrap();

    let record = &engine.store().top_matches(42, 1).unwrap()[0];
    assert!(record.is_shortlisted);
    assert_eq!(record.notes.as_deref(), Some("strong fit"));
    assert_eq!(record.overall_score, 99.0);

    // A new run replaces the record; HR fields start clean on the new row.
    engine
        .rank_candidates(&backend_job(), &[candidate_a()], None, None)
        .unwrap();
    let record = &engine.store().top_matches(42, 1).unwrap()[0];
    assert!(!record.is_shortlisted);
    assert!(record.notes.is_none());
}

#[test]
fn candidate_history_spans_jobs_best_first() {
    let engine = engine();
    engine
        .rank_candidates(&backend_job(), &[candidate_b()], None, None)
        .unwrap();

    let mut other_job = backend_job();
    other_job.id = 43;
    other_job.required_skills = vec!["python".into()];
    engine
        .rank_candidates(&other_job, &[candidate_b()], None, None)
        .unwrap();

    let history = engine.store().candidate_history(11).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].overall_score >= history[1].overall_score);
    assert_eq!(history[0].job_id, 43);
}

#[test]
fn explicit_criteria_drives_the_blend() {
    let engine = engine();
    let criteria = ScoringCriteria {
        id: "skills-heavy".into(),
        name: "Skills Heavy".into(),
        skill_weight: 70,
        experience_weight: 10,
        education_weight: 10,
        location_weight: 10,
        is_default: false,
        is_active: true,
    };
    engine.store().save_criteria(criteria).unwrap();

    let batch = engine
        .rank_candidates(&backend_job(), &[candidate_b()], Some("skills-heavy"), None)
        .unwrap();
    assert_eq!(batch.criteria_id, "skills-heavy");

    let top = engine.store().top_matches(42, 1).unwrap();
    // 33.33*0.7 + 26.67*0.1 + 90*0.1 + 90*0.1 = 44.00
    assert_eq!(top[0].overall_score, 44.0);
}

#[test]
fn identical_inputs_produce_identical_rankings() {
    let first_engine = engine();
    let second_engine = engine();
    let candidates = [candidate_a(), candidate_b(), resume_only_candidate()];

    first_engine
        .rank_candidates(&backend_job(), &candidates, None, None)
        .unwrap();
    second_engine
        .rank_candidates(&backend_job(), &candidates, None, None)
        .unwrap();

    let first = first_engine.store().top_matches(42, 10).unwrap();
    let second = second_engine.store().top_matches(42, 10).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.candidate_id, b.candidate_id);
        assert_eq!(a.rank_position, b.rank_position);
        assert_eq!(a.overall_score, b.overall_score);
    }
}

#[test]
fn concurrent_runs_against_one_job_never_corrupt_the_result_set() {
    let engine = Arc::new(engine());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(std::thread::spawn(move || {
            engine
                .rank_candidates(&backend_job(), &[candidate_a(), candidate_b()], None, None)
                .unwrap()
        }));
    }
    for handle in handles {
        let batch = handle.join().unwrap();
        assert_eq!(batch.status, BatchStatus::Completed);
    }

    let top = engine.store().top_matches(42, 10).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].candidate_id, 10);
    assert_eq!(top[0].rank_position, 1);
    assert_eq!(top[1].rank_position, 2);
    assert_eq!(engine.store().active_record_count(42).unwrap(), 2);
}
