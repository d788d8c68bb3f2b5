//! Ranking E2E tests for the agent recommender.
//!
//! Exercises rebuild plus query over the walkthrough catalog and over
//! seeded random catalogs, checking the ordering guarantees callers rely on.

use pretty_assertions::assert_eq;

use e2e_tests::{random_catalog, random_query, scenario_catalog, TestHarness};
use recommend_index::RecommendationError;
use recommend_types::{AgentId, AgentProfile};

fn ids(ranked: &[recommend_index::Recommendation]) -> Vec<String> {
    ranked.iter().map(|r| r.agent_id.to_string()).collect()
}

// ===== Walkthrough catalog =====

#[test]
fn test_debug_query_prefers_coding_helper() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&scenario_catalog()).unwrap();

    let best = harness
        .recommender
        .best_match("help me debug a function")
        .expect("a match");
    assert_eq!(best.agent_id, AgentId::from(1i64));

    let ranked = harness
        .recommender
        .top_k("help me debug a function", 2)
        .unwrap();
    assert_eq!(ids(&ranked), vec!["1", "2"]);
    assert!(ranked[0].score > ranked[1].score);
    assert!(ranked[1].score > 0.0);
}

#[test]
fn test_unrelated_query_has_no_match() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&scenario_catalog()).unwrap();

    assert!(harness.recommender.best_match("quantum chromodynamics").is_none());
    assert!(harness
        .recommender
        .top_k("quantum chromodynamics", 5)
        .unwrap()
        .is_empty());
}

#[test]
fn test_switch_away_from_travel_planner() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&scenario_catalog()).unwrap();

    let advice = harness
        .recommender
        .should_switch("debugging code review", &AgentId::from(2i64));
    assert!(advice.should_switch);
    assert_eq!(advice.recommended, Some(AgentId::from(1i64)));

    let advice = harness
        .recommender
        .should_switch("debugging code review", &AgentId::from(1i64));
    assert!(!advice.should_switch);
}

#[test]
fn test_exclude_current_agent() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&scenario_catalog()).unwrap();

    let best = harness
        .recommender
        .best_match_excluding("help me debug a function", &AgentId::from(1i64))
        .expect("a match");
    assert_eq!(best.agent_id, AgentId::from(2i64));
}

// ===== Edge cases =====

#[test]
fn test_empty_catalog_is_untrained() {
    let harness = TestHarness::new();
    let stats = harness.recommender.rebuild(&[]).unwrap();

    assert_eq!(stats.agent_count, 0);
    assert!(!harness.recommender.stats().trained);
    assert!(harness.recommender.best_match("anything").is_none());
    assert!(harness.recommender.top_k("anything", 3).unwrap().is_empty());
}

#[test]
fn test_zero_k_is_invalid() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&scenario_catalog()).unwrap();

    let result = harness.recommender.top_k("debug", 0);
    assert!(matches!(result, Err(RecommendationError::InvalidArgument(_))));
}

#[test]
fn test_identical_profiles_tie_in_catalog_order() {
    let harness = TestHarness::new();
    let catalog = vec![
        AgentProfile::new("z", "Reviewer").with_description("code review"),
        AgentProfile::new("a", "Reviewer").with_description("code review"),
        AgentProfile::new("m", "Planner").with_description("trip planning"),
    ];
    harness.recommender.rebuild(&catalog).unwrap();

    let ranked = harness.recommender.top_k("code review", 3).unwrap();
    assert_eq!(ids(&ranked), vec!["z", "a"]);
    assert_eq!(ranked[0].score, ranked[1].score);

    let best = harness
        .recommender
        .best_match(&catalog[0].document_text())
        .expect("a match");
    assert_eq!(best.agent_id, AgentId::from("z"));
    assert!(best.score > 0.999);
}

#[test]
fn test_diacritics_and_case_are_folded() {
    let harness = TestHarness::new();
    let catalog = vec![
        AgentProfile::new("cafe", "Café Guide").with_description("Résumé of CAFÉS nearby"),
        AgentProfile::new("other", "Gardener").with_description("plants and soil"),
    ];
    harness.recommender.rebuild(&catalog).unwrap();

    let best = harness.recommender.best_match("cafe resume").expect("a match");
    assert_eq!(best.agent_id, AgentId::from("cafe"));
}

// ===== Properties over random catalogs =====

#[test]
fn test_rankings_are_deterministic() {
    let catalog = random_catalog(42, 40);
    let first = TestHarness::new();
    let second = TestHarness::new();
    first.recommender.rebuild(&catalog).unwrap();
    second.recommender.rebuild(&catalog).unwrap();

    for seed in 0..20 {
        let query = random_query(seed, 3);
        assert_eq!(
            first.recommender.top_k(&query, 10).unwrap(),
            second.recommender.top_k(&query, 10).unwrap(),
            "query: {}",
            query
        );
    }
}

#[test]
fn test_scores_are_bounded_and_sorted() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&random_catalog(3, 30)).unwrap();

    for seed in 100..130 {
        let query = random_query(seed, 4);
        let ranked = harness.recommender.top_k(&query, 30).unwrap();
        for r in &ranked {
            assert!(r.score > 0.0 && r.score <= 1.0, "score out of range: {}", r.score);
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_top_k_is_prefix_of_larger_k() {
    let harness = TestHarness::new();
    harness.recommender.rebuild(&random_catalog(11, 25)).unwrap();

    for seed in 200..210 {
        let query = random_query(seed, 3);
        let mut previous = harness.recommender.top_k(&query, 1).unwrap();
        for k in 2..=12 {
            let current = harness.recommender.top_k(&query, k).unwrap();
            assert!(current.len() <= k);
            assert_eq!(&current[..previous.len()], previous.as_slice());
            previous = current;
        }
    }
}

#[test]
fn test_agent_document_matches_itself() {
    let catalog = random_catalog(5, 20);
    let harness = TestHarness::new();
    harness.recommender.rebuild(&catalog).unwrap();

    for profile in &catalog {
        let ranked = harness
            .recommender
            .top_k(&profile.document_text(), catalog.len())
            .unwrap();
        let own = ranked
            .iter()
            .find(|r| r.agent_id == profile.id)
            .expect("agent should match its own document");
        assert!(own.score > 0.999, "self score {}", own.score);
        assert!(ranked[0].score - own.score < 1e-5);
    }
}

#[test]
fn test_excluded_agent_never_returned() {
    let catalog = random_catalog(9, 15);
    let harness = TestHarness::new();
    harness.recommender.rebuild(&catalog).unwrap();

    for (seed, profile) in catalog.iter().enumerate() {
        let query = random_query(seed as u64, 5);
        let ranked = harness
            .recommender
            .top_k_excluding(&query, catalog.len(), &profile.id)
            .unwrap();
        assert!(ranked.iter().all(|r| r.agent_id != profile.id));
    }
}
