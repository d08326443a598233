use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pm_common::{Availability, Mobility, Profile};

fn python_profile(id: u64, years: u32) -> Profile {
    Profile {
        id,
        experience_years: years,
        hard_skills: vec!["python".into(), "django".into()],
        location: "Paris".into(),
        mobility: Mobility::Mobile,
        availability: Availability::Immediate,
        full_text: format!("Développeur Python Django à Paris, {years} ans d'expérience"),
        ..Profile::default()
    }
}

fn seeded_app() -> Router {
    // Years [1, 3, 5, 8, 0], ids 1..=5, equal skills.
    let profiles = [1u32, 3, 5, 8, 0]
        .iter()
        .enumerate()
        .map(|(i, years)| python_profile(i as u64 + 1, *years))
        .collect();
    pm_api::create_router(pm_api::test_state(profiles))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn match_ranks_experienced_profiles_over_juniors() {
    let (status, body) = response_json(
        seeded_app(),
        json_request(
            "/match",
            json!({ "offer_text": "Développeur Python, 3 ans d'expérience", "top_k": 5 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);

    // Sorted non-increasing, scores in [0, 1].
    let scores: Vec<f64> = results
        .iter()
        .map(|r| r["final_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));

    // ids 2 (3 years) and 3 (5 years) must outrank ids 1 (1 year) and
    // 5 (0 years).
    let rank_of = |id: u64| {
        results
            .iter()
            .position(|r| r["id"].as_u64() == Some(id))
            .unwrap()
    };
    for strong in [2, 3] {
        for weak in [1, 5] {
            assert!(rank_of(strong) < rank_of(weak));
        }
    }

    // Explanations ship by default.
    assert!(results[0]["explanation"]["strengths"].as_array().is_some());
}

#[tokio::test]
async fn identical_requests_return_identical_rankings() {
    let request = || {
        json_request(
            "/match",
            json!({ "offer_text": "Développeur Python à Paris", "top_k": 5 }),
        )
    };

    let (_, first) = response_json(seeded_app(), request()).await;
    let (_, second) = response_json(seeded_app(), request()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn top_k_truncates_the_ranking() {
    let (status, body) = response_json(
        seeded_app(),
        json_request(
            "/match",
            json!({ "offer_text": "Développeur Python", "top_k": 2, "with_explanation": false }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].get("explanation").is_none());
}

#[tokio::test]
async fn structured_search_uses_labeled_segments() {
    let (status, body) = response_json(
        seeded_app(),
        json_request(
            "/search",
            json!({ "role": "Développeur Python", "experience": "3 ans", "location": "Paris" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ingested_profile_becomes_retrievable() {
    let app = seeded_app();

    let (status, ingest) = response_json(
        app.clone(),
        json_request(
            "/profiles",
            json!({
                "experience_years": 12,
                "hard_skills": ["cobol", "fortran"],
                "location": "Brest",
                "mobility": "remote_open",
                "availability": "Immédiate",
                "experiences": "Maintenance de systèmes COBOL sur mainframe"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ingest["status"], "success");
    let new_id = ingest["profile_id"].as_u64().unwrap();
    assert_eq!(new_id, 6);

    // A search for the distinctive skill token now retrieves it.
    let (status, body) = response_json(
        app,
        json_request("/search", json!({ "skills": "cobol mainframe" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert!(results
        .iter()
        .any(|r| r["id"].as_u64() == Some(new_id)));
}
