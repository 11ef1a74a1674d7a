//! E2E tests: counts, averages, latest students, name listing, roll calls
//! and the service endpoints.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_aggregates_on_empty_store() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, count) = get_json(&app, "/api/v1/students/count").await;
    assert_eq!(status, 200);
    assert_eq!(count, json!({ "count": 0 }));

    let (_, average) = get_json(&app, "/api/v1/students/average-age").await;
    assert_eq!(average["average_age"].as_f64(), Some(0.0));

    let (_, average) = get_json(&app, "/api/v1/students/average-age-in-memory").await;
    assert_eq!(average["average_age"].as_f64(), Some(0.0));

    let (_, latest) = get_json(&app, "/api/v1/students/latest").await;
    assert_eq!(latest, json!([]));

    let (_, names) = get_json(&app, "/api/v1/students/names-starting-with-a").await;
    assert_eq!(names, json!([]));
}

#[actix_rt::test]
async fn test_count_and_averages() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    for (name, age) in [("Alice", 12), ("Bob", 13), ("Carl", 15)] {
        create_student(&app, name, age, None).await;
    }

    let (_, count) = get_json(&app, "/api/v1/students/count").await;
    assert_eq!(count["count"], 3);

    let (_, from_store) = get_json(&app, "/api/v1/students/average-age").await;
    let (_, in_memory) = get_json(&app, "/api/v1/students/average-age-in-memory").await;

    let expected = (12.0 + 13.0 + 15.0) / 3.0;
    let from_store = from_store["average_age"].as_f64().unwrap();
    let in_memory = in_memory["average_age"].as_f64().unwrap();
    assert!((from_store - expected).abs() < 1e-9, "got {}", from_store);
    assert!((in_memory - expected).abs() < 1e-9, "got {}", in_memory);
}

#[actix_rt::test]
async fn test_latest_returns_five_newest_first() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let mut ids = Vec::new();
    for i in 0..7 {
        let student = create_student(&app, &format!("Student{}", i), 11 + i, None).await;
        ids.push(student["id"].as_i64().unwrap());
    }

    let (status, latest) = get_json(&app, "/api/v1/students/latest").await;
    assert_eq!(status, 200);
    let latest_ids: Vec<i64> = latest
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();

    let expected: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(latest_ids, expected);
}

#[actix_rt::test]
async fn test_names_starting_with_a() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    for name in ["Alice", "bob", "ANNA", "Carl", "arthur"] {
        create_student(&app, name, 12, None).await;
    }

    let (status, names) = get_json(&app, "/api/v1/students/names-starting-with-a").await;
    assert_eq!(status, 200);
    assert_eq!(names, json!(["ALICE", "ANNA", "ARTHUR"]));
}

#[actix_rt::test]
async fn test_roll_calls_need_six_students() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    for i in 0..5 {
        create_student(&app, &format!("Student{}", i), 12, None).await;
    }

    let (status, _) = get_json(&app, "/api/v1/students/print-parallel").await;
    assert_eq!(status, 400);
    let (status, _) = get_json(&app, "/api/v1/students/print-synchronized").await;
    assert_eq!(status, 400);

    create_student(&app, "Student5", 12, None).await;

    let (status, _) = get_json(&app, "/api/v1/students/print-parallel").await;
    assert_eq!(status, 200);
    let (status, _) = get_json(&app, "/api/v1/students/print-synchronized").await;
    assert_eq!(status, 200);
}

#[actix_rt::test]
async fn test_math_sum() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = get_json(&app, "/api/v1/math/sum").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "sum": 500_000_500_000i64 }));
}

#[actix_rt::test]
async fn test_health_and_ready() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = get_json(&app, "/api/v1/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "migrated");
    assert_eq!(body["pending_migrations"], 0);
    assert_eq!(body["avatar_storage"], "available");
}

#[actix_rt::test]
async fn test_not_ready_without_avatar_storage() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    std::fs::remove_dir_all(ctx.avatars_dir().join(".upload_temp")).unwrap();

    let (status, body) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, 503);
    assert_eq!(body["status"], "not ready");
    assert_eq!(body["database"], "migrated");
    assert_eq!(body["avatar_storage"], "missing");
}
