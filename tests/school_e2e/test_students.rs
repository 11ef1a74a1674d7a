//! E2E tests: student CRUD and age queries.

use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_then_read_returns_same_student() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let created = create_student(&app, "Harry", 11, None).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Harry");
    assert_eq!(created["age"], 11);
    assert!(created["faculty_id"].is_null());

    let (status, fetched) = get_json(&app, &format!("/api/v1/students/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);
}

#[actix_rt::test]
async fn test_names_are_stored_as_given() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let created = create_student(&app, "  Harry ", 11, None).await;
    let uri = format!("/api/v1/students/{}", created["id"]);
    assert_eq!(created["name"], "  Harry ");

    let (_, fetched) = get_json(&app, &uri).await;
    assert_eq!(fetched["name"], "  Harry ");

    let (status, updated) = send_json(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": " Harry Potter  ", "age": 12 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["name"], " Harry Potter  ");

    let (_, fetched) = get_json(&app, &uri).await;
    assert_eq!(fetched["name"], " Harry Potter  ");
}

#[actix_rt::test]
async fn test_create_rejects_invalid_fields() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    for body in [
        json!({ "name": "  ", "age": 11 }),
        json!({ "name": "Ron", "age": 0 }),
        json!({ "name": "Ron", "age": -3 }),
    ] {
        let (status, err) = send_json(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/students")
                .set_json(&body),
        )
        .await;
        assert_eq!(status, 400, "accepted {}", body);
        assert_eq!(err["error"], "INVALID_INPUT");
    }

    let (_, count) = get_json(&app, "/api/v1/students/count").await;
    assert_eq!(count["count"], 0);
}

#[actix_rt::test]
async fn test_create_with_unknown_faculty_is_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, _) = send_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .set_json(json!({ "name": "Neville", "age": 11, "faculty_id": 999 })),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_update_overwrites_name_and_age_but_keeps_faculty() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let gryffindor = create_faculty(&app, "Gryffindor", "red").await;
    let slytherin = create_faculty(&app, "Slytherin", "green").await;
    let gryffindor_id = gryffindor["id"].as_i64().unwrap();

    let student = create_student(&app, "Hermione", 11, Some(gryffindor_id)).await;
    let id = student["id"].as_i64().unwrap();

    let (status, updated) = send_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/students/{}", id))
            .set_json(json!({
                "name": "Hermione Granger",
                "age": 12,
                "faculty_id": slytherin["id"],
            })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Hermione Granger");
    assert_eq!(updated["age"], 12);
    assert_eq!(updated["faculty_id"], gryffindor_id);

    let (_, fetched) = get_json(&app, &format!("/api/v1/students/{}", id)).await;
    assert_eq!(fetched, updated);
}

#[actix_rt::test]
async fn test_update_missing_student_is_not_found_and_creates_nothing() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, err) = send_json(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/students/42")
            .set_json(json!({ "name": "Ghost", "age": 100 })),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(err["error"], "NOT_FOUND");
    assert_eq!(err["message"], "Student 42 not found");

    let (_, count) = get_json(&app, "/api/v1/students/count").await;
    assert_eq!(count["count"], 0);
}

#[actix_rt::test]
async fn test_delete_removes_student() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let student = create_student(&app, "Dean", 11, None).await;
    let uri = format!("/api/v1/students/{}", student["id"]);

    let (status, deleted) = send_json(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, 200);
    assert_eq!(deleted, student);

    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, 404);

    let (status, _) = send_json(&app, test::TestRequest::delete().uri(&uri)).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_filter_by_exact_age() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    create_student(&app, "Fred", 13, None).await;
    create_student(&app, "George", 13, None).await;
    create_student(&app, "Ginny", 11, None).await;

    let (status, body) = get_json(&app, "/api/v1/students?age=13").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fred", "George"]);

    let (_, none) = get_json(&app, "/api/v1/students?age=40").await;
    assert_eq!(none, json!([]));

    let (_, all) = get_json(&app, "/api/v1/students").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_age_between_is_inclusive() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    for (name, age) in [("A", 10), ("B", 11), ("C", 12), ("D", 13), ("E", 14)] {
        create_student(&app, name, age, None).await;
    }

    let (status, body) = get_json(&app, "/api/v1/students/age-between?from=11&to=13").await;
    assert_eq!(status, 200);
    let ages: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["age"].as_i64().unwrap())
        .collect();
    assert_eq!(ages, vec![11, 12, 13]);

    let (_, empty) = get_json(&app, "/api/v1/students/age-between?from=13&to=11").await;
    assert_eq!(empty, json!([]));
}

#[actix_rt::test]
async fn test_faculty_of_student() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let faculty = create_faculty(&app, "Ravenclaw", "blue").await;
    let member = create_student(&app, "Luna", 11, faculty["id"].as_i64()).await;
    let loner = create_student(&app, "Argus", 50, None).await;

    let (status, body) =
        get_json(&app, &format!("/api/v1/students/{}/faculty", member["id"])).await;
    assert_eq!(status, 200);
    assert_eq!(body, faculty);

    let (status, _) = get_json(&app, &format!("/api/v1/students/{}/faculty", loner["id"])).await;
    assert_eq!(status, 404);

    let (status, _) = get_json(&app, "/api/v1/students/999/faculty").await;
    assert_eq!(status, 404);
}
