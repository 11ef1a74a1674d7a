//! Shared test helpers for the school E2E tests.

use std::path::{Path, PathBuf};

use actix_web::{App, dev::ServiceResponse, test, web};
use school_lib::config::DatabaseSettings;
use school_lib::db::DbPool;
use school_lib::services::{
    AvatarService, AvatarStorage, ConsoleRollCall, FacultyService, StudentService,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Avatar size limit used unless a test asks for another one.
pub const TEST_MAX_AVATAR_SIZE: usize = 64 * 1024;

/// Multipart boundary used by [`multipart_body`].
const BOUNDARY: &str = "----school-e2e-boundary";

/// One isolated database and avatar directory.
pub struct TestContext {
    pub pool: DbPool,
    pub storage: AvatarStorage,
    pub max_avatar_size: usize,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_max_avatar_size(TEST_MAX_AVATAR_SIZE).await
    }

    pub async fn with_max_avatar_size(max_avatar_size: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = AvatarStorage::new(dir.path().join("avatars"))
            .await
            .expect("Failed to create avatar storage");

        Self {
            pool: create_test_pool().await,
            storage,
            max_avatar_size,
            _dir: dir,
        }
    }

    /// Avatar storage root.
    pub fn avatars_dir(&self) -> &Path {
        self.storage.root()
    }

    /// Where the avatar of `student_id` with extension `ext` lives.
    pub fn avatar_path(&self, student_id: i64, ext: &str) -> PathBuf {
        self.avatars_dir().join(format!("{}.{}", student_id, ext))
    }
}

/// Fresh in-memory database with all migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> DbPool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let pool = DbPool::new(&settings)
        .await
        .expect("Failed to connect to database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test app with every route mounted.
pub async fn create_test_app(
    ctx: &TestContext,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(StudentService::new(ctx.pool.clone())))
            .app_data(web::Data::new(FacultyService::new(ctx.pool.clone())))
            .app_data(web::Data::new(AvatarService::new(
                ctx.pool.clone(),
                ctx.storage.clone(),
                ctx.max_avatar_size,
            )))
            .app_data(web::Data::new(ConsoleRollCall::stdout()))
            .service(web::scope("/api/v1").configure(school_lib::api::configure_api_routes)),
    )
    .await
}

/// Send a request and return status plus raw body.
pub async fn send<S>(app: &S, req: test::TestRequest) -> (u16, Vec<u8>)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, body.to_vec())
}

/// Send a request and parse the body as JSON (`Null` when empty).
pub async fn send_json<S>(app: &S, req: test::TestRequest) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send(app, req).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body is not JSON")
    };
    (status, value)
}

pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send_json(app, test::TestRequest::get().uri(uri)).await
}

/// Create a student through the API and return its JSON.
pub async fn create_student<S>(app: &S, name: &str, age: i32, faculty_id: Option<i64>) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send_json(
        app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .set_json(json!({ "name": name, "age": age, "faculty_id": faculty_id })),
    )
    .await;
    assert_eq!(status, 201, "Student creation failed: {}", body);
    body
}

/// Create a faculty through the API and return its JSON.
pub async fn create_faculty<S>(app: &S, name: &str, color: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send_json(
        app,
        test::TestRequest::post()
            .uri("/api/v1/faculties")
            .set_json(json!({ "name": name, "color": color })),
    )
    .await;
    assert_eq!(status, 201, "Faculty creation failed: {}", body);
    body
}

/// Build a multipart body holding one file part.
///
/// Returns the `Content-Type` header value and the body bytes.
pub fn multipart_body(file_name: &str, content_type: Option<&str>, data: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"avatar\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Upload an avatar for a student.
pub async fn upload_avatar<S>(
    app: &S,
    student_id: i64,
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (header, body) = multipart_body(file_name, content_type, data);
    send_json(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/students/{}/avatar", student_id))
            .insert_header(("content-type", header))
            .set_payload(body),
    )
    .await
}
