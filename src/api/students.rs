//! Student API handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::models::{AgeQuery, AgeRangeQuery, FacultyResponse, StudentRequest, StudentResponse};
use crate::services::{ConsoleRollCall, StudentService};

/// Number of students.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentCountResponse {
    pub count: u64,
}

/// Mean student age.
#[derive(Debug, Serialize, ToSchema)]
pub struct AverageAgeResponse {
    pub average_age: f64,
}

fn to_responses(students: Vec<crate::entity::student::Model>) -> Vec<StudentResponse> {
    students.into_iter().map(StudentResponse::from).collect()
}

/// Create a student.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    tag = "Students",
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_student(
    service: web::Data<StudentService>,
    body: web::Json<StudentRequest>,
) -> AppResult<HttpResponse> {
    let student = service.create(&body).await?;
    Ok(HttpResponse::Created().json(StudentResponse::from(student)))
}

/// Get a student by ID.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_student(
    service: web::Data<StudentService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let student = service.read(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

/// Overwrite a student's name and age.
///
/// `faculty_id` in the body is ignored; the faculty link is not changed.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_student(
    service: web::Data<StudentService>,
    path: web::Path<i32>,
    body: web::Json<StudentRequest>,
) -> AppResult<HttpResponse> {
    let student = service.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

/// Delete a student. Returns the deleted student.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_student(
    service: web::Data<StudentService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let student = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StudentResponse::from(student)))
}

/// List students, optionally filtered by exact age.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    tag = "Students",
    params(("age" = Option<i32>, Query, description = "Exact age")),
    responses(
        (status = 200, description = "Students", body = Vec<StudentResponse>),
    )
)]
pub async fn list_students(
    service: web::Data<StudentService>,
    query: web::Query<AgeQuery>,
) -> AppResult<HttpResponse> {
    let students = match query.age {
        Some(age) => service.filter_by_age(age).await?,
        None => service.list_all().await?,
    };
    Ok(HttpResponse::Ok().json(to_responses(students)))
}

/// Students whose age lies in `from..=to`.
#[utoipa::path(
    get,
    path = "/api/v1/students/age-between",
    tag = "Students",
    params(
        ("from" = i32, Query, description = "Lowest age, inclusive"),
        ("to" = i32, Query, description = "Highest age, inclusive")
    ),
    responses(
        (status = 200, description = "Students in range", body = Vec<StudentResponse>),
    )
)]
pub async fn students_by_age_between(
    service: web::Data<StudentService>,
    query: web::Query<AgeRangeQuery>,
) -> AppResult<HttpResponse> {
    let students = service.find_all_by_age_between(query.from, query.to).await?;
    Ok(HttpResponse::Ok().json(to_responses(students)))
}

/// The faculty a student belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/faculty",
    tag = "Students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Faculty of the student", body = FacultyResponse),
        (status = 404, description = "Student or faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn student_faculty(
    service: web::Data<StudentService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let faculty = service.get_faculty_of_student(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FacultyResponse::from(faculty)))
}

/// Total number of students.
#[utoipa::path(
    get,
    path = "/api/v1/students/count",
    tag = "Students",
    responses((status = 200, description = "Student count", body = StudentCountResponse))
)]
pub async fn count_students(service: web::Data<StudentService>) -> AppResult<HttpResponse> {
    let count = service.count_all().await?;
    Ok(HttpResponse::Ok().json(StudentCountResponse { count }))
}

/// Mean student age computed by the database. 0 when there are no students.
#[utoipa::path(
    get,
    path = "/api/v1/students/average-age",
    tag = "Students",
    responses((status = 200, description = "Average age", body = AverageAgeResponse))
)]
pub async fn average_age(service: web::Data<StudentService>) -> AppResult<HttpResponse> {
    let average_age = service.average_age().await?;
    Ok(HttpResponse::Ok().json(AverageAgeResponse { average_age }))
}

/// Mean student age computed in memory. 0 when there are no students.
#[utoipa::path(
    get,
    path = "/api/v1/students/average-age-in-memory",
    tag = "Students",
    responses((status = 200, description = "Average age", body = AverageAgeResponse))
)]
pub async fn average_age_in_memory(service: web::Data<StudentService>) -> AppResult<HttpResponse> {
    let average_age = service.average_age_in_memory().await?;
    Ok(HttpResponse::Ok().json(AverageAgeResponse { average_age }))
}

/// The five most recently added students, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/students/latest",
    tag = "Students",
    responses((status = 200, description = "Latest students", body = Vec<StudentResponse>))
)]
pub async fn latest_students(service: web::Data<StudentService>) -> AppResult<HttpResponse> {
    let students = service.latest().await?;
    Ok(HttpResponse::Ok().json(to_responses(students)))
}

/// Upper-cased names starting with 'A', sorted.
#[utoipa::path(
    get,
    path = "/api/v1/students/names-starting-with-a",
    tag = "Students",
    responses((status = 200, description = "Names", body = Vec<String>))
)]
pub async fn names_starting_with_a(service: web::Data<StudentService>) -> AppResult<HttpResponse> {
    let names = service.names_starting_with_a().await?;
    Ok(HttpResponse::Ok().json(names))
}

async fn student_names(service: &StudentService) -> AppResult<Vec<String>> {
    Ok(service
        .list_all()
        .await?
        .into_iter()
        .map(|s| s.name)
        .collect())
}

/// Print six student names to the server console from two concurrent tasks.
#[utoipa::path(
    get,
    path = "/api/v1/students/print-parallel",
    tag = "Students",
    responses(
        (status = 200, description = "Printing started"),
        (status = 400, description = "Fewer than six students", body = crate::error::ErrorResponse),
    )
)]
pub async fn print_parallel(
    service: web::Data<StudentService>,
    roll_call: web::Data<ConsoleRollCall>,
) -> AppResult<HttpResponse> {
    let names = student_names(&service).await?;
    roll_call.print_parallel(&names)?;
    info!("Parallel roll call started");
    Ok(HttpResponse::Ok().finish())
}

/// Same as print-parallel, but each task prints its two names back to back.
#[utoipa::path(
    get,
    path = "/api/v1/students/print-synchronized",
    tag = "Students",
    responses(
        (status = 200, description = "Printing started"),
        (status = 400, description = "Fewer than six students", body = crate::error::ErrorResponse),
    )
)]
pub async fn print_synchronized(
    service: web::Data<StudentService>,
    roll_call: web::Data<ConsoleRollCall>,
) -> AppResult<HttpResponse> {
    let names = student_names(&service).await?;
    roll_call.print_synchronized(&names)?;
    info!("Synchronized roll call started");
    Ok(HttpResponse::Ok().finish())
}

/// Configure student routes. Fixed paths come before `/students/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/students")
            .route(web::get().to(list_students))
            .route(web::post().to(create_student)),
    )
    .service(web::resource("/students/age-between").route(web::get().to(students_by_age_between)))
    .service(web::resource("/students/count").route(web::get().to(count_students)))
    .service(web::resource("/students/average-age").route(web::get().to(average_age)))
    .service(
        web::resource("/students/average-age-in-memory")
            .route(web::get().to(average_age_in_memory)),
    )
    .service(web::resource("/students/latest").route(web::get().to(latest_students)))
    .service(
        web::resource("/students/names-starting-with-a")
            .route(web::get().to(names_starting_with_a)),
    )
    .service(web::resource("/students/print-parallel").route(web::get().to(print_parallel)))
    .service(
        web::resource("/students/print-synchronized").route(web::get().to(print_synchronized)),
    )
    .service(
        web::resource("/students/{id}")
            .route(web::get().to(get_student))
            .route(web::put().to(update_student))
            .route(web::delete().to(delete_student)),
    )
    .service(web::resource("/students/{id}/faculty").route(web::get().to(student_faculty)));
}
