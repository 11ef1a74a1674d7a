//! Faculty API handlers.

use actix_web::{HttpResponse, web};

use crate::error::AppResult;
use crate::models::{
    FacultyColorQuery, FacultyRequest, FacultyResponse, FacultySearchQuery, StudentResponse,
};
use crate::services::FacultyService;

fn to_responses(faculties: Vec<crate::entity::faculty::Model>) -> Vec<FacultyResponse> {
    faculties.into_iter().map(FacultyResponse::from).collect()
}

/// Create a faculty.
#[utoipa::path(
    post,
    path = "/api/v1/faculties",
    tag = "Faculties",
    request_body = FacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_faculty(
    service: web::Data<FacultyService>,
    body: web::Json<FacultyRequest>,
) -> AppResult<HttpResponse> {
    let faculty = service.create(&body).await?;
    Ok(HttpResponse::Created().json(FacultyResponse::from(faculty)))
}

/// Get a faculty by ID.
#[utoipa::path(
    get,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty", body = FacultyResponse),
        (status = 404, description = "Faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_faculty(
    service: web::Data<FacultyService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let faculty = service.read(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FacultyResponse::from(faculty)))
}

/// Overwrite a faculty's name and color.
#[utoipa::path(
    put,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    params(("id" = i32, Path, description = "Faculty ID")),
    request_body = FacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyResponse),
        (status = 404, description = "Faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_faculty(
    service: web::Data<FacultyService>,
    path: web::Path<i32>,
    body: web::Json<FacultyRequest>,
) -> AppResult<HttpResponse> {
    let faculty = service.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(FacultyResponse::from(faculty)))
}

/// Delete a faculty. Its students stay, without a faculty.
#[utoipa::path(
    delete,
    path = "/api/v1/faculties/{id}",
    tag = "Faculties",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty deleted", body = FacultyResponse),
        (status = 404, description = "Faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_faculty(
    service: web::Data<FacultyService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let faculty = service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(FacultyResponse::from(faculty)))
}

/// List faculties, optionally only those with exactly the given color.
#[utoipa::path(
    get,
    path = "/api/v1/faculties",
    tag = "Faculties",
    params(("color" = Option<String>, Query, description = "Color, case-sensitive; omit to list all")),
    responses(
        (status = 200, description = "Faculties", body = Vec<FacultyResponse>),
    )
)]
pub async fn faculties_by_color(
    service: web::Data<FacultyService>,
    query: web::Query<FacultyColorQuery>,
) -> AppResult<HttpResponse> {
    let faculties = match query.color.as_deref() {
        Some(color) => service.filter_by_color(color).await?,
        None => service.list_all().await?,
    };
    Ok(HttpResponse::Ok().json(to_responses(faculties)))
}

/// Faculties matching the name OR the color, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/faculties/by-name-or-color",
    tag = "Faculties",
    params(
        ("name" = Option<String>, Query, description = "Faculty name"),
        ("color" = Option<String>, Query, description = "Faculty color")
    ),
    responses(
        (status = 200, description = "Matching faculties", body = Vec<FacultyResponse>),
        (status = 400, description = "Neither name nor color given", body = crate::error::ErrorResponse),
    )
)]
pub async fn faculties_by_name_or_color(
    service: web::Data<FacultyService>,
    query: web::Query<FacultySearchQuery>,
) -> AppResult<HttpResponse> {
    let faculties = service
        .find_by_name_or_color_ignore_case(query.name.as_deref(), query.color.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(to_responses(faculties)))
}

/// Students of a faculty.
#[utoipa::path(
    get,
    path = "/api/v1/faculties/{id}/students",
    tag = "Faculties",
    params(("id" = i32, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Students of the faculty", body = Vec<StudentResponse>),
        (status = 404, description = "Faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn faculty_students(
    service: web::Data<FacultyService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let students = service.get_students(path.into_inner()).await?;
    let response: Vec<StudentResponse> = students.into_iter().map(StudentResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Configure faculty routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/faculties")
            .route(web::get().to(faculties_by_color))
            .route(web::post().to(create_faculty)),
    )
    .service(
        web::resource("/faculties/by-name-or-color")
            .route(web::get().to(faculties_by_name_or_color)),
    )
    .service(
        web::resource("/faculties/{id}")
            .route(web::get().to(get_faculty))
            .route(web::put().to(update_faculty))
            .route(web::delete().to(delete_faculty)),
    )
    .service(web::resource("/faculties/{id}/students").route(web::get().to(faculty_students)));
}
