//! Avatar API handlers: upload, metadata, image bytes and pagination.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};
use crate::models::{AvatarListResponse, AvatarResponse, AvatarUpload, PaginationParams};
use crate::services::AvatarService;

/// Read the first multipart field that carries a file name.
///
/// Fields without a file name are skipped. Reading stops with
/// `PayloadTooLarge` as soon as the file exceeds `max_size`.
async fn read_avatar_upload(payload: &mut Multipart, max_size: usize) -> AppResult<AvatarUpload> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let Some(file_name) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            drain_field(&mut field).await;
            continue;
        };

        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
            if data.len() + chunk.len() > max_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "Avatar exceeds the limit of {} bytes",
                    max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(AvatarUpload {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::InvalidInput(
        "Missing avatar file in multipart body".to_string(),
    ))
}

async fn drain_field(field: &mut actix_multipart::Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}

/// Upload or replace a student's avatar.
///
/// Accepts multipart form data; the first part with a file name is stored.
#[utoipa::path(
    post,
    path = "/api/v1/students/{id}/avatar",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Missing file or invalid file name", body = crate::error::ErrorResponse),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse),
        (status = 413, description = "Avatar too large", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_avatar(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let student_id = path.into_inner();
    let upload = read_avatar_upload(&mut payload, service.max_size()).await?;
    let avatar = service.upload_avatar(student_id, upload).await?;
    Ok(HttpResponse::Ok().json(AvatarResponse::from(avatar)))
}

/// Avatar metadata of a student.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/avatar",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Avatar", body = AvatarResponse),
        (status = 404, description = "Student or avatar not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn student_avatar(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let avatar = service.get_avatar_by_student(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AvatarResponse::from(avatar)))
}

/// List avatars with pagination.
#[utoipa::path(
    get,
    path = "/api/v1/avatars",
    tag = "Avatars",
    params(
        ("page" = Option<u32>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u32>, Query, description = "Page size, at most 100")
    ),
    responses(
        (status = 200, description = "Avatar page", body = AvatarListResponse),
    )
)]
pub async fn list_avatars(
    service: web::Data<AvatarService>,
    query: web::Query<PaginationParams>,
) -> AppResult<HttpResponse> {
    let (avatars, pagination) = service.get_all_avatars(&query).await?;
    Ok(HttpResponse::Ok().json(AvatarListResponse {
        avatars: avatars.into_iter().map(AvatarResponse::from).collect(),
        pagination,
    }))
}

/// Avatar metadata.
#[utoipa::path(
    get,
    path = "/api/v1/avatars/{id}",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Avatar ID")),
    responses(
        (status = 200, description = "Avatar", body = AvatarResponse),
        (status = 404, description = "Avatar not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_avatar(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let avatar = service.find_avatar(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AvatarResponse::from(avatar)))
}

/// Avatar image bytes as stored in the database.
#[utoipa::path(
    get,
    path = "/api/v1/avatars/{id}/data",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Avatar ID")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Avatar not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn avatar_data(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let avatar = service.find_avatar(path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(avatar.media_type)
        .body(avatar.data))
}

/// Avatar image bytes read from disk.
#[utoipa::path(
    get,
    path = "/api/v1/avatars/{id}/file",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Avatar ID")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Avatar or file not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn avatar_file(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let (data, media_type) = service.read_avatar_file(path.into_inner()).await?;
    Ok(HttpResponse::Ok().content_type(media_type).body(data))
}

/// Delete an avatar row. The file on disk is kept.
#[utoipa::path(
    delete,
    path = "/api/v1/avatars/{id}",
    tag = "Avatars",
    params(("id" = i32, Path, description = "Avatar ID")),
    responses(
        (status = 200, description = "Avatar deleted", body = AvatarResponse),
        (status = 404, description = "Avatar not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_avatar(
    service: web::Data<AvatarService>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let avatar = service.delete_avatar(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AvatarResponse::from(avatar)))
}

/// Configure avatar routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/students/{id}/avatar")
            .route(web::post().to(upload_avatar))
            .route(web::get().to(student_avatar)),
    )
    .service(web::resource("/avatars").route(web::get().to(list_avatars)))
    .service(
        web::resource("/avatars/{id}")
            .route(web::get().to(get_avatar))
            .route(web::delete().to(delete_avatar)),
    )
    .service(web::resource("/avatars/{id}/data").route(web::get().to(avatar_data)))
    .service(web::resource("/avatars/{id}/file").route(web::get().to(avatar_file)));
}
