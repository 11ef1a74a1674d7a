//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Records Server",
        version = "0.1.0",
        description = "API server for managing students, faculties and student avatars"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Student endpoints
        api::students::create_student,
        api::students::get_student,
        api::students::update_student,
        api::students::delete_student,
        api::students::list_students,
        api::students::students_by_age_between,
        api::students::student_faculty,
        api::students::count_students,
        api::students::average_age,
        api::students::average_age_in_memory,
        api::students::latest_students,
        api::students::names_starting_with_a,
        api::students::print_parallel,
        api::students::print_synchronized,
        // Faculty endpoints
        api::faculties::create_faculty,
        api::faculties::get_faculty,
        api::faculties::update_faculty,
        api::faculties::delete_faculty,
        api::faculties::faculties_by_color,
        api::faculties::faculties_by_name_or_color,
        api::faculties::faculty_students,
        // Avatar endpoints
        api::avatars::upload_avatar,
        api::avatars::student_avatar,
        api::avatars::list_avatars,
        api::avatars::get_avatar,
        api::avatars::avatar_data,
        api::avatars::avatar_file,
        api::avatars::delete_avatar,
        // Misc
        api::math::sum,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::Pagination,
            models::PaginationParams,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Students
            models::StudentRequest,
            models::StudentResponse,
            models::AgeQuery,
            models::AgeRangeQuery,
            api::students::StudentCountResponse,
            api::students::AverageAgeResponse,
            // Faculties
            models::FacultyRequest,
            models::FacultyResponse,
            models::FacultyColorQuery,
            models::FacultySearchQuery,
            // Avatars
            models::AvatarResponse,
            models::AvatarListResponse,
            // Misc
            api::math::SumResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Students", description = "Student records and aggregates"),
        (name = "Faculties", description = "Faculty records"),
        (name = "Avatars", description = "Student avatar images"),
        (name = "Math", description = "Arithmetic demo")
    )
)]
pub struct ApiDoc;
