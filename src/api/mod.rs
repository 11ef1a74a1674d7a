//! API endpoint modules.

pub mod avatars;
pub mod faculties;
pub mod health;
pub mod math;
pub mod openapi;
pub mod students;

use actix_web::web;

pub use avatars::configure_routes as configure_avatar_routes;
pub use faculties::configure_routes as configure_faculty_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use students::configure_routes as configure_student_routes;

/// Register every `/api/v1` route on the given config.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_student_routes)
        .configure(configure_avatar_routes)
        .configure(configure_faculty_routes)
        .service(math::sum);
}
