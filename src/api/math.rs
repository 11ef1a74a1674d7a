//! Arithmetic demo endpoint.

use actix_web::{HttpResponse, get};
use serde::Serialize;
use utoipa::ToSchema;

/// Upper bound of the summed range.
const SUM_UPPER_BOUND: i64 = 1_000_000;

/// Sum response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SumResponse {
    pub sum: i64,
}

/// Sum of `1..=n` in closed form.
pub fn sum_to(n: i64) -> i64 {
    n * (n + 1) / 2
}

/// Sum of all integers from 1 to 1 000 000.
#[utoipa::path(
    get,
    path = "/api/v1/math/sum",
    tag = "Math",
    responses(
        (status = 200, description = "Sum of 1..=1000000", body = SumResponse)
    )
)]
#[get("/math/sum")]
pub async fn sum() -> HttpResponse {
    HttpResponse::Ok().json(SumResponse {
        sum: sum_to(SUM_UPPER_BOUND),
    })
}
