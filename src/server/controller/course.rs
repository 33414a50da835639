use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ErrorDto, course::CourseDto},
    server::{data::course::CourseRepository, error::Error, model::app::AppState},
};

pub static COURSE_TAG: &str = "course";

/// List the courses students can register for
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Courses ordered by name", body = Vec<CourseDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let courses: Vec<CourseDto> = CourseRepository::new(&state.db)
        .get_all()
        .await?
        .into_iter()
        .map(|course| CourseDto {
            id: course.id,
            name: course.name,
        })
        .collect();

    Ok((StatusCode::OK, Json(courses)))
}
