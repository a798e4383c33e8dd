use super::models::{Project, ProjectDetail, ProjectPayload};
use super::services;
use crate::common::errors::{ApiError, ApiResult, DbErrorExt, ErrorBody};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_all_projects, create_project))
        .routes(routes!(get_project))
        .with_state(state.db.clone())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "All projects with their milestones, newest first", body = [Project]),
        (status = INTERNAL_SERVER_ERROR, description = "Internal Server Error", body = ErrorBody)
    ),
    summary = "List projects"
)]
pub async fn get_all_projects(State(db): State<DatabaseConnection>) -> ApiResult<Json<Vec<Project>>> {
    let projects = services::list_projects(&db)
        .await
        .map_err(|e| e.into_api_error("Failed to fetch projects"))?;

    Ok(Json(projects))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = ProjectPayload,
    responses(
        (status = CREATED, description = "Project created", body = Project),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Internal Server Error", body = ErrorBody)
    ),
    summary = "Create a project"
)]
pub async fn create_project(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected project payload");
        ApiError::Validation("Invalid JSON body".to_string())
    })?;

    let project = services::create_project(&db, payload).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = OK, description = "Project with milestones by due date and progress", body = ProjectDetail),
        (status = NOT_FOUND, description = "No project with this id", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Internal Server Error", body = ErrorBody)
    ),
    summary = "Get one project"
)]
pub async fn get_project(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ProjectDetail>> {
    let project = services::get_project(&db, id)
        .await
        .map_err(|e| e.into_api_error("Failed to fetch project"))?
        .ok_or(ApiError::NotFound {
            resource: "Project",
        })?;

    Ok(Json(project.into()))
}
