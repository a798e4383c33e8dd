use super::models::{ActiveModel, Column, Entity, NewProject, Project, ProjectError, ProjectPayload};
use crate::milestones::models as milestones;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait, ModelTrait, QueryOrder,
    Set,
};

/// Every project with its milestones, newest first.
pub async fn list_projects(db: &DatabaseConnection) -> Result<Vec<Project>, DbErr> {
    let models = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?;

    let milestones = models
        .load_many(
            milestones::Entity::find().order_by_asc(milestones::Column::Id),
            db,
        )
        .await?;

    Ok(models
        .into_iter()
        .zip(milestones)
        .map(|(model, milestones)| Project::from_parts(model, milestones))
        .collect())
}

/// One project with its milestones ordered by due date. `Ok(None)` when the
/// id does not exist.
pub async fn get_project(db: &DatabaseConnection, id: i32) -> Result<Option<Project>, DbErr> {
    let Some(model) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let milestones = model
        .find_related(milestones::Entity)
        .order_by_asc(milestones::Column::DueDate)
        .order_by_asc(milestones::Column::Id)
        .all(db)
        .await?;

    Ok(Some(Project::from_parts(model, milestones)))
}

/// Validate a request payload and insert it. Validation failures never
/// reach the store.
pub async fn create_project(
    db: &DatabaseConnection,
    payload: ProjectPayload,
) -> Result<Project, ProjectError> {
    let new_project = payload.validate()?;
    Ok(insert_project(db, new_project).await?)
}

pub async fn insert_project(db: &DatabaseConnection, project: NewProject) -> Result<Project, DbErr> {
    let model = ActiveModel {
        title: Set(project.title),
        description: Set(project.description),
        status: Set(project.status.to_string()),
        budget: Set(project.budget),
        deadline: Set(project.deadline),
        location: Set(project.location),
        client: Set(project.client),
        image: Set(project.image),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(id = model.id, title = %model.title, "Created project");
    Ok(model.into())
}
