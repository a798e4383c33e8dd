use super::models::{ActiveModel, Entity, NewMilestone};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};

/// Insert all `milestones` for `project_id` in a single statement and return
/// how many rows went in. The store either takes the whole batch or none of it.
pub async fn create_milestones_bulk(
    db: &DatabaseConnection,
    project_id: i32,
    milestones: Vec<NewMilestone>,
) -> Result<u64, DbErr> {
    if milestones.is_empty() {
        return Ok(0);
    }

    let rows = milestones.into_iter().map(|milestone| ActiveModel {
        title: Set(milestone.title),
        description: Set(milestone.description.filter(|d| !d.trim().is_empty())),
        status: Set(milestone.status.to_string()),
        due_date: Set(milestone.due_date),
        project_id: Set(project_id),
        ..Default::default()
    });

    let inserted = Entity::insert_many(rows).exec_without_returning(db).await?;
    tracing::debug!(project_id, inserted, "Inserted milestones");
    Ok(inserted)
}
