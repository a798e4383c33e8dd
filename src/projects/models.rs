use crate::common::errors::ApiError;
use crate::milestones::models::{Milestone, MilestoneStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub budget: Decimal,
    pub deadline: DateTime<Utc>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::milestones::models::Entity")]
    Milestones,
}

impl Related<crate::milestones::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A construction engagement together with its milestones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub budget: Decimal,
    pub deadline: DateTime<Utc>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub milestones: Vec<Milestone>,
}

impl Project {
    pub fn from_parts(model: Model, milestones: Vec<crate::milestones::models::Model>) -> Self {
        let mut project: Project = model.into();
        project.milestones = milestones.into_iter().map(Into::into).collect();
        project
    }
}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            budget: model.budget,
            deadline: model.deadline,
            location: model.location,
            client: model.client,
            image: model.image,
            created_at: model.created_at,
            milestones: vec![],
        }
    }
}

/// Completion of a project's milestones, derived on every read.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, ToSchema)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Progress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Milestone counts are tiny
    pub fn from_milestones(milestones: &[Milestone]) -> Self {
        let completed = milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed.as_str())
            .count();
        let total = milestones.len();
        let percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            completed,
            total,
            percentage,
        }
    }
}

/// What the detail page renders: the project, its milestones by due date,
/// and how far along they are.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub progress: Progress,
}

impl From<Project> for ProjectDetail {
    fn from(project: Project) -> Self {
        let progress = Progress::from_milestones(&project.milestones);
        Self { project, progress }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ProjectError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid status '{0}', expected one of: planning, in-progress, completed, on-hold")]
    InvalidStatus(String),
    #[error("Could not parse {field}: {message}")]
    Parse {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::MissingFields | ProjectError::InvalidStatus(_) => {
                ApiError::Validation(err.to_string())
            }
            ProjectError::Parse { .. } | ProjectError::Database(_) => {
                ApiError::internal("Failed to create project", err)
            }
        }
    }
}

/// Request body for creating a project. Everything is optional here so the
/// presence check can report missing fields itself.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ProjectPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    /// A number, or a string holding one
    #[schema(value_type = Option<f64>)]
    pub budget: Option<Value>,
    /// `YYYY-MM-DD`, RFC 3339, or epoch milliseconds
    #[schema(value_type = Option<String>)]
    pub deadline: Option<Value>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
}

/// A validated project, ready to insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub budget: Decimal,
    pub deadline: DateTime<Utc>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub image: Option<String>,
}

impl ProjectPayload {
    /// Check required fields and convert to a [`NewProject`]. Touches no store.
    pub fn validate(self) -> Result<NewProject, ProjectError> {
        let (Some(title), Some(description), Some(status), Some(budget), Some(deadline)) = (
            non_blank(self.title),
            non_blank(self.description),
            non_blank(self.status),
            present(self.budget),
            present(self.deadline),
        ) else {
            return Err(ProjectError::MissingFields);
        };

        Ok(NewProject {
            title,
            description,
            status: status.parse()?,
            budget: parse_budget(&budget)?,
            deadline: parse_deadline(&deadline)?,
            location: non_blank(self.location),
            client: non_blank(self.client),
            image: non_blank(self.image),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

fn parse_budget(value: &Value) -> Result<Decimal, ProjectError> {
    let parse_error = |message: String| ProjectError::Parse {
        field: "budget",
        message,
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Decimal::from(u))
            } else {
                let f = n.as_f64().ok_or_else(|| parse_error(n.to_string()))?;
                Decimal::try_from(f).map_err(|e| parse_error(e.to_string()))
            }
        }
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .map_err(|e| parse_error(format!("'{s}': {e}")))
        }
        other => Err(parse_error(format!("unexpected value {other}"))),
    }
}

fn parse_deadline(value: &Value) -> Result<DateTime<Utc>, ProjectError> {
    let parse_error = |message: String| ProjectError::Parse {
        field: "deadline",
        message,
    };

    match value {
        Value::String(s) => parse_date(s.trim()).ok_or_else(|| parse_error(format!("'{s}'"))),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| parse_error(n.to_string())),
        other => Err(parse_error(format!("unexpected value {other}"))),
    }
}

/// Date-only strings are read as midnight UTC.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
