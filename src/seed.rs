//! Demonstration data for a fresh store: four projects, two of them with a
//! milestone plan.
use crate::milestones::models::{MilestoneStatus, NewMilestone};
use crate::milestones::services::create_milestones_bulk;
use crate::projects::models::{self, NewProject, Project, ProjectStatus};
use crate::projects::services::insert_project;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub projects: Vec<Project>,
    pub milestones: u64,
}

fn date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, DbErr> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| DbErr::Custom(format!("Invalid seed date {year}-{month}-{day}")))
}

#[allow(clippy::too_many_arguments)]
fn project(
    title: &str,
    description: &str,
    status: ProjectStatus,
    budget: i64,
    deadline: DateTime<Utc>,
    location: &str,
    client: &str,
    image: &str,
) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: description.to_string(),
        status,
        budget: Decimal::from(budget),
        deadline,
        location: Some(location.to_string()),
        client: Some(client.to_string()),
        image: Some(image.to_string()),
    }
}

fn milestone(
    title: &str,
    description: &str,
    status: MilestoneStatus,
    due_date: DateTime<Utc>,
) -> NewMilestone {
    NewMilestone {
        title: title.to_string(),
        description: Some(description.to_string()),
        status,
        due_date,
    }
}

/// Insert the demonstration projects and milestones. Meant for an empty or
/// throwaway store; running it twice duplicates everything.
#[allow(clippy::too_many_lines)]
pub async fn seed_database(db: &DatabaseConnection) -> Result<SeedSummary, DbErr> {
    let existing = models::Entity::find().count(db).await?;
    if existing > 0 {
        tracing::warn!(existing, "Store already holds projects, seeding anyway");
    }

    let mut summary = SeedSummary::default();

    let office = insert_project(
        db,
        project(
            "Modern Office Complex",
            "A state-of-the-art 20-story office building in downtown with sustainable design features and modern amenities.",
            ProjectStatus::Completed,
            2_500_000,
            date(2024, 6, 15)?,
            "Downtown Business District",
            "TechCorp Inc.",
            "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=800",
        ),
    )
    .await?;

    let tower = insert_project(
        db,
        project(
            "Residential Tower",
            "Luxury residential complex with premium amenities including rooftop garden, fitness center, and concierge services.",
            ProjectStatus::InProgress,
            1_800_000,
            date(2024, 12, 30)?,
            "Waterfront District",
            "Urban Development LLC",
            "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=800",
        ),
    )
    .await?;

    let mall = insert_project(
        db,
        project(
            "Shopping Mall Renovation",
            "Complete renovation of a 50,000 sq ft shopping center including new facade, interior redesign, and parking improvements.",
            ProjectStatus::Completed,
            1_200_000,
            date(2024, 3, 20)?,
            "Suburban Shopping District",
            "Retail Solutions Group",
            "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=800",
        ),
    )
    .await?;

    let hospital = insert_project(
        db,
        project(
            "Hospital Expansion",
            "Major expansion project adding new wing with 100 patient rooms, surgical suites, and emergency department.",
            ProjectStatus::Planning,
            3_500_000,
            date(2025, 8, 15)?,
            "Medical District",
            "City General Hospital",
            "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?w=800",
        ),
    )
    .await?;

    summary.milestones += create_milestones_bulk(
        db,
        tower.id,
        vec![
            milestone(
                "Foundation Work",
                "Complete foundation excavation and concrete pouring",
                MilestoneStatus::Completed,
                date(2024, 2, 15)?,
            ),
            milestone(
                "Structural Framework",
                "Erect steel framework and concrete structure",
                MilestoneStatus::Completed,
                date(2024, 4, 30)?,
            ),
            milestone(
                "Exterior Finishing",
                "Install facade, windows, and exterior finishes",
                MilestoneStatus::InProgress,
                date(2024, 8, 15)?,
            ),
            milestone(
                "Interior Work",
                "Complete interior finishes, electrical, and plumbing",
                MilestoneStatus::Pending,
                date(2024, 10, 30)?,
            ),
            milestone(
                "Final Inspection",
                "Final inspections and project handover",
                MilestoneStatus::Pending,
                date(2024, 12, 15)?,
            ),
        ],
    )
    .await?;

    summary.milestones += create_milestones_bulk(
        db,
        hospital.id,
        vec![
            milestone(
                "Design Phase",
                "Complete architectural and engineering design",
                MilestoneStatus::InProgress,
                date(2024, 12, 31)?,
            ),
            milestone(
                "Permit Approval",
                "Obtain all necessary permits and approvals",
                MilestoneStatus::Pending,
                date(2025, 2, 15)?,
            ),
            milestone(
                "Site Preparation",
                "Site clearing and preparation for construction",
                MilestoneStatus::Pending,
                date(2025, 3, 30)?,
            ),
            milestone(
                "Construction Start",
                "Begin major construction work",
                MilestoneStatus::Pending,
                date(2025, 4, 15)?,
            ),
        ],
    )
    .await?;

    summary.projects = vec![office, tower, mall, hospital];
    Ok(summary)
}
