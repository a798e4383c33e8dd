use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        // Create projects table
        let mut projects_table = Table::create()
            .table(Projects::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Projects::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Projects::Title).string().not_null())
            .col(ColumnDef::new(Projects::Description).text().not_null())
            .col(
                ColumnDef::new(Projects::Status)
                    .string()
                    .not_null()
                    .default("planning"),
            )
            .col(
                ColumnDef::new(Projects::Deadline)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(Projects::Location).string())
            .col(ColumnDef::new(Projects::Client).string())
            .col(ColumnDef::new(Projects::Image).string())
            .col(
                ColumnDef::new(Projects::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();

        // SQLite hands decimals back as REAL, so the column has to be REAL there
        match backend {
            sea_orm::DatabaseBackend::Postgres => {
                projects_table.col(
                    ColumnDef::new(Projects::Budget)
                        .decimal_len(14, 2)
                        .not_null(),
                );
            }
            sea_orm::DatabaseBackend::Sqlite => {
                projects_table.col(ColumnDef::new(Projects::Budget).double().not_null());
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".to_string()));
            }
        }

        manager.create_table(projects_table).await?;

        // Create milestones table
        manager
            .create_table(
                Table::create()
                    .table(Milestones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Milestones::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Milestones::Title).string().not_null())
                    .col(ColumnDef::new(Milestones::Description).text())
                    .col(
                        ColumnDef::new(Milestones::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Milestones::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Milestones::ProjectId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestones_project_id")
                            .from(Milestones::Table, Milestones::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_milestones_project_id")
                    .table(Milestones::Table)
                    .col(Milestones::ProjectId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_created_at")
                    .table(Projects::Table)
                    .col(Projects::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Milestones::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    Status,
    Budget,
    Deadline,
    Location,
    Client,
    Image,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Milestones {
    Table,
    Id,
    Title,
    Description,
    Status,
    DueDate,
    ProjectId,
}
