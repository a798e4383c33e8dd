use super::models::{self, NewProject, ProjectStatus};
use super::services;
use crate::config::test_helpers::{setup_test_app, setup_test_db};
use crate::milestones::models::{MilestoneStatus, NewMilestone};
use crate::milestones::services::create_milestones_bulk;
use crate::test_helpers::{create_test_project, get, post_json, post_raw, project_body};
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{Value, json};
use std::collections::HashSet;

fn new_project(title: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: format!("{title} description"),
        status: ProjectStatus::InProgress,
        budget: Decimal::from(1_000),
        deadline: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        location: None,
        client: None,
        image: None,
    }
}

#[tokio::test]
async fn test_create_then_list_returns_newest_first() {
    let (_db, app) = setup_test_app().await;
    create_test_project(&app, "Older").await.unwrap();

    let (status, body) = post_json(
        &app,
        "/api/projects",
        &json!({
            "title": "X",
            "description": "Y",
            "status": "planning",
            "budget": 100,
            "deadline": "2025-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "Failed to create project: {body:?}");
    assert_eq!(body["title"], "X");
    assert_eq!(body["description"], "Y");
    assert_eq!(body["status"], "planning");
    assert_eq!(body["budget"].as_f64(), Some(100.0));
    assert_eq!(body["deadline"], "2025-01-01T00:00:00Z");
    assert!(body["id"].is_i64(), "Response should include ID");
    assert!(body["createdAt"].is_string());
    assert_eq!(body["location"], Value::Null);
    assert_eq!(body["milestones"], json!([]));

    let (list_status, list_body) = get(&app, "/api/projects").await;
    assert_eq!(list_status, StatusCode::OK, "Failed to get projects");

    let items = list_body
        .as_array()
        .unwrap_or_else(|| panic!("Expected array response, got: {list_body:?}"));
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], body["id"]);
    assert_eq!(items[0]["title"], "X");
    assert_eq!(items[1]["title"], "Older");
}

#[tokio::test]
async fn test_list_is_ordered_by_created_at_descending() {
    let (test_db, app) = setup_test_app().await;

    for i in 1..=4 {
        services::insert_project(&test_db.db, new_project(&format!("Project {i}")))
            .await
            .unwrap();
    }

    let (status, body) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);

    let created: Vec<DateTime<Utc>> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(created.len(), 4);
    assert!(
        created.windows(2).all(|pair| pair[0] >= pair[1]),
        "Projects not newest first: {created:?}"
    );
    assert_eq!(body[0]["title"], "Project 4");
}

#[tokio::test]
async fn test_list_embeds_milestones() {
    let (test_db, app) = setup_test_app().await;
    let project = services::insert_project(&test_db.db, new_project("With plan"))
        .await
        .unwrap();
    create_milestones_bulk(
        &test_db.db,
        project.id,
        vec![NewMilestone {
            title: "Groundbreaking".to_string(),
            description: None,
            status: MilestoneStatus::Pending,
            due_date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        }],
    )
    .await
    .unwrap();
    services::insert_project(&test_db.db, new_project("Without plan"))
        .await
        .unwrap();

    let (status, body) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Without plan");
    assert_eq!(body[0]["milestones"], json!([]));
    assert_eq!(body[1]["milestones"][0]["title"], "Groundbreaking");
    assert_eq!(body[1]["milestones"][0]["projectId"], project.id);
    assert_eq!(body[1]["milestones"][0]["description"], Value::Null);
}

#[tokio::test]
async fn test_missing_required_fields_are_rejected_without_writing() {
    let (test_db, app) = setup_test_app().await;
    create_test_project(&app, "Existing").await.unwrap();

    for field in ["title", "description", "status", "budget", "deadline"] {
        let mut omitted = project_body("Incomplete");
        omitted.as_object_mut().unwrap().remove(field);

        let (status, body) = post_json(&app, "/api/projects", &omitted).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "Omitting {field} should fail");
        assert_eq!(body["error"], "Missing required fields");

        let mut empty = project_body("Incomplete");
        empty[field] = json!("");

        let (status, _) = post_json(&app, "/api/projects", &empty).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "Empty {field} should fail");
    }

    for field in ["budget", "deadline"] {
        let mut falsy = project_body("Falsy");
        falsy[field] = json!(false);

        let (status, body) = post_json(&app, "/api/projects", &falsy).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field}: false should fail");
        assert_eq!(body["error"], "Missing required fields");
    }

    let count = models::Entity::find().count(&test_db.db).await.unwrap();
    assert_eq!(count, 1, "Rejected requests must not touch the store");
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (_db, app) = setup_test_app().await;

    let (status, body) = post_raw(&app, "/api/projects", "{\"title\": ".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");

    let (status, _) = post_json(&app, "/api/projects", &json!({"title": 42})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let (test_db, app) = setup_test_app().await;
    let mut body = project_body("Odd status");
    body["status"] = json!("abandoned");

    let (status, response) = post_json(&app, "/api/projects", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("abandoned"));
    assert_eq!(models::Entity::find().count(&test_db.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_string_budget_is_stored_as_number() {
    let (test_db, app) = setup_test_app().await;
    let mut body = project_body("Modern Office Complex");
    body["budget"] = json!("2500000");

    let (status, response) = post_json(&app, "/api/projects", &body).await;
    assert_eq!(status, StatusCode::CREATED, "{response:?}");
    assert_eq!(response["budget"].as_f64(), Some(2_500_000.0));

    let id = i32::try_from(response["id"].as_i64().unwrap()).unwrap();
    let stored = models::Entity::find_by_id(id)
        .one(&test_db.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.budget, Decimal::from(2_500_000));
}

#[tokio::test]
async fn test_zero_budget_is_accepted() {
    let (_db, app) = setup_test_app().await;
    let mut body = project_body("Pro bono");
    body["budget"] = json!(0);

    let (status, response) = post_json(&app, "/api/projects", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["budget"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_optional_fields_store_null_when_empty() {
    let (_db, app) = setup_test_app().await;
    let mut body = project_body("Warehouse");
    body["location"] = json!("");
    body["client"] = json!("Logistics Co");

    let (status, response) = post_json(&app, "/api/projects", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["location"], Value::Null);
    assert_eq!(response["client"], "Logistics Co");
    assert_eq!(response["image"], Value::Null);
}

#[tokio::test]
async fn test_malformed_budget_is_generic_server_error() {
    let (test_db, app) = setup_test_app().await;
    let mut body = project_body("Broken budget");
    body["budget"] = json!("two million");

    let (status, response) = post_json(&app, "/api/projects", &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response, json!({"error": "Failed to create project"}));
    assert_eq!(models::Entity::find().count(&test_db.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_created_ids_are_unique_and_timestamped() {
    let test_db = setup_test_db().await;
    let mut seen = HashSet::new();

    for i in 0..5 {
        let before = Utc::now();
        let project = services::insert_project(&test_db.db, new_project(&format!("P{i}")))
            .await
            .unwrap();
        let after = Utc::now();

        assert!(seen.insert(project.id), "Duplicate id {}", project.id);
        assert!(project.created_at >= before && project.created_at <= after);
    }
}

#[tokio::test]
async fn test_get_project_with_ordered_milestones_and_progress() {
    let (test_db, app) = setup_test_app().await;
    let project = services::insert_project(&test_db.db, new_project("Residential Tower"))
        .await
        .unwrap();

    // Inserted out of due-date order on purpose
    let plan = [
        ("Interior Work", MilestoneStatus::Pending, 10),
        ("Foundation Work", MilestoneStatus::Completed, 2),
        ("Final Inspection", MilestoneStatus::Pending, 12),
        ("Structural Framework", MilestoneStatus::Completed, 4),
        ("Exterior Finishing", MilestoneStatus::InProgress, 8),
    ];
    create_milestones_bulk(
        &test_db.db,
        project.id,
        plan.iter()
            .map(|(title, status, month)| NewMilestone {
                title: (*title).to_string(),
                description: Some(format!("{title} details")),
                status: *status,
                due_date: Utc.with_ymd_and_hms(2024, *month, 15, 0, 0, 0).unwrap(),
            })
            .collect(),
    )
    .await
    .unwrap();

    let (status, body) = get(&app, &format!("/api/projects/{}", project.id)).await;
    assert_eq!(status, StatusCode::OK, "Failed to get project: {body:?}");
    assert_eq!(body["title"], "Residential Tower");

    let due_dates: Vec<DateTime<Utc>> = body["milestones"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["dueDate"].as_str().unwrap().parse().unwrap())
        .collect();
    assert_eq!(due_dates.len(), 5);
    assert!(due_dates.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(body["milestones"][0]["title"], "Foundation Work");
    assert_eq!(body["milestones"][4]["title"], "Final Inspection");

    assert_eq!(body["progress"]["completed"], 2);
    assert_eq!(body["progress"]["total"], 5);
    assert_eq!(body["progress"]["percentage"].as_f64(), Some(40.0));
}

#[tokio::test]
async fn test_get_project_without_milestones_has_zero_progress() {
    let (_db, app) = setup_test_app().await;
    let (id, _) = create_test_project(&app, "Empty plan").await.unwrap();

    let (status, body) = get(&app, &format!("/api/projects/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["milestones"], json!([]));
    assert_eq!(body["progress"]["percentage"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let (test_db, app) = setup_test_app().await;

    let absent = services::get_project(&test_db.db, 9999).await;
    assert!(matches!(absent, Ok(None)));

    let (status, body) = get(&app, "/api/projects/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (_db, app) = setup_test_app().await;

    let (status, _) = get(&app, "/api/projects/not-a-number").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
