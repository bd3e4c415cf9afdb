//! End-to-end integration tests over the HTTP surface.

pub mod utils;

use axum::http::{HeaderValue, StatusCode, header};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use utils::{create_employee, create_test_server, create_test_server_with_estimator};

#[sqlx::test]
#[test_log::test]
async fn test_employee_crud_round_trip(pool: SqlitePool) {
    let server = create_test_server(pool);

    // Create
    let created = create_employee(&server, "A", "Sales", 50_000.0, "2020-01-01T00:00:00").await;
    let id = created["id"].as_str().expect("server assigns an id").to_string();
    assert_eq!(created["name"], "A");
    assert_eq!(created["department"], "Sales");
    assert_eq!(created["salary"], 50_000.0);

    // Read back: identifier is stable, fields round-trip
    let response = server.get(&format!("/employees/{id}")).await;
    response.assert_status_ok();
    let fetched = response.json::<Value>();
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["name"], "A");
    assert_eq!(fetched["salary"], 50_000.0);
    assert_eq!(fetched["hire_date"], "2020-01-01T00:00:00Z");

    // Delete
    let response = server.delete(&format!("/employees/{id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    // Gone
    server.get(&format!("/employees/{id}")).await.assert_status_not_found();
}

#[sqlx::test]
#[test_log::test]
async fn test_create_with_unknown_department_is_rejected(pool: SqlitePool) {
    let server = create_test_server(pool);

    let response = server
        .post("/employees/")
        .json(&json!({"name": "A", "department": "Astrology", "hire_date": "2020-01-01T00:00:00"}))
        .await;
    response.assert_status_bad_request();

    // Validation runs before any mutation: nothing was stored
    let list = server.get("/employees/").await.json::<Value>();
    assert_eq!(list["pagination"]["total_items"], 0);
}

#[sqlx::test]
#[test_log::test]
async fn test_put_nulls_out_missing_fields(pool: SqlitePool) {
    let server = create_test_server(pool);

    let created = create_employee(&server, "A", "Sales", 50_000.0, "2020-01-01T00:00:00").await;
    let id = created["id"].as_str().unwrap();

    // Full replace with only the required hire_date: everything else clears
    let response = server
        .put(&format!("/employees/{id}"))
        .json(&json!({"hire_date": "2021-06-01T00:00:00"}))
        .await;
    response.assert_status_ok();

    let replaced = response.json::<Value>();
    assert_eq!(replaced["name"], Value::Null);
    assert_eq!(replaced["department"], Value::Null);
    assert_eq!(replaced["salary"], 0.0);
    assert_eq!(replaced["hire_date"], "2021-06-01T00:00:00Z");
}

#[sqlx::test]
#[test_log::test]
async fn test_if_match_precondition(pool: SqlitePool) {
    let server = create_test_server(pool);

    let created = create_employee(&server, "A", "Sales", 50_000.0, "2020-01-01T00:00:00").await;
    let id = created["id"].as_str().unwrap().to_string();

    let tag = server
        .get(&format!("/employees/{id}"))
        .await
        .headers()
        .get(header::ETAG)
        .expect("GET carries an ETag")
        .clone();

    // Stale tag is rejected
    let response = server
        .put(&format!("/employees/{id}"))
        .add_header(header::IF_MATCH, HeaderValue::from_static("\"stale\""))
        .json(&json!({"name": "B", "hire_date": "2020-01-01T00:00:00"}))
        .await;
    response.assert_status(StatusCode::PRECONDITION_FAILED);

    // Matching tag passes
    let response = server
        .put(&format!("/employees/{id}"))
        .add_header(header::IF_MATCH, tag.clone())
        .json(&json!({"name": "B", "hire_date": "2020-01-01T00:00:00"}))
        .await;
    response.assert_status_ok();

    // The old tag no longer matches after the write
    let response = server
        .delete(&format!("/employees/{id}"))
        .add_header(header::IF_MATCH, tag)
        .await;
    response.assert_status(StatusCode::PRECONDITION_FAILED);
}

#[sqlx::test]
#[test_log::test]
async fn test_average_salary(pool: SqlitePool) {
    let server = create_test_server(pool);

    for salary in [10.0, 20.0, 30.0] {
        create_employee(&server, "E", "Sales", salary, "2020-01-01T00:00:00").await;
    }
    create_employee(&server, "Other", "Finance", 999.0, "2020-01-01T00:00:00").await;

    let response = server.get("/average_salary/Sales").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], 20.0);

    // Empty department: the defined sentinel, never a division error
    let response = server.get("/average_salary/Marketing").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"], 0.0);

    // Unknown department is a validation error
    server.get("/average_salary/Astrology").await.assert_status_bad_request();
}

#[sqlx::test]
#[test_log::test]
async fn test_pagination_walk_has_no_overlap_or_gap(pool: SqlitePool) {
    let server = create_test_server(pool);

    for i in 0..25 {
        create_employee(&server, &format!("E{i:02}"), "Sales", 1_000.0 + i as f64, "2020-01-01T00:00:00").await;
    }

    // Walk the pages via next_url
    let mut seen = Vec::new();
    let mut url = "/employees/?page=1".to_string();
    let mut pages = 0;
    loop {
        let body = server.get(&url).await.json::<Value>();
        let pagination = &body["pagination"];
        assert_eq!(pagination["per_page"], 10);
        assert_eq!(pagination["total_pages"], 3);
        assert_eq!(pagination["total_items"], 25);
        assert_eq!(pagination["current_url"].as_str().unwrap(), url);

        for item in body["data"].as_array().unwrap() {
            seen.push(item["id"].as_str().unwrap().to_string());
        }

        pages += 1;
        match pagination["next_url"].as_str() {
            Some(next) => url = next.to_string(),
            None => break,
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen.len(), 25);
    let unique: std::collections::HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), 25, "pages must not overlap");

    // Beyond the last page is a hard 404, not a silently empty page
    server.get("/employees/?page=4").await.assert_status_not_found();
    // Page 0 is malformed
    server.get("/employees/?page=0").await.assert_status_bad_request();
}

#[sqlx::test]
#[test_log::test]
async fn test_first_page_of_empty_collection(pool: SqlitePool) {
    let server = create_test_server(pool);

    let body = server.get("/employees/").await.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total_pages"], 0);
    assert_eq!(body["pagination"]["prev_url"], Value::Null);
    assert_eq!(body["pagination"]["next_url"], Value::Null);
}

#[sqlx::test]
#[test_log::test]
async fn test_departments_reflect_stored_data(pool: SqlitePool) {
    let server = create_test_server(pool);

    create_employee(&server, "A", "Sales", 1.0, "2020-01-01T00:00:00").await;
    create_employee(&server, "B", "Sales", 2.0, "2020-01-01T00:00:00").await;
    create_employee(&server, "C", "Engineering", 3.0, "2020-01-01T00:00:00").await;

    let body = server.get("/departments/").await.json::<Value>();
    let names: Vec<&str> = body["data"].as_array().unwrap().iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Engineering", "Sales"]);

    // Department roster is filtered and paginated
    let body = server.get("/departments/Sales").await.json::<Value>();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total_items"], 2);

    // Valid-but-unused department: empty page, not an error
    let body = server.get("/departments/Marketing").await.json::<Value>();
    assert_eq!(body["pagination"]["total_items"], 0);

    // Outside the fixed enumeration: validation error
    server.get("/departments/Astrology").await.assert_status_bad_request();
}

#[sqlx::test]
#[test_log::test]
async fn test_top_earners_sorted_and_capped(pool: SqlitePool) {
    // Test config caps rankings at 3
    let server = create_test_server(pool);

    for salary in [10.0, 50.0, 30.0, 40.0, 20.0] {
        create_employee(&server, "E", "Sales", salary, "2020-01-01T00:00:00").await;
    }

    let body = server.get("/top_earners/").await.json::<Value>();
    let salaries: Vec<f64> = body["data"].as_array().unwrap().iter().map(|e| e["salary"].as_f64().unwrap()).collect();
    assert_eq!(salaries, vec![50.0, 40.0, 30.0]);
    // Pagination applies to the bounded set, not the full table
    assert_eq!(body["pagination"]["total_items"], 3);
}

#[sqlx::test]
#[test_log::test]
async fn test_most_recent_hires(pool: SqlitePool) {
    let server = create_test_server(pool);

    for year in [2015, 2022, 2019, 2024] {
        create_employee(&server, &format!("Y{year}"), "Sales", 1.0, &format!("{year}-03-01T00:00:00")).await;
    }

    let body = server.get("/most_recent_hires/").await.json::<Value>();
    let names: Vec<&str> = body["data"].as_array().unwrap().iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Y2024", "Y2022", "Y2019"]);
}

#[sqlx::test]
#[test_log::test]
async fn test_predict_salary(pool: SqlitePool) {
    let server = create_test_server_with_estimator(pool);

    let response = server
        .post("/predict_salary/")
        .json(&json!({"department": "Sales", "hire_date": "2023-01-01T00:00:00"}))
        .await;
    response.assert_status_ok();

    let prediction = response.json::<Value>()["data"].as_f64().expect("prediction is a float");
    assert!(prediction.is_finite());

    // Unknown department is a client error
    let response = server
        .post("/predict_salary/")
        .json(&json!({"department": "Astrology", "hire_date": "2023-01-01T00:00:00"}))
        .await;
    response.assert_status_bad_request();
}

#[sqlx::test]
#[test_log::test]
async fn test_predict_salary_without_model_is_unavailable(pool: SqlitePool) {
    // No artifact loaded: prediction is down, CRUD still serves
    let server = create_test_server(pool);

    let response = server
        .post("/predict_salary/")
        .json(&json!({"department": "Sales", "hire_date": "2023-01-01T00:00:00"}))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    create_employee(&server, "A", "Sales", 1.0, "2020-01-01T00:00:00").await;
}

#[sqlx::test]
#[test_log::test]
async fn test_team_and_member_lifecycle(pool: SqlitePool) {
    let server = create_test_server(pool);

    // Create a team
    let response = server.post("/teams/").json(&json!({"name": "Platform"})).await;
    response.assert_status(StatusCode::CREATED);
    let team = response.json::<Value>();
    let team_id = team["id"].as_str().unwrap().to_string();

    // Create a member on the team, and one unattached
    let response = server.post("/members/").json(&json!({"name": "Grace", "team_id": team_id})).await;
    response.assert_status(StatusCode::CREATED);
    let member_id = response.json::<Value>()["id"].as_str().unwrap().to_string();
    server.post("/members/").json(&json!({"name": "Solo"})).await.assert_status(StatusCode::CREATED);

    // Filter members by team
    let body = server.get(&format!("/members/?team_id={team_id}")).await.json::<Value>();
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["data"][0]["name"], "Grace");

    // Filter teams by member
    let body = server.get(&format!("/teams/?member_id={member_id}")).await.json::<Value>();
    assert_eq!(body["data"][0]["id"].as_str().unwrap(), team_id);

    // Replace with team_id omitted detaches the member
    let response = server.put(&format!("/members/{member_id}")).json(&json!({"name": "Grace"})).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["team_id"], Value::Null);

    // Delete the team; the member survives detached
    server.delete(&format!("/teams/{team_id}")).await.assert_status(StatusCode::NO_CONTENT);
    server.get(&format!("/teams/{team_id}")).await.assert_status_not_found();
    server.get(&format!("/members/{member_id}")).await.assert_status_ok();
}

#[sqlx::test]
#[test_log::test]
async fn test_member_with_unknown_team_is_rejected(pool: SqlitePool) {
    let server = create_test_server(pool);

    let response = server
        .post("/members/")
        .json(&json!({"name": "Orphan", "team_id": uuid::Uuid::new_v4()}))
        .await;
    response.assert_status_bad_request();
}

#[sqlx::test]
#[test_log::test]
async fn test_middleware_stack_applies_cors(pool: SqlitePool) {
    let server = create_test_server(pool);

    // A cross-origin request passes through the layer stack and comes back
    // with permissive CORS headers attached
    let response = server
        .get("/employees/")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}

#[sqlx::test]
#[test_log::test]
async fn test_openapi_spec_is_served(pool: SqlitePool) {
    let server = create_test_server(pool);

    let response = server.get("/api-spec.json").await;
    response.assert_status_ok();
    let spec = response.json::<Value>();
    assert!(spec["paths"]["/employees/"].is_object());
}
