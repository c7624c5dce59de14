//! `/employees` REST surface.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use platform_api::{ApiError, ApiResult};
use platform_db::PageRequest;
use products_hr::{EmployeeDto, validate_employee};
use serde::Deserialize;

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<i64>,
    size: Option<i64>,
}

async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EmployeeDto>>> {
    let Query(query) = query.map_err(|err| ApiError::bad_request(err.body_text()))?;
    let page = PageRequest::new(query.page, query.size, state.config.default_page_size);
    let employees = state.employees.list(page).await?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EmployeeDto>> {
    let id = path_id(id)?;
    Ok(Json(state.employees.get_by_id(id).await?))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeDto>)> {
    let input = valid_body(payload)?;
    let created = state.employees.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeDto>, JsonRejection>,
) -> ApiResult<Json<EmployeeDto>> {
    let id = path_id(id)?;
    let input = valid_body(payload)?;
    Ok(Json(state.employees.update(id, input).await?))
}

async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = path_id(id)?;
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn path_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    let Path(id) = id.map_err(|err| ApiError::bad_request(err.body_text()))?;
    Ok(id)
}

fn valid_body(payload: Result<Json<EmployeeDto>, JsonRejection>) -> ApiResult<EmployeeDto> {
    let Json(dto) = payload.map_err(|err| ApiError::bad_request(err.body_text()))?;
    validate_employee(&dto).map_err(ApiError::Validation)?;
    Ok(dto)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use migration::{Migrator, MigratorTrait};
    use platform_db::EmployeeRepository;
    use products_hr::EmployeeService;
    use sea_orm::Database;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        http::{AppState, build_router},
    };

    async fn test_app() -> (Router, EmployeeRepository) {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&conn, None).await.unwrap();
        let repo = EmployeeRepository::new(conn.clone());
        let state = AppState {
            pool: conn,
            employees: EmployeeService::new(repo.clone()),
            config: Arc::new(AppConfig::default()),
        };
        (build_router(state), repo)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ana() -> Value {
        json!({
            "firstName": "Ana",
            "lastName": "Petrova",
            "email": "ana.petrova@example.com"
        })
    }

    #[tokio::test]
    async fn create_get_delete_lifecycle() {
        let (app, _) = test_app().await;

        let resp = send(&app, "POST", "/employees", Some(ana())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = json_body(resp).await;
        let id = created["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(created["active"], true);

        let resp = send(&app, "GET", &format!("/employees/{id}"), None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched = json_body(resp).await;
        assert_eq!(fetched["firstName"], "Ana");
        assert_eq!(fetched["lastName"], "Petrova");
        assert_eq!(fetched["email"], "ana.petrova@example.com");
        assert!(fetched.get("createdAt").is_none());

        let resp = send(&app, "DELETE", &format!("/employees/{id}"), None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(&app, "GET", &format!("/employees/{id}"), None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(resp).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let (app, repo) = test_app().await;
        let resp = send(&app, "POST", "/employees", Some(ana())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = send(&app, "POST", "/employees", Some(ana())).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = json_body(resp).await;
        assert_eq!(body["code"], "CONFLICT");
        assert_eq!(body["message"], "Employee already exists with the given email");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_discards_body_id() {
        let (app, _) = test_app().await;
        let mut body = ana();
        body["id"] = json!(4242);
        let resp = send(&app, "POST", "/employees", Some(body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_ne!(json_body(resp).await["id"], 4242);
    }

    #[tokio::test]
    async fn update_missing_employee_is_not_found() {
        let (app, repo) = test_app().await;
        let resp = send(&app, "PUT", "/employees/999", Some(ana())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_overrides_body_id() {
        let (app, _) = test_app().await;
        let created = json_body(send(&app, "POST", "/employees", Some(ana())).await).await;
        let id = created["id"].as_i64().unwrap();

        let resp = send(
            &app,
            "PUT",
            &format!("/employees/{id}"),
            Some(json!({
                "id": id + 7,
                "firstName": "Anna",
                "lastName": "Petrova",
                "email": "anna.petrova@example.com",
                "active": false
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = json_body(resp).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["firstName"], "Anna");
        assert_eq!(updated["active"], false);
    }

    #[tokio::test]
    async fn validation_failures_list_fields() {
        let (app, repo) = test_app().await;
        let resp = send(
            &app,
            "POST",
            "/employees",
            Some(json!({
                "firstName": " ",
                "lastName": "x".repeat(101),
                "email": "nope"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["code"], "VALIDATION");
        let fields: Vec<&str> = body["violations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["firstName", "lastName", "email"]);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_input_is_bad_request() {
        let (app, _) = test_app().await;

        let resp = send(&app, "GET", "/employees/abc", None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["code"], "BAD_REQUEST");

        let request = Request::builder()
            .method("POST")
            .uri("/employees")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.clone().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_is_paged() {
        let (app, _) = test_app().await;
        for i in 0..3 {
            let body = json!({
                "firstName": "E",
                "lastName": format!("Worker{i}"),
                "email": format!("w{i}@example.com")
            });
            let resp = send(&app, "POST", "/employees", Some(body)).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let resp = send(&app, "GET", "/employees", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await.as_array().unwrap().len(), 3);

        let resp = send(&app, "GET", "/employees?page=1&size=2", None).await;
        let page = json_body(resp).await;
        let page = page.as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["email"], "w2@example.com");
    }

    #[tokio::test]
    async fn huge_page_returns_empty_list() {
        let (app, _) = test_app().await;
        let resp = send(&app, "POST", "/employees", Some(ana())).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = send(
            &app,
            "GET",
            "/employees?page=9223372036854775807&size=2000",
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, json!([]));
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (app, _) = test_app().await;
        let resp = send(&app, "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
        let body = json_body(resp).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["dbOk"], true);
    }
}
