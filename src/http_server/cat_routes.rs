//! Cat HTTP Routes
//!
//! CRUD and query endpoints for the Cat resource. Path and query values are
//! taken as raw strings and parsed here, so malformed input produces the
//! same plain-text `Invalid value` message as a domain violation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use crate::dto::{to_dtos, CatDto};
use crate::entity::Cat;
use crate::service::{CatService, ServiceError};

// ==================
// Shared State
// ==================

/// Cat state shared across handlers
pub struct CatState {
    pub service: CatService,
}

impl CatState {
    pub fn new(service: CatService) -> Self {
        Self { service }
    }
}

// ==================
// Request Types
// ==================

/// Query string of `GET /cat/`
#[derive(Debug, Default, Deserialize)]
pub struct TopQuery {
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default, rename = "fieldName")]
    pub field_name: Option<String>,
}

/// Query string carrying only a field name
#[derive(Debug, Default, Deserialize)]
pub struct FieldQuery {
    #[serde(default, rename = "fieldName")]
    pub field_name: Option<String>,
}

// ==================
// Cat Routes
// ==================

/// Create cat routes
pub fn cat_routes(state: Arc<CatState>) -> Router {
    Router::new()
        .route("/cat", get(list_cats_handler))
        .route("/cat/", get(list_cats_handler))
        .route("/cat/create", post(create_cat_handler))
        .route("/cat/update/:id", put(update_cat_handler))
        .route("/cat/delete/:id", delete(delete_cat_handler))
        .route("/cat/top3", get(top_three_handler))
        .route("/cat/youngest", get(youngest_handler))
        .route("/cat/total", get(total_handler))
        .route("/cat/:id", get(get_cat_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::invalid_value("id", raw))
}

fn parse_top(raw: &str) -> Result<i64, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::invalid_value("top", raw))
}

fn require_field(field_name: Option<String>) -> Result<String, ServiceError> {
    field_name.ok_or_else(|| ServiceError::invalid_value("fieldName", ""))
}

fn read_body(payload: Result<Json<CatDto>, JsonRejection>) -> ApiResult<Cat> {
    let Json(dto) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    Ok(Cat::from(dto))
}

// ==================
// CRUD Handlers
// ==================

async fn create_cat_handler(
    State(state): State<Arc<CatState>>,
    payload: Result<Json<CatDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CatDto>)> {
    let cat = read_body(payload)?;
    let created = state.service.create(cat)?;
    Ok((StatusCode::CREATED, Json(CatDto::from(created))))
}

async fn update_cat_handler(
    State(state): State<Arc<CatState>>,
    Path(id): Path<String>,
    payload: Result<Json<CatDto>, JsonRejection>,
) -> ApiResult<Json<CatDto>> {
    let id = parse_id(&id)?;
    let cat = read_body(payload)?;
    let updated = state.service.update_by_id(id, cat)?;
    Ok(Json(CatDto::from(updated)))
}

async fn get_cat_handler(
    State(state): State<Arc<CatState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CatDto>> {
    let id = parse_id(&id)?;
    let cat = state
        .service
        .find_by_id(id)?
        .ok_or(ServiceError::CatNotFound(id))?;
    Ok(Json(CatDto::from(cat)))
}

async fn delete_cat_handler(
    State(state): State<Arc<CatState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete_by_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Query Handlers
// ==================

/// `GET /cat` lists everything; with `top` and `fieldName` it runs the
/// top-by-field query. `top` is parsed before the field name is looked at.
async fn list_cats_handler(
    State(state): State<Arc<CatState>>,
    Query(query): Query<TopQuery>,
) -> ApiResult<Json<Vec<CatDto>>> {
    let cats = match (query.top, query.field_name) {
        (None, None) => state.service.find_all()?,
        (Some(top), field_name) => {
            let top = parse_top(&top)?;
            let field_name = require_field(field_name)?;
            state.service.find_top_by_field(top, &field_name)?
        }
        (None, Some(_)) => return Err(ServiceError::invalid_value("top", "").into()),
    };
    Ok(Json(to_dtos(cats)))
}

async fn top_three_handler(
    State(state): State<Arc<CatState>>,
    Query(query): Query<FieldQuery>,
) -> ApiResult<Json<Vec<CatDto>>> {
    let field_name = require_field(query.field_name)?;
    let cats = state.service.find_top_three(&field_name)?;
    Ok(Json(to_dtos(cats)))
}

async fn youngest_handler(State(state): State<Arc<CatState>>) -> ApiResult<Json<CatDto>> {
    let cat = state.service.find_first_by_age()?;
    Ok(Json(CatDto::from(cat)))
}

async fn total_handler(
    State(state): State<Arc<CatState>>,
    Query(query): Query<FieldQuery>,
) -> ApiResult<Json<i64>> {
    let field_name = require_field(query.field_name)?;
    let total = state.service.find_total_by(&field_name)?;
    Ok(Json(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1001").unwrap(), 1001);
        assert_eq!(parse_id("-1").unwrap(), -1);
        assert_eq!(
            parse_id("*").unwrap_err().to_string(),
            "Invalid value \"*\" for parameter \"id\""
        );
    }

    #[test]
    fn test_parse_top() {
        assert_eq!(parse_top("-2").unwrap(), -2);
        assert_eq!(
            parse_top("two").unwrap_err().to_string(),
            "Invalid value \"two\" for parameter \"top\""
        );
    }

    #[test]
    fn test_missing_field_name() {
        assert_eq!(
            require_field(None).unwrap_err().to_string(),
            "Invalid value \"\" for parameter \"fieldName\""
        );
        assert_eq!(require_field(Some("age".to_string())).unwrap(), "age");
    }
}
