//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use omega_domain::{DomainError, UniqueDinosaurId, Variant, VariantGroup, VariantGroupId, VariantId};

use super::dto::{ErrorBody, UniqueBody, UniqueView, VariantBody, VariantGroupBody};
use crate::app::App;
use crate::use_cases::{UniqueError, VariantError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        // Unique creatures
        .route("/api/v1/uniques", get(list_uniques))
        .route("/api/v1/uniques/new", post(create_unique))
        .route(
            "/api/v1/uniques/{id}",
            get(get_unique).put(update_unique).delete(delete_unique),
        )
        // Variant catalog
        .route("/api/v1/variants", get(list_variants))
        .route("/api/v1/variants/new", post(create_variant))
        .route(
            "/api/v1/variants/{id}",
            get(get_variant).put(update_variant).delete(delete_variant),
        )
        .route("/api/v1/variant-groups", get(list_groups))
        .route("/api/v1/variant-groups/new", post(create_group))
        .route(
            "/api/v1/variant-groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
}

async fn health() -> &'static str {
    "I'm fine!"
}

// =============================================================================
// Unique creatures
// =============================================================================

async fn list_uniques(State(app): State<Arc<App>>) -> Result<Json<Vec<UniqueView>>, ApiError> {
    let uniques = app.use_cases.unique.list().await?;
    Ok(Json(uniques.iter().map(UniqueView::from).collect()))
}

async fn get_unique(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<Json<UniqueView>, ApiError> {
    let unique = app
        .use_cases
        .unique
        .find(UniqueDinosaurId::from_i32(id))
        .await?;
    Ok(Json(UniqueView::from(&unique)))
}

async fn create_unique(
    State(app): State<Arc<App>>,
    Json(body): Json<UniqueBody>,
) -> Result<(StatusCode, Json<UniqueView>), ApiError> {
    let created = app.use_cases.unique.create(body.into_create()?).await?;
    Ok((StatusCode::CREATED, Json(UniqueView::from(&created))))
}

async fn update_unique(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
    Json(body): Json<UniqueBody>,
) -> Result<Json<UniqueView>, ApiError> {
    let input = body.into_update(UniqueDinosaurId::from_i32(id))?;
    let updated = app.use_cases.unique.update(input).await?;
    Ok(Json(UniqueView::from(&updated)))
}

async fn delete_unique(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .unique
        .delete(UniqueDinosaurId::from_i32(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Variants
// =============================================================================

async fn list_variants(State(app): State<Arc<App>>) -> Result<Json<Vec<Variant>>, ApiError> {
    Ok(Json(app.use_cases.variant.variant.list().await?))
}

async fn get_variant(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<Json<Variant>, ApiError> {
    let variant = app
        .use_cases
        .variant
        .variant
        .find(VariantId::from_i32(id))
        .await?;
    Ok(Json(variant))
}

async fn create_variant(
    State(app): State<Arc<App>>,
    Json(body): Json<VariantBody>,
) -> Result<(StatusCode, Json<Variant>), ApiError> {
    let group_id = VariantGroupId::from_i32(body.group_id);
    let variant = app
        .use_cases
        .variant
        .variant
        .create(group_id, body.into_name()?)
        .await?;
    Ok((StatusCode::CREATED, Json(variant)))
}

async fn update_variant(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
    Json(body): Json<VariantBody>,
) -> Result<Json<Variant>, ApiError> {
    let group_id = VariantGroupId::from_i32(body.group_id);
    let variant = app
        .use_cases
        .variant
        .variant
        .update(VariantId::from_i32(id), group_id, body.into_name()?)
        .await?;
    Ok(Json(variant))
}

async fn delete_variant(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .variant
        .variant
        .delete(VariantId::from_i32(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Variant groups
// =============================================================================

async fn list_groups(State(app): State<Arc<App>>) -> Result<Json<Vec<VariantGroup>>, ApiError> {
    Ok(Json(app.use_cases.variant.group.list().await?))
}

async fn get_group(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<Json<VariantGroup>, ApiError> {
    let group = app
        .use_cases
        .variant
        .group
        .find(VariantGroupId::from_i32(id))
        .await?;
    Ok(Json(group))
}

async fn create_group(
    State(app): State<Arc<App>>,
    Json(body): Json<VariantGroupBody>,
) -> Result<(StatusCode, Json<VariantGroup>), ApiError> {
    let group = app.use_cases.variant.group.create(body.into_name()?).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

async fn update_group(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
    Json(body): Json<VariantGroupBody>,
) -> Result<Json<VariantGroup>, ApiError> {
    let group = app
        .use_cases
        .variant
        .group
        .update(VariantGroupId::from_i32(id), body.into_name()?)
        .await?;
    Ok(Json(group))
}

async fn delete_group(
    State(app): State<Arc<App>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .variant
        .group
        .delete(VariantGroupId::from_i32(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<UniqueError> for ApiError {
    fn from(e: UniqueError) -> Self {
        match e {
            UniqueError::NotFound(_) => ApiError::NotFound,
            UniqueError::Internal(_) | UniqueError::Repo(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<VariantError> for ApiError {
    fn from(e: VariantError) -> Self {
        match e {
            VariantError::NotFound { .. } => ApiError::NotFound,
            VariantError::Internal(_) | VariantError::Repo(_) => ApiError::Internal(e.to_string()),
        }
    }
}
