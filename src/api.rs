// Street Cats - REST API with Axum
// Translates HTTP requests into CatRegistry calls and results back into HTTP.

use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Path, Query, Request, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cats::{CatRecord, CatRegistry, NewCat};
use crate::config::ServerConfig;
use crate::error::RegistryError;

/// OpenAPI 3.0.3 description of the routes below
pub const OPENAPI_DOCUMENT: &str = include_str!("../openapi.json");

/// Shared application state
///
/// One lock guards the whole registry, so each core call (including the
/// max-id read and append of a create) runs as a single critical section.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Mutex<CatRegistry>>,
}

impl AppState {
    pub fn new(registry: CatRegistry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    /// Every registry operation is a single step, so a poisoned lock
    /// still holds a consistent registry.
    pub fn registry(&self) -> MutexGuard<'_, CatRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CatRegistry::new())
    }
}

// ============================================================================
// Request / Response bodies
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    detailed: bool,
}

/// PUT body; a missing description means the empty string
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCat {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request body decoded from JSON, or from an HTML form when the
/// content type is `application/x-www-form-urlencoded`
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[derive(Debug, thiserror::Error)]
pub enum BodyRejection {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Json(rejection) => rejection.into_response(),
            BodyRejection::Form(rejection) => rejection.into_response(),
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(JsonOrForm(value))
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Registry(RegistryError),
    /// Path id that is not a positive integer; never matches a cat
    InvalidId,
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Registry(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Registry(err @ RegistryError::Validation) => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: err.to_string(),
                }),
            )
                .into_response(),
            ApiError::Registry(RegistryError::NotFound { .. }) | ApiError::InvalidId => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Cat not found".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            tracing::debug!(raw, "path id is not a positive integer");
            Err(ApiError::InvalidId)
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /cats - names of all cats, or full records with ?detailed=true
async fn list_cats(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let registry = state.registry();

    if params.detailed {
        Json(registry.list_detailed()).into_response()
    } else {
        Json(registry.list_names()).into_response()
    }
}

/// GET /cats/:id and GET /cat/:id
async fn get_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatRecord>, ApiError> {
    let id = parse_id(&id)?;
    let cat = state.registry().get(id)?;
    Ok(Json(cat))
}

/// POST /cats
///
/// Accepts JSON or form bodies. A body that is neither, or not the right
/// shape, carries no usable fields and fails validation like an empty one.
async fn create_cat(
    State(state): State<AppState>,
    payload: Result<JsonOrForm<NewCat>, BodyRejection>,
) -> Result<(StatusCode, Json<CatRecord>), ApiError> {
    let new_cat = match payload {
        Ok(JsonOrForm(new_cat)) => new_cat,
        Err(rejection) => {
            tracing::debug!(%rejection, "unusable create body");
            NewCat::default()
        }
    };

    let cat = state.registry().create(new_cat)?;
    Ok((StatusCode::CREATED, Json(cat)))
}

/// PUT /cats/:id - replaces the description only
///
/// An unusable body counts as one without a description; the id alone
/// decides between 200 and 404.
async fn update_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<JsonOrForm<UpdateCat>, BodyRejection>,
) -> Result<Json<CatRecord>, ApiError> {
    let id = parse_id(&id)?;
    let body = match payload {
        Ok(JsonOrForm(body)) => body,
        Err(rejection) => {
            tracing::debug!(%rejection, "unusable update body");
            UpdateCat::default()
        }
    };

    let cat = state.registry().update(id, body.description)?;
    Ok(Json(cat))
}

/// DELETE /cats/:id - always reports success
async fn delete_cat(State(state): State<AppState>, Path(id): Path<String>) -> Json<MessageResponse> {
    if let Ok(id) = parse_id(&id) {
        let deleted = state.registry().delete(id);
        tracing::debug!(id, removed = deleted.removed, "delete handled");
    }

    Json(MessageResponse {
        message: "Cat deleted".to_string(),
    })
}

/// GET /api-docs/openapi.json
async fn openapi_document() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], OPENAPI_DOCUMENT)
}

// ============================================================================
// Router
// ============================================================================

/// Build the application: API routes, docs, then static files for anything else
pub fn router(state: AppState, static_dir: impl AsRef<std::path::Path>) -> Router {
    let api_routes = Router::new()
        .route("/cats", get(list_cats).post(create_cat))
        .route("/cats/:id", get(get_cat).put(update_cat).delete(delete_cat))
        .route("/cat/:id", get(get_cat))
        .route("/api-docs/openapi.json", get(openapi_document))
        .with_state(state);

    api_routes
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Application with a freshly seeded registry
pub fn app(config: &ServerConfig) -> Router {
    router(AppState::default(), &config.static_dir)
}

// ============================================================================
// TESTS
// ============================================================================
