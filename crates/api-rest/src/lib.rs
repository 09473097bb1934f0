//! # API REST
//!
//! REST API implementation for CleanLabel.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for request/response types.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AdditiveRisk, AnalyzeLabelRes, Condition, ConditionConcern, CreateProfileReq,
    DeleteProfileRes, HarmfulRes, HealthRes, HealthService, HighlightRes, Ingredient,
    IngredientAnalysisRes, IngredientsRes, LabelTextReq, ListConditionsRes, ListProfilesRes,
    Match, NeurotoxinInfoRes, NutritionReq, NutritionRes, Profile, ScanRes, TextSpan,
    UpdateProfileReq,
};
use cleanlabel_core::{
    analyze_harmful_ingredients, analyze_nutrition, conditions, neurotoxin_info,
    ConditionCategory, CoreConfig, HealthProfile, LabelError, LabelResult, LabelService,
    ProfileId, ProfileStore,
};

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LabelService>,
    pub store: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn new(service: LabelService, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            service: Arc::new(service),
            store,
        }
    }

    /// Build state from startup configuration: resolve the taxonomy and open the JSON store.
    pub fn from_config(cfg: &CoreConfig) -> LabelResult<Self> {
        let service = LabelService::new(cfg.resolve_taxonomy()?);
        let store = cfg.open_profile_store()?;
        Ok(Self::new(service, Arc::new(store)))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        analyze_label,
        highlight_label,
        harmful_ingredients,
        extract_ingredients,
        nutrition,
        list_conditions,
        get_neurotoxin,
        list_profiles,
        create_profile,
        get_profile,
        update_profile,
        delete_profile,
        scan_with_profile,
    ),
    components(schemas(
        HealthRes,
        LabelTextReq,
        Ingredient,
        IngredientsRes,
        AdditiveRisk,
        IngredientAnalysisRes,
        Match,
        TextSpan,
        HighlightRes,
        HarmfulRes,
        AnalyzeLabelRes,
        NutritionReq,
        NutritionRes,
        Condition,
        ListConditionsRes,
        NeurotoxinInfoRes,
        Profile,
        CreateProfileReq,
        UpdateProfileReq,
        ListProfilesRes,
        DeleteProfileRes,
        ConditionConcern,
        ScanRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/labels/analyze", post(analyze_label))
        .route("/labels/highlight", post(highlight_label))
        .route("/labels/harmful", post(harmful_ingredients))
        .route("/labels/ingredients", post(extract_ingredients))
        .route("/nutrition", post(nutrition))
        .route("/conditions", get(list_conditions))
        .route("/neurotoxins/:name", get(get_neurotoxin))
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/profiles/:id/scan", post(scan_with_profile))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process stops.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

type ApiError = (StatusCode, &'static str);

/// Log the full error and map it to a status with a short public message.
fn map_error(context: &str, e: LabelError) -> ApiError {
    tracing::error!("{} error: {:?}", context, e);
    match e {
        LabelError::InvalidInput(_) | LabelError::Text(_) => {
            (StatusCode::BAD_REQUEST, "Invalid input")
        }
        LabelError::ProfileNotFound(_) => (StatusCode::NOT_FOUND, "Profile not found"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
    }
}

fn parse_profile_id(id: &str) -> Result<ProfileId, ApiError> {
    ProfileId::parse(id).map_err(|e| {
        tracing::error!("Invalid profile id: {:?}", e);
        (StatusCode::BAD_REQUEST, "Invalid profile id")
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used for monitoring and load balancer checks.
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/labels/analyze",
    request_body = LabelTextReq,
    responses(
        (status = 200, description = "Full label report", body = AnalyzeLabelRes)
    )
)]
/// Analyse a label: ingredients, taxonomy findings, highlights and the harmful-list scan.
async fn analyze_label(
    State(state): State<AppState>,
    Json(req): Json<LabelTextReq>,
) -> Json<AnalyzeLabelRes> {
    Json((&state.service.analyze_label(&req.text)).into())
}

#[utoipa::path(
    post,
    path = "/labels/highlight",
    request_body = LabelTextReq,
    responses(
        (status = 200, description = "Substance matches and highlight spans", body = HighlightRes)
    )
)]
async fn highlight_label(
    State(state): State<AppState>,
    Json(req): Json<LabelTextReq>,
) -> Json<HighlightRes> {
    let matches = state.service.matches(&req.text);
    let annotated = cleanlabel_core::highlight_text(&req.text, &matches);
    Json(HighlightRes::new(&matches, &annotated))
}

#[utoipa::path(
    post,
    path = "/labels/harmful",
    request_body = LabelTextReq,
    responses(
        (status = 200, description = "Harmful-ingredient scan", body = HarmfulRes)
    )
)]
async fn harmful_ingredients(Json(req): Json<LabelTextReq>) -> Json<HarmfulRes> {
    Json((&analyze_harmful_ingredients(&req.text)).into())
}

#[utoipa::path(
    post,
    path = "/labels/ingredients",
    request_body = LabelTextReq,
    responses(
        (status = 200, description = "Parsed ingredient list", body = IngredientsRes)
    )
)]
async fn extract_ingredients(
    State(state): State<AppState>,
    Json(req): Json<LabelTextReq>,
) -> Json<IngredientsRes> {
    Json(IngredientsRes {
        section: cleanlabel_core::extract_ingredients_section(&req.text),
        ingredients: state
            .service
            .ingredients(&req.text)
            .iter()
            .map(Into::into)
            .collect(),
    })
}

#[utoipa::path(
    post,
    path = "/nutrition",
    request_body = NutritionReq,
    responses(
        (status = 200, description = "Macro-nutrient classification", body = NutritionRes),
        (status = 400, description = "Negative or non-finite value")
    )
)]
async fn nutrition(Json(req): Json<NutritionReq>) -> Result<Json<NutritionRes>, ApiError> {
    analyze_nutrition(req.calories, req.protein, req.carbs, req.fat)
        .map(|analysis| Json((&analysis).into()))
        .map_err(|e| map_error("Nutrition", e))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConditionQuery {
    /// Case-insensitive search over condition names and category identifiers.
    pub q: Option<String>,
    /// `allergy`, `dietary`, `chronic` or `other`.
    pub category: Option<String>,
}

#[utoipa::path(
    get,
    path = "/conditions",
    params(ConditionQuery),
    responses(
        (status = 200, description = "Health conditions", body = ListConditionsRes),
        (status = 400, description = "Unknown category")
    )
)]
async fn list_conditions(
    Query(query): Query<ConditionQuery>,
) -> Result<Json<ListConditionsRes>, ApiError> {
    let category = match query.category.as_deref() {
        Some(raw) => Some(raw.parse::<ConditionCategory>().map_err(|e| {
            tracing::error!("Invalid condition category: {}", e);
            (StatusCode::BAD_REQUEST, "Unknown category")
        })?),
        None => None,
    };

    Ok(Json(ListConditionsRes {
        conditions: conditions::find(query.q.as_deref(), category)
            .iter()
            .map(Into::into)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/neurotoxins/{name}",
    params(("name" = String, Path, description = "lead, mercury, aluminum, aspartame or msg")),
    responses(
        (status = 200, description = "Neurotoxin details", body = NeurotoxinInfoRes),
        (status = 404, description = "No details for this name")
    )
)]
async fn get_neurotoxin(
    AxumPath(name): AxumPath<String>,
) -> Result<Json<NeurotoxinInfoRes>, ApiError> {
    neurotoxin_info(&name)
        .map(|info| Json(info.into()))
        .ok_or((StatusCode::NOT_FOUND, "Unknown neurotoxin"))
}

#[utoipa::path(
    get,
    path = "/profiles",
    responses(
        (status = 200, description = "Stored health profiles", body = ListProfilesRes),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_profiles(State(state): State<AppState>) -> Result<Json<ListProfilesRes>, ApiError> {
    let profiles = state
        .store
        .list_profiles()
        .map_err(|e| map_error("List profiles", e))?;
    Ok(Json(ListProfilesRes {
        profiles: profiles.iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/profiles",
    request_body = CreateProfileReq,
    responses(
        (status = 201, description = "Profile created", body = Profile),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileReq>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = HealthProfile::new(&req.name, req.age, req.conditions)
        .map_err(|e| map_error("Create profile", e))?;
    state
        .store
        .upsert(&profile)
        .map_err(|e| map_error("Create profile", e))?;
    tracing::info!(profile = %profile.id, "profile created");
    Ok((StatusCode::CREATED, Json((&profile).into())))
}

#[utoipa::path(
    get,
    path = "/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 400, description = "Invalid profile id"),
        (status = 404, description = "Profile not found")
    )
)]
async fn get_profile(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_profile_id(&id)?;
    let profile = state
        .store
        .require(&id)
        .map_err(|e| map_error("Get profile", e))?;
    Ok(Json((&profile).into()))
}

#[utoipa::path(
    put,
    path = "/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Profile not found")
    )
)]
async fn update_profile(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<UpdateProfileReq>,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_profile_id(&id)?;
    let current = state
        .store
        .require(&id)
        .map_err(|e| map_error("Update profile", e))?;
    let updated = current
        .updated(req.name.as_deref(), req.age, req.conditions)
        .map_err(|e| map_error("Update profile", e))?;
    state
        .store
        .upsert(&updated)
        .map_err(|e| map_error("Update profile", e))?;
    Ok(Json((&updated).into()))
}

#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Whether a profile was removed", body = DeleteProfileRes),
        (status = 400, description = "Invalid profile id")
    )
)]
async fn delete_profile(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<DeleteProfileRes>, ApiError> {
    let id = parse_profile_id(&id)?;
    let deleted = state
        .store
        .delete(&id)
        .map_err(|e| map_error("Delete profile", e))?;
    Ok(Json(DeleteProfileRes { deleted }))
}

#[utoipa::path(
    post,
    path = "/profiles/{id}/scan",
    params(("id" = String, Path, description = "Profile id")),
    request_body = LabelTextReq,
    responses(
        (status = 200, description = "Label report with health cross-reference", body = ScanRes),
        (status = 400, description = "Invalid profile id"),
        (status = 404, description = "Profile not found")
    )
)]
async fn scan_with_profile(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<LabelTextReq>,
) -> Result<Json<ScanRes>, ApiError> {
    let id = parse_profile_id(&id)?;
    let profile = state
        .store
        .require(&id)
        .map_err(|e| map_error("Scan", e))?;
    Ok(Json((&state.service.scan(&req.text, Some(&profile))).into()))
}
