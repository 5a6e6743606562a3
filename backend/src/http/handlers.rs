//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    FrameQuery, HealthResponse, ImpactQuery, ImpactResponse, PredictionDto, ReloadQuery,
};
use super::error::AppError;
use super::state::{AppState, LoadedPrediction};
use crate::api::{AnimationState, DerivedStatistics, Frame, GeoPoint, SeriesSummary};
use crate::models::SiteFilter;
use crate::render::{RenderOptions, SceneComposer};
use crate::services::affected_sites;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Impact radius used by `/v1/impact` when none is given: the zone of the
/// largest spread class.
pub const DEFAULT_IMPACT_RADIUS_KM: f64 = 40.0;

fn prediction_dto(loaded: &LoadedPrediction) -> PredictionDto {
    PredictionDto {
        summary: SeriesSummary::from(loaded.series.as_ref()),
        steps: loaded.series.steps().to_vec(),
        loaded_at: loaded.loaded_at,
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// prediction source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let source_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        source: source_status,
        source_kind: state.repository.describe(),
    }))
}

// =============================================================================
// Prediction
// =============================================================================

/// GET /v1/prediction
///
/// The loaded series. Fetched from the source on first call.
pub async fn get_prediction(State(state): State<AppState>) -> HandlerResult<PredictionDto> {
    let loaded = state.prediction().await;
    Ok(Json(prediction_dto(&loaded)))
}

/// POST /v1/prediction/reload
///
/// Re-fetch from the source. With `?strict=true` a provider failure is
/// reported instead of replaced by the fallback series.
pub async fn reload_prediction(
    State(state): State<AppState>,
    Query(query): Query<ReloadQuery>,
) -> HandlerResult<PredictionDto> {
    let loaded = if query.strict {
        state.reload_strict().await?
    } else {
        state.reload().await
    };
    Ok(Json(prediction_dto(&loaded)))
}

/// GET /v1/prediction/statistics
pub async fn get_statistics(State(state): State<AppState>) -> HandlerResult<DerivedStatistics> {
    let loaded = state.prediction().await;
    Ok(Json(loaded.statistics.as_ref().clone()))
}

/// GET /v1/prediction/frames/{step}
///
/// Draw commands of one animation frame. Out-of-range steps are clamped to
/// the last step.
pub async fn get_frame(
    State(state): State<AppState>,
    Path(step): Path<usize>,
    Query(query): Query<FrameQuery>,
) -> HandlerResult<Frame> {
    let filter = match (query.near.as_deref(), query.site.as_deref()) {
        (Some(slug), _) => SiteFilter::vicinity_of_slug(&state.registry, slug)
            .ok_or_else(|| AppError::NotFound(format!("Unknown coastal site '{}'", slug)))?,
        (None, Some(site)) => SiteFilter::from_selection(site),
        (None, None) => SiteFilter::All,
    };

    let loaded = state.prediction().await;
    let series = loaded.series.as_ref();
    let total_steps = series.len();
    let current_step = step.min(total_steps.saturating_sub(1));

    let mut composer = SceneComposer::new(
        state.registry.clone(),
        RenderOptions {
            seed: query.seed.or(state.render_options.seed),
            ..state.render_options
        },
    );
    let commands = if total_steps == 0 {
        Vec::new()
    } else {
        composer.compose_step(series, &filter, current_step)
    };

    Ok(Json(Frame {
        state: AnimationState {
            current_step,
            total_steps,
            is_animating: false,
        },
        commands,
    }))
}

// =============================================================================
// Impact
// =============================================================================

/// GET /v1/impact?lat=&lon=&radius_km=
///
/// Registered sites within range of an arbitrary point, nearest first.
pub async fn get_impact(
    State(state): State<AppState>,
    Query(query): Query<ImpactQuery>,
) -> HandlerResult<ImpactResponse> {
    let center = GeoPoint::new(query.lat, query.lon);
    if !center.is_valid() {
        return Err(AppError::BadRequest(format!(
            "Coordinates out of range: ({}, {})",
            query.lat, query.lon
        )));
    }

    let radius_km = query.radius_km.unwrap_or(DEFAULT_IMPACT_RADIUS_KM);
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(AppError::BadRequest(format!(
            "radius_km must be a non-negative number, got {}",
            radius_km
        )));
    }

    let sites = affected_sites(&state.registry, center, radius_km);
    Ok(Json(ImpactResponse {
        center,
        radius_km,
        open_ocean: sites.is_empty(),
        affected_sites: sites,
    }))
}
