//! Route handlers.

use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::ApiError;
use super::state::AppState;
use crate::application::{CacheStatus, Cached};
use crate::domain::{RankingKind, Timeframe};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
pub const X_HISTORY: HeaderName = HeaderName::from_static("x-history");

#[derive(Debug, Default, Deserialize)]
pub struct MarketsParams {
    pub state: Option<String>,
    pub token: Option<String>,
    pub network_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RankingParams {
    pub timeframe: Option<String>,
}

/// `Cache-Control` for a projection cached for `ttl`.
#[must_use]
pub fn cache_control(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    format!(
        "public, s-maxage={secs}, stale-while-revalidate={}",
        secs.saturating_mul(2)
    )
}

fn respond<T: Serialize>(
    body: &T,
    ttl: Duration,
    status: CacheStatus,
    complete: Option<bool>,
) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cache_control(ttl)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    headers.insert(X_CACHE, HeaderValue::from_static(status.as_str()));
    if let Some(complete) = complete {
        let history = if complete { "full" } else { "window" };
        headers.insert(X_HISTORY, HeaderValue::from_static(history));
    }
    (headers, Json(body)).into_response()
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn markets(
    State(state): State<AppState>,
    Query(params): Query<MarketsParams>,
) -> Result<Response, ApiError> {
    let Cached { value, status, .. } = state
        .analytics
        .markets(params.state, params.token, params.network_id)
        .await
        .map_err(|e| ApiError::from_error(e, "Failed to fetch markets"))?;
    let ttl = state.analytics.settings().ttls.metadata;
    Ok(respond(&value, ttl, status, None))
}

pub async fn market(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let Cached { value, status, .. } = state
        .analytics
        .market(&slug)
        .await
        .map_err(|e| ApiError::from_error(e, "Failed to fetch market"))?;
    let ttl = state.analytics.settings().ttls.metadata;
    Ok(respond(&value, ttl, status, None))
}

pub async fn activity(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let Cached { value, status, .. } = state
        .analytics
        .activity(&slug)
        .await
        .map_err(|e| ApiError::from_error(e, "Failed to fetch activity"))?;
    let ttl = state.analytics.settings().ttls.activity;
    Ok(respond(&value, ttl, status, Some(value.complete)))
}

pub async fn holders(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let Cached { value, status, .. } = state
        .analytics
        .holders(&slug)
        .await
        .map_err(|e| ApiError::from_error(e, "Failed to calculate holders"))?;
    let ttl = state.analytics.settings().ttls.holders;
    Ok(respond(&value, ttl, status, Some(value.complete)))
}

async fn ranking(
    state: AppState,
    kind: RankingKind,
    params: RankingParams,
) -> Result<Response, ApiError> {
    let timeframe = Timeframe::from_param(params.timeframe.as_deref());
    let context = match kind {
        RankingKind::Holders => "Failed to fetch holders ranking",
        RankingKind::Traders => "Failed to fetch traders ranking",
        RankingKind::Winners => "Failed to fetch winners ranking",
    };
    let Cached { value, status, .. } = state
        .analytics
        .ranking(kind, timeframe)
        .await
        .map_err(|e| ApiError::from_error(e, context))?;
    let ttl = state.analytics.settings().ttls.ranking;
    Ok(respond(&value.entries, ttl, status, Some(value.complete)))
}

pub async fn holders_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Response, ApiError> {
    ranking(state, RankingKind::Holders, params).await
}

pub async fn traders_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Response, ApiError> {
    ranking(state, RankingKind::Traders, params).await
}

pub async fn winners_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Response, ApiError> {
    ranking(state, RankingKind::Winners, params).await
}
