// HTTP request handlers
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use around_shared::{GeoQuery, Location, Post};
use tracing::{info, instrument, warn};

use crate::errors::ApiError;
use crate::filter::retain_clean;
use crate::server::state::AppState;

/// Raw `/search` query parameters.
///
/// Kept as strings so malformed coordinates can be defaulted instead of
/// rejecting the whole request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub range: Option<String>,
}

impl SearchParams {
    /// Pick the parameters out of decoded query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                "range" => &mut params.range,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Ingest endpoint - decodes a post, stores it under a fresh id and echoes
/// the message text back.
///
/// The body is decoded as JSON whatever the declared content type.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn post_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let post: Post = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid post payload: {}", e)))?;

    info!(user = %post.author, "Received one post request");

    let message = post.text.clone();
    let id = state.store.publish(post).await?;

    info!(id = %id, "Post is saved to index");
    Ok((StatusCode::OK, format!("Post received: {}\n", message)))
}

/// Search endpoint - returns the posts within `range` km of (`lat`, `lon`),
/// minus any that fail the content filter.
#[instrument(skip_all)]
pub async fn search_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let params = SearchParams::from_pairs(pairs);
    let lat = parse_coordinate("lat", params.lat.as_deref());
    let lon = parse_coordinate("lon", params.lon.as_deref());
    let distance_km = parse_range(params.range.as_deref(), state.default_distance_km)?;

    let query = GeoQuery::new(Location::new(lat, lon), distance_km);
    info!(lat, lon, distance = %query.distance(), "Search received");

    let outcome = state.store.nearby(&query).await?;
    info!(
        took_ms = outcome.took_ms,
        total = outcome.total,
        "Found a total of {} posts",
        outcome.total
    );

    let found = outcome.len();
    let posts = retain_clean(outcome.posts);
    if posts.len() < found {
        info!(dropped = found - posts.len(), "Filtered posts from search results");
    }

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(posts),
    ))
}

/// Parse a coordinate parameter, defaulting to `0.0` when it is absent or
/// not a finite number.
pub fn parse_coordinate(name: &str, raw: Option<&str>) -> f64 {
    match raw.map(|s| s.trim().parse::<f64>()) {
        Some(Ok(value)) if value.is_finite() => value,
        Some(_) => {
            warn!(param = name, value = ?raw, "Malformed coordinate, defaulting to 0");
            0.0
        }
        None => {
            warn!(param = name, "Missing coordinate, defaulting to 0");
            0.0
        }
    }
}

/// Parse the optional `range` parameter, a bare number of kilometres.
///
/// An absent or empty value yields `default_km`; anything else must be a
/// finite, non-negative number.
pub fn parse_range(raw: Option<&str>, default_km: f64) -> Result<f64, ApiError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default_km),
        Some(raw) => raw,
    };

    let value = raw
        .parse::<f64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid range '{}'", raw)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::bad_request(format!(
            "range must be a non-negative number of kilometres, got '{}'",
            raw
        )));
    }

    Ok(value)
}
