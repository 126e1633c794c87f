//! Request handlers for the API endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ProfileResponse, SeriesQuery, SeriesRecord, StatsRecord};

/// Returns the profile overview.
///
/// `GET /profile` → 200 + `ProfileResponse` JSON
pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<ProfileResponse> {
    let p = &state.config.profile;
    let table = &state.profile.table;

    Json(ProfileResponse {
        date: p.date.clone(),
        start_hour: p.start_hour,
        end_hour: p.end_hour,
        interval: p.interval.clone(),
        seed: p.seed,
        rows: table.len(),
        series: table.names().map(str::to_string).collect(),
        stats: StatsRecord::from(&state.profile.stats),
    })
}

/// Returns load records, optionally filtered by row range.
///
/// `GET /series` → 200 + `Vec<SeriesRecord>` JSON
/// `GET /series?from=N&to=M` → filtered range (inclusive)
/// `GET /series?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeriesQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let table = &state.profile.table;
    let records: Vec<SeriesRecord> = table
        .index()
        .timestamps()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i >= from && *i <= to)
        .map(|(i, ts)| {
            let loads: BTreeMap<String, f32> = table
                .iter()
                .map(|(name, values)| (name.to_string(), values[i]))
                .collect();
            SeriesRecord {
                row: i,
                timestamp: ts.format("%Y-%m-%d %H:%M").to_string(),
                loads,
            }
        })
        .collect();

    Ok(Json(records))
}
