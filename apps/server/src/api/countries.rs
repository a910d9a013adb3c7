use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use geopulse_core::countries::{Country, CountryFilters, CountrySort, StoreStatus};

#[derive(Debug, Deserialize)]
struct ListQuery {
    region: Option<String>,
    currency: Option<String>,
    sort: Option<String>,
}

impl From<ListQuery> for CountryFilters {
    fn from(query: ListQuery) -> Self {
        CountryFilters {
            region: query.region,
            currency: query.currency,
            // Unrecognized sort values fall back to default order.
            sort: query.sort.as_deref().and_then(CountrySort::parse),
        }
    }
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Country>>> {
    let countries = state.country_service.get_countries(&query.into())?;
    Ok(Json(countries))
}

async fn get_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Country>> {
    let country = state.country_service.get_country(&name)?;
    Ok(Json(country))
}

async fn delete_country(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    state.country_service.delete_country(&name).await?;
    Ok(Json(json!({ "message": format!("Country '{}' deleted", name) })))
}

async fn refresh_countries(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let report = state.refresh_service.refresh().await?;
    Ok(Json(json!({
        "message": "Refresh completed",
        "countriesCreated": report.created,
        "countriesUpdated": report.updated,
        "countriesSkipped": report.skipped,
        "timeRefreshed": report.refreshed_at,
    })))
}

async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let StoreStatus {
        total_count,
        last_refreshed_at,
    } = state.country_service.get_status()?;
    Ok(Json(json!({
        "totalCountries": total_count,
        "lastRefreshedAt": last_refreshed_at,
    })))
}

async fn get_summary_image(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let bytes = state.summary_service.read_artifact()?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/refresh", post(refresh_countries))
        .route("/countries/image", get(get_summary_image))
        .route(
            "/countries/{name}",
            get(get_country).delete(delete_country),
        )
        .route("/status", get(get_status))
}
