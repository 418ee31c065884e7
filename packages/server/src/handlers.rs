//! HTTP handler functions for the explorer API.

use actix_web::{HttpResponse, web};
use pfie_engine::{
    agency_breakdown, display_title, export_rows, filter_incidents, map_view, monthly_trends,
};
use pfie_engine_models::FilterCriteria;
use pfie_export::ExportFormat;
use pfie_server_models::{
    ApiHealth, ApiIncidents, ApiMeta, ExportQueryParams, FilterQueryParams, MapQueryParams,
};

use crate::AppState;

/// Sentinel value for "all states" in the state query parameter.
const NATIONAL: &str = "National";

/// Sentinel value for "no restriction" in the agency and status
/// parameters.
const ALL: &str = "All";

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/meta`
///
/// Returns the state list and date span for populating filter controls.
pub async fn meta(state: web::Data<AppState>) -> HttpResponse {
    let session = &state.session;
    let (first_date, last_date) = session
        .date_span()
        .map_or((None, None), |(lo, hi)| (Some(lo), Some(hi)));

    HttpResponse::Ok().json(ApiMeta {
        states: session.states().to_vec(),
        first_date,
        last_date,
        record_count: session.records().len(),
    })
}

/// `GET /api/incidents`
///
/// Returns the filtered, decorated records with the count summary and
/// display title.
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    match parse_criteria(&params) {
        Ok(criteria) => {
            let filtered = filter_incidents(&state.session, &criteria);
            let title = display_title(&state.session, &criteria);
            HttpResponse::Ok().json(ApiIncidents::from_filtered(&filtered, title))
        }
        Err(message) => bad_request(&message),
    }
}

/// `GET /api/agencies`
///
/// Returns the zero-filled bar-chart aggregate table.
pub async fn agencies(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    match parse_criteria(&params) {
        Ok(criteria) => {
            let filtered = filter_incidents(&state.session, &criteria);
            HttpResponse::Ok().json(agency_breakdown(&filtered))
        }
        Err(message) => bad_request(&message),
    }
}

/// `GET /api/trends`
///
/// Returns the monthly trend series (raw counts plus LOESS fit) per
/// injury status.
pub async fn trends(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    match parse_criteria(&params) {
        Ok(criteria) => {
            let filtered = filter_incidents(&state.session, &criteria);
            HttpResponse::Ok().json(monthly_trends(&filtered))
        }
        Err(message) => bad_request(&message),
    }
}

/// `GET /api/map`
///
/// Returns jittered markers and the view frame for the filtered subset.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    match parse_criteria(&FilterQueryParams::from(&*params)) {
        Ok(criteria) => {
            let filtered = filter_incidents(&state.session, &criteria);
            let steps = params.jitter_steps.unwrap_or(0.0);
            HttpResponse::Ok().json(map_view(&state.session, &filtered, &criteria, steps))
        }
        Err(message) => bad_request(&message),
    }
}

/// `GET /api/export`
///
/// Serializes the filtered subset to the requested format and returns it
/// as a file download.
pub async fn export(
    state: web::Data<AppState>,
    params: web::Query<ExportQueryParams>,
) -> HttpResponse {
    let criteria = match parse_criteria(&FilterQueryParams::from(&*params)) {
        Ok(criteria) => criteria,
        Err(message) => return bad_request(&message),
    };

    let format_label = params.format.as_deref().unwrap_or("csv");
    let Ok(format) = format_label.parse::<ExportFormat>() else {
        return bad_request(&format!("Unknown export format '{format_label}'"));
    };

    let filtered = filter_incidents(&state.session, &criteria);
    let rows = export_rows(&filtered);

    match pfie_export::serialize(&rows, format) {
        Ok(content) => {
            let filename =
                pfie_export::download_filename(chrono::Local::now().date_naive(), format);
            HttpResponse::Ok()
                .content_type(format.mime_type())
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(content)
        }
        Err(e) => {
            log::error!("Failed to serialize export: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to serialize export"
            }))
        }
    }
}

/// Maps the raw query parameters to engine criteria.
///
/// Sentinels (`"National"`, `"All"`) and empty strings mean no
/// restriction; date strings that fail to parse are treated as absent so
/// the dataset span applies. Unknown agency or status labels are
/// rejected.
fn parse_criteria(params: &FilterQueryParams) -> Result<FilterCriteria, String> {
    let state = params
        .state
        .as_deref()
        .filter(|s| !s.is_empty() && *s != NATIONAL)
        .map(str::to_string);

    let agency = match params.agency.as_deref() {
        None | Some(ALL | "") => None,
        Some(label) => Some(
            label
                .parse()
                .map_err(|_| format!("Unknown agency type '{label}'"))?,
        ),
    };

    let status = match params.status.as_deref() {
        None | Some(ALL | "") => None,
        Some(label) => Some(
            label
                .parse()
                .map_err(|_| format!("Unknown injury status '{label}'"))?,
        ),
    };

    Ok(FilterCriteria {
        start: params
            .start
            .as_deref()
            .and_then(pfie_ingest::parsing::parse_date),
        end: params
            .end
            .as_deref()
            .and_then(pfie_ingest::parsing::parse_date),
        state,
        agency,
        status,
    })
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}
