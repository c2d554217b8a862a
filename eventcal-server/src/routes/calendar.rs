//! Month calendar endpoint

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;

use eventcal_core::event::parse_date;
use eventcal_core::{CalendarMonth, build_month};

use crate::routes::AppError;
use crate::routes::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/calendar/{year}/{month}", get(month_grid))
}

#[derive(Deserialize)]
pub struct MonthQuery {
    /// Overrides the server clock for the `isToday` flag (YYYY-MM-DD)
    pub today: Option<String>,
}

/// GET /api/calendar/:year/:month - Month grid with each day's events
async fn month_grid(
    State(state): State<AppState>,
    ApiPath((year, month)): ApiPath<(i32, u32)>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Response, AppError> {
    let month = CalendarMonth::new(year, month)?;
    let today = match query.today.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    let events = state.store()?.list()?;
    let grid = build_month(month, &events, today);

    Ok(Json(grid).into_response())
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn grid_has_blanks_days_and_events() {
        let app = test_app();
        send(
            &app,
            "POST",
            "/api/events",
            Some(json!({
                "title": "Rent",
                "startDate": "2024-01-31T00:00",
                "endDate": "2024-12-31T00:00",
                "isRecurring": true,
                "frequency": "monthly"
            })),
        )
        .await;

        let uri = "/api/calendar/2024/5?today=2024-05-02";
        let (status, may) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(may["monthName"], "May");
        assert_eq!(may["leadingBlanks"], 3);

        let cells = may["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 3 + 31);
        assert_eq!(cells[4]["day"], 2);
        assert_eq!(cells[4]["isToday"], true);
        assert_eq!(cells[33]["day"], 31);
        assert_eq!(cells[33]["events"][0]["title"], "Rent");

        // April has no 31st, so Rent never shows
        let (_, april) = send(&app, "GET", "/api/calendar/2024/4", None).await;
        let total: usize = april["cells"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["events"].as_array())
            .map(|e| e.len())
            .sum();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn invalid_month_is_400() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/calendar/2024/13", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid month"));

        let uri = "/api/calendar/2024/5?today=yesterday";
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_path_gets_json_error() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/api/calendar/2024/may", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("may"));
    }
}
