//! HTTP route handlers.

use std::path::Path as FsPath;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::cache::{DaySchedule, ScheduleError};
use crate::domain::{DriverProfile, DriverUpdate, GeoPoint, Group, GroupId};
use crate::matching::{Rider, Trips, find_trips};
use crate::roster::RosterError;
use crate::untis::TimetableProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir`, when set, is served for every path no route matches.
/// `cors_origins` lists the browser origins allowed to call the API.
pub fn create_router<P: TimetableProvider + 'static>(
    state: AppState<P>,
    static_dir: Option<&FsPath>,
    cors_origins: &[String],
) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/groups", get(list_groups::<P>))
        .route("/api/times", get(group_times::<P>))
        .route("/api/drivers", post(register_driver::<P>))
        .route(
            "/api/drivers/:name",
            get(get_driver::<P>).patch(update_driver::<P>),
        )
        .route("/api/trips", get(possible_trips::<P>))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    if !cors_origins.is_empty() {
        router = router.layer(cors_layer(cors_origins));
    }

    router
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every group name.
async fn list_groups<P: TimetableProvider>(
    State(state): State<AppState<P>>,
) -> Json<GroupListResponse> {
    let groups = state
        .groups
        .groups()
        .iter()
        .map(|g| g.name.clone())
        .collect();

    Json(GroupListResponse { groups })
}

/// First start and last end of a group's day.
async fn group_times<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<TimesQuery>,
) -> Result<Json<TimesResponse>, AppError> {
    let date = parse_date(&req.date)?;
    let group = resolve_group(&state, &req.group)?;

    let response = match state.schedules.bounds_for(group, date).await? {
        DaySchedule::Active(bounds) => TimesResponse {
            start: Some(bounds.start_hhmm()),
            end: Some(bounds.end_hhmm()),
        },
        DaySchedule::NoActivity => TimesResponse {
            start: None,
            end: None,
        },
    };

    Ok(Json(response))
}

/// Register a new driver with default settings.
async fn register_driver<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Json(req): Json<RegisterDriverRequest>,
) -> Result<(StatusCode, Json<DriverView>), AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            message: "Driver name must not be empty".to_string(),
        });
    }

    let id = resolve_group(&state, &req.group)?;
    let group = Group {
        id,
        name: req.group.clone(),
    };
    let home = parse_point(req.latitude, req.longitude)?;
    let profile = DriverProfile::new(name, group, home);
    let view = DriverView::from(&profile);

    state.roster.register(profile).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Get a driver's profile.
async fn get_driver<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
) -> Result<Json<DriverView>, AppError> {
    let profile = state
        .roster
        .get(&name)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Driver not found: {name}"),
        })?;

    Ok(Json(DriverView::from(&profile)))
}

/// Change a driver's allow-listed settings.
async fn update_driver<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
    Json(update): Json<DriverUpdate>,
) -> Result<Json<DriverView>, AppError> {
    let profile = state.roster.update(&name, &update).await?;
    Ok(Json(DriverView::from(&profile)))
}

/// Drivers the rider could share the morning or afternoon trip with.
async fn possible_trips<P: TimetableProvider>(
    State(state): State<AppState<P>>,
    Query(req): Query<TripsQuery>,
) -> Result<Json<Trips>, AppError> {
    let date = parse_date(&req.date)?;
    let group = resolve_group(&state, &req.group)?;

    let home = parse_point(req.latitude, req.longitude)?;

    let rider = Rider {
        name: req.rider,
        group,
        home,
    };
    let drivers = state.roster.enabled().await;

    let trips = find_trips(&state.schedules, &state.anchor, &rider, date, &drivers).await?;
    Ok(Json(trips))
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid date (expected YYYY-MM-DD): {s}"),
    })
}

fn parse_point(latitude: f64, longitude: f64) -> Result<GeoPoint, AppError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest {
            message: format!("Invalid coordinates: {latitude}, {longitude}"),
        });
    }
    Ok(GeoPoint::new(latitude, longitude))
}

fn resolve_group<P>(state: &AppState<P>, name: &str) -> Result<GroupId, AppError> {
    state.groups.resolve(name).ok_or_else(|| AppError::BadRequest {
        message: format!("Unknown group: {name}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<RosterError> for AppError {
    fn from(e: RosterError) -> Self {
        let message = e.to_string();
        match e {
            RosterError::AlreadyRegistered(_) => AppError::Conflict { message },
            RosterError::NotFound(_) => AppError::NotFound { message },
            RosterError::Invalid(_) => AppError::Unprocessable { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
