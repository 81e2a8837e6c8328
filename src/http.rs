use std::net::SocketAddr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::clock::Clock;
use crate::service::BookingError;
use crate::store::BookingStore;
use crate::types::Booking;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct CreateBookingRequest {
    #[validate(length(min = 1))]
    name: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    success: bool,
    message: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NextGameView {
    day_name: String,
    date_string: String,
    full_date_string: String,
    time: String,
    is_today: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NextGameResponse {
    success: bool,
    next_game: NextGameView,
}

#[derive(Debug, Serialize)]
struct BookingsResponse {
    success: bool,
    bookings: Vec<Booking>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct CreateBookingResponse {
    success: bool,
    booking: Booking,
    message: String,
}

#[derive(Debug, Serialize)]
struct DeleteBookingResponse {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            BookingError::EmptyName => (StatusCode::BAD_REQUEST, None),
            BookingError::Duplicate(_) => (StatusCode::BAD_REQUEST, Some("DUPLICATE")),
            BookingError::NotEligible { code, .. } => {
                (StatusCode::BAD_REQUEST, Some(code.as_str()))
            }
            BookingError::NotFound => (StatusCode::NOT_FOUND, None),
            BookingError::Store(err) => {
                error!(error = %err, "store failure while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        let body = Json(ErrorResponse {
            success: false,
            message: self.to_string(),
            code,
        });
        (status, body).into_response()
    }
}

pub fn app<S: BookingStore, C: Clock>(state: AppState<S, C>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_frontend))
        .route("/api/health", get(get_health))
        .route("/api/next-game", get(get_next_game))
        .route("/api/bookings", get(get_bookings).post(create_booking))
        .route("/api/bookings/:id", delete(delete_booking))
        .with_state(state)
        .layer(cors)
}

pub async fn start_server<S: BookingStore, C: Clock>(state: AppState<S, C>, addr: SocketAddr) {
    let router = app(state);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, router).await.unwrap();
}

async fn get_frontend<S: BookingStore, C: Clock>(
    State(state): State<AppState<S, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    match fs::read_to_string(&state.frontend_path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(err) => {
            let error_message = format!("Failed to read frontend file: {err}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_message))
        }
    }
}

async fn get_health() -> impl IntoResponse {
    Json(HealthResponse {
        success: true,
        message: "Badminton booking service is running".to_string(),
        timestamp: Utc::now(),
    })
}

async fn get_next_game<S: BookingStore, C: Clock>(
    State(state): State<AppState<S, C>>,
) -> impl IntoResponse {
    let next = state.service.next_session();
    Json(NextGameResponse {
        success: true,
        next_game: NextGameView {
            day_name: next.day_name,
            date_string: next.date_string,
            full_date_string: next.full_date_string,
            time: state.service.policy().session_time_label.clone(),
            is_today: next.is_today,
        },
    })
}

async fn get_bookings<S: BookingStore, C: Clock>(
    State(state): State<AppState<S, C>>,
) -> impl IntoResponse {
    let bookings = state.service.list_bookings().await;
    let count = bookings.len();
    Json(BookingsResponse {
        success: true,
        bookings,
        count,
    })
}

async fn create_booking<S: BookingStore, C: Clock>(
    State(state): State<AppState<S, C>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, BookingError> {
    if payload.validate().is_err() {
        return Err(BookingError::EmptyName);
    }
    let created = state.service.create_booking(&payload.name).await?;
    Ok(Json(CreateBookingResponse {
        success: true,
        booking: created.booking,
        message: created.message,
    }))
}

async fn delete_booking<S: BookingStore, C: Clock>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBookingResponse>, BookingError> {
    let id = Uuid::parse_str(&id).map_err(|_| BookingError::NotFound)?;
    state.service.cancel_booking(id).await?;
    Ok(Json(DeleteBookingResponse {
        success: true,
        message: "Booking cancelled".to_string(),
    }))
}
