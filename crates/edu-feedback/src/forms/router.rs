use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;

use super::domain::{FormVariant, PresentationContext, UnknownVariant};
use super::landing::LandingContent;
use super::schema::FormSchema;
use super::service::{FeedbackService, FeedbackServiceError};
use super::session::SessionId;
use super::submission::SubmissionHandler;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContextQuery {
    #[serde(default)]
    pub(crate) context: PresentationContext,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenSessionRequest {
    pub(crate) variant: FormVariant,
    #[serde(default)]
    pub(crate) context: PresentationContext,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldUpdate {
    pub(crate) value: String,
}

/// Router builder exposing the landing content, form schemas, and form sessions.
pub fn feedback_router<H>(service: Arc<FeedbackService<H>>) -> Router
where
    H: SubmissionHandler + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/landing", get(landing_handler))
        .route("/api/v1/forms/:variant", get(schema_handler))
        .route(
            "/api/v1/forms/:variant/submissions",
            post(submit_once_handler::<H>),
        )
        .route("/api/v1/sessions", post(open_session_handler::<H>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<H>).delete(close_session_handler::<H>),
        )
        .route(
            "/api/v1/sessions/:session_id/fields/:field",
            put(set_field_handler::<H>),
        )
        .route(
            "/api/v1/sessions/:session_id/submit",
            post(submit_session_handler::<H>),
        )
        .route(
            "/api/v1/sessions/:session_id/reset",
            post(reset_session_handler::<H>),
        )
        .with_state(service)
}

pub(crate) async fn landing_handler() -> Json<LandingContent> {
    Json(LandingContent::standard())
}

pub(crate) async fn schema_handler(
    Path(variant): Path<String>,
    Query(query): Query<ContextQuery>,
) -> Response {
    match variant.parse::<FormVariant>() {
        Ok(variant) => {
            let descriptor = FormSchema::for_variant(variant).descriptor(query.context);
            (StatusCode::OK, Json(descriptor)).into_response()
        }
        Err(err) => unknown_variant(err),
    }
}

pub(crate) async fn submit_once_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path(variant): Path<String>,
    Query(query): Query<ContextQuery>,
    Json(values): Json<BTreeMap<String, String>>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    let variant = match variant.parse::<FormVariant>() {
        Ok(variant) => variant,
        Err(err) => return unknown_variant(err),
    };

    match service.submit_once(variant, query.context, values) {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(receipt)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn open_session_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Json(request): Json<OpenSessionRequest>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.open_session(request.variant, request.context) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn session_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path(session_id): Path<String>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.session(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn set_field_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path((session_id, field)): Path<(String, String)>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.set_field(&SessionId(session_id), &field, update.value) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn submit_session_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path(session_id): Path<String>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.submit(&SessionId(session_id)) {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(receipt)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn reset_session_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path(session_id): Path<String>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn close_session_handler<H>(
    State(service): State<Arc<FeedbackService<H>>>,
    Path(session_id): Path<String>,
) -> Response
where
    H: SubmissionHandler + ?Sized + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => service_error(err),
    }
}

fn unknown_variant(err: UnknownVariant) -> Response {
    AppError::UnknownVariant(err).into_response()
}

pub(crate) fn service_error(err: FeedbackServiceError) -> Response {
    AppError::Forms(err).into_response()
}
