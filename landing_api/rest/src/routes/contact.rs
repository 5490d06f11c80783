use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use landing_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use landing_models::contact::{ContactSubmission, ContactSubmissionDraft, ContactValidationError};
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::contact::{
    ApiContactSubmission, ApiContactValidationError, ApiSendContactEmailResponse,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/send-contact-email", routing::post(send_contact_email))
        .with_state(service)
}

async fn send_contact_email(
    service: State<Arc<impl ContactFeatureService>>,
    payload: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!("rejected request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let submission = match ContactSubmission::try_from(ContactSubmissionDraft::from(payload)) {
        Ok(submission) => submission,
        Err(err) => return validation_error(err),
    };

    match service.send_message(submission).await {
        Ok(receipt) => Json(ApiSendContactEmailResponse::from(receipt)).into_response(),
        Err(
            err @ (ContactSendMessageError::OwnerNotification(_)
            | ContactSendMessageError::Acknowledgment(_)),
        ) => error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

fn validation_error(err: ContactValidationError) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiContactValidationError {
            error: err.to_string(),
            fields: err.0,
        }),
    )
        .into_response()
}
