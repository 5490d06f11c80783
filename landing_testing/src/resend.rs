use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;
use url::Url;
use uuid::Uuid;

pub const DEFAULT_API_KEY: &str = "re_test_api_key";

/// Recipients in this domain are rejected with a validation error.
pub const REJECTED_DOMAIN: &str = "reject.test";

const EMAILS_ROUTE: &str = "/emails";

/// Emails accepted by the testing server, in the order they were received.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<SentEmail>>>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

impl Outbox {
    pub fn emails(&self) -> Vec<SentEmail> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SentEmail>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend api endpoint: http://{host}:{port}/");
    info!("API key: {api_key:?}");
    info!("Emails to recipients in @{REJECTED_DOMAIN} are rejected");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(api_key, Outbox::default()))
        .await
        .context("Failed to start HTTP server")
}

/// Start the testing server on a random local port in the background and
/// return its base url.
pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<(Url, Outbox)> {
    let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
        .await
        .context("Failed to bind resend testing server")?;
    let addr = listener.local_addr()?;

    let outbox = Outbox::default();
    let router = router(api_key.into(), outbox.clone());
    tokio::spawn(async move { axum::serve(listener, router).await });

    let url = format!("http://{addr}/").parse()?;
    Ok((url, outbox))
}

pub fn router(api_key: String, outbox: Outbox) -> Router<()> {
    Router::new()
        .route("/", routing::get(|| async { "resend testing server" }))
        .route(EMAILS_ROUTE, routing::post(send_email).get(list_emails))
        .with_state(Arc::new(AppState { api_key, outbox }))
}

struct AppState {
    api_key: String,
    outbox: Outbox,
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

#[derive(Serialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    status_code: u16,
    name: &'static str,
    message: &'static str,
}

async fn send_email(
    state: State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|key| key == state.api_key);
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "invalid_api_key", "API key is invalid");
    }

    if request.to.is_empty() || (request.html.is_none() && request.text.is_none()) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `to`, `html` or `text` field.",
        );
    }

    let rejected = request
        .to
        .iter()
        .any(|to| recipient_domain(to) == Some(REJECTED_DOMAIN));
    if rejected {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Invalid `to` field.",
        );
    }

    let id = Uuid::now_v7().to_string();
    info!(%id, to = ?request.to, subject = %request.subject, "accepted email");
    state.outbox.lock().push(SentEmail {
        id: id.clone(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    });

    Json(SendEmailResponse { id }).into_response()
}

/// Domain of a recipient given either as `addr@domain` or `Name <addr@domain>`.
fn recipient_domain(to: &str) -> Option<&str> {
    let address = match to.rsplit_once('<') {
        Some((_, rest)) => rest.trim_end().strip_suffix('>')?,
        None => to,
    };
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim())
}

async fn list_emails(state: State<Arc<AppState>>) -> Json<Vec<SentEmail>> {
    Json(state.outbox.emails())
}

fn error(status: StatusCode, name: &'static str, message: &'static str) -> Response {
    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            name,
            message,
        }),
    )
        .into_response()
}
