use std::{net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use landing_core_contact_contracts::ContactFeatureService;
use landing_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact) -> Self {
        Self { health, contact }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        self.serve_on(listener).await
    }

    /// Serve on a listener that is already bound.
    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            info!("Listening on http://{addr}");
        }
        axum::serve(listener, self.router())
            .await
            .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(Arc::new(self.contact)));

        // The last layer added runs first.
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router)
    }
}
