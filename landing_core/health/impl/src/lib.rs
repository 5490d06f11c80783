use std::{sync::Arc, time::Duration};

use landing_core_health_contracts::{HealthFeatureService, HealthStatus};
use landing_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let is_fresh = |cached: &&CachedStatus| now < cached.timestamp + self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(is_fresh) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(is_fresh) {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping email transport: {err:#}"))
            .is_ok();

        cache_guard
            .insert(CachedStatus {
                status: HealthStatus { email },
                timestamp: now,
            })
            .status
    }
}
