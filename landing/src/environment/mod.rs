use std::sync::Arc;

use landing_config::Config;
use landing_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use landing_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use landing_email_impl::template::TemplateEmailServiceImpl;
use landing_templates_impl::TemplateServiceImpl;
use types::{ContactFeature, Email, HealthFeature, RestServer, TemplateEmail};

pub mod types;

/// Wires the services of the server together
#[derive(Debug, Clone)]
pub struct Provider {
    email: Email,
    config: ConfigProvider,
}

/// The parts of the service configuration derived from [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    contact_feature_config: ContactFeatureConfig,
    health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            contact_feature_config: ContactFeatureConfig {
                owner: Arc::new(config.contact.owner.clone().into()),
            },
            health_feature_config: HealthFeatureConfig {
                cache_ttl: config.health.cache_ttl.into(),
            },
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { email, config }
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        Ok(RestServer::new(
            self.health_feature(),
            self.contact_feature()?,
        ))
    }

    pub fn template_email(&self) -> anyhow::Result<TemplateEmail> {
        Ok(TemplateEmailServiceImpl::new(
            self.email.clone(),
            TemplateServiceImpl::new()?,
        ))
    }

    fn contact_feature(&self) -> anyhow::Result<ContactFeature> {
        Ok(ContactFeatureServiceImpl::new(
            self.template_email()?,
            self.config.contact_feature_config.clone(),
        ))
    }

    fn health_feature(&self) -> HealthFeature {
        HealthFeatureServiceImpl::new(
            self.email.clone(),
            self.config.health_feature_config.clone(),
        )
    }
}
