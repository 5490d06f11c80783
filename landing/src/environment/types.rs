use landing_core_contact_impl::ContactFeatureServiceImpl;
use landing_core_health_impl::HealthFeatureServiceImpl;
use landing_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use landing_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = landing_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Templates
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<TemplateEmail>;
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
