use std::sync::Arc;

use anyhow::Context;
use landing_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        let (name, template) = BASE_TEMPLATE;
        tera.add_raw_template(name, template)
            .with_context(|| format!("Failed to load template {name}"))?;

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to load template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera
            .render(T::NAME, &context)
            .with_context(|| format!("Failed to render template {}", T::NAME))
    }
}

#[cfg(test)]
mod tests {
    use landing_templates_contracts::{
        ContactAcknowledgmentTemplate, ContactNotificationTemplate,
    };

    use super::*;

    #[test]
    fn contact_notification() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactNotificationTemplate {
                first_name: "Ana".into(),
                last_name: "Silva".into(),
                email: "ana@example.com".into(),
                subject: "Orçamento".into(),
                message: "Gostaria de um orçamento para um site.".into(),
            })
            .unwrap();

        // Assert
        assert!(result.contains("<h2>Nova mensagem de contato do site</h2>"));
        assert!(result.contains("<p><strong>Nome:</strong> Ana Silva</p>"));
        assert!(result.contains("<p><strong>Email:</strong> ana@example.com</p>"));
        assert!(result.contains("<p><strong>Assunto:</strong> Orçamento</p>"));
        assert!(result.contains("Gostaria de um orçamento para um site."));
    }

    #[test]
    fn contact_acknowledgment() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactAcknowledgmentTemplate {
                first_name: "Ana".into(),
                subject: "Orçamento".into(),
                message: "Gostaria de um orçamento para um site.".into(),
            })
            .unwrap();

        // Assert
        assert!(result.contains("<h1>Olá, Ana!</h1>"));
        assert!(result.contains("<p><strong>Assunto:</strong> Orçamento</p>"));
        assert!(result.contains("Gostaria de um orçamento para um site."));
    }

    #[test]
    fn user_input_is_escaped() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactAcknowledgmentTemplate {
                first_name: "<script>alert(1)</script>".into(),
                subject: "a & b".into(),
                message: "<img src=x onerror=alert(1)>".into(),
            })
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<img"));
        assert!(result.contains("&lt;script&gt;"));
        assert!(result.contains("a &amp; b"));
    }
}
