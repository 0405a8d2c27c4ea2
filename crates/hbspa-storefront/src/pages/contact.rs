//! Contact form.

use hbspa_commerce::contact::{ContactForm, ContactValidation};

/// The contact page only validates; nothing is sent anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPage;

impl ContactPage {
    pub fn submit(&self, form: &ContactForm) -> ContactValidation {
        let validation = form.validate();
        if !validation.is_valid() {
            tracing::debug!(
                failures = validation.failures().count(),
                "contact form rejected"
            );
        }
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbspa_commerce::contact::ContactField;

    #[test]
    fn test_submit_reports_each_field() {
        let validation = ContactPage.submit(&ContactForm {
            name: "Ana Pérez".into(),
            email: "ana@correo".into(),
            subject: String::new(),
            message: "hola".into(),
        });
        assert!(!validation.is_valid());
        assert!(validation.feedback(ContactField::Name).is_none());
        assert!(validation.feedback(ContactField::Email).is_some());
        assert!(validation.feedback(ContactField::Subject).is_some());
        assert!(validation.feedback(ContactField::Message).is_some());
    }
}
