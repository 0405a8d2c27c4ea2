//! Contact form validation.

use serde::Serialize;

/// Minimum message length after trimming.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

/// Outcome for one field: `None` feedback means valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub field: ContactField,
    pub feedback: Option<String>,
}

impl FieldCheck {
    fn ok(field: ContactField) -> Self {
        Self {
            field,
            feedback: None,
        }
    }

    fn fail(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            feedback: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.feedback.is_none()
    }
}

/// All field outcomes, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactValidation {
    pub checks: Vec<FieldCheck>,
}

impl ContactValidation {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(FieldCheck::is_valid)
    }

    /// Feedback for one field, if it failed.
    pub fn feedback(&self, field: ContactField) -> Option<&str> {
        self.checks
            .iter()
            .find(|c| c.field == field)
            .and_then(|c| c.feedback.as_deref())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|c| !c.is_valid())
    }
}

/// The contact form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check every field; all fields are reported, not just the first failure.
    pub fn validate(&self) -> ContactValidation {
        ContactValidation {
            checks: vec![
                check_name(&self.name),
                check_email(&self.email),
                check_subject(&self.subject),
                check_message(&self.message),
            ],
        }
    }
}

fn check_name(name: &str) -> FieldCheck {
    let name = name.trim();
    if name.is_empty() {
        return FieldCheck::fail(ContactField::Name, "El nombre completo es obligatorio.");
    }
    if !name.chars().all(is_name_char) {
        return FieldCheck::fail(
            ContactField::Name,
            "El nombre completo solo puede contener letras y espacios.",
        );
    }
    FieldCheck::ok(ContactField::Name)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || "ÑñáéíóúÁÉÍÓÚ".contains(c)
}

fn check_email(email: &str) -> FieldCheck {
    let email = email.trim();
    if email.is_empty() {
        return FieldCheck::fail(ContactField::Email, "El correo electrónico es obligatorio.");
    }
    if !is_email_shaped(email) {
        return FieldCheck::fail(
            ContactField::Email,
            "Introduce un formato de correo electrónico válido (ej: usuario@dominio.com).",
        );
    }
    FieldCheck::ok(ContactField::Email)
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with text on both sides.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

fn check_subject(subject: &str) -> FieldCheck {
    if subject.is_empty() {
        return FieldCheck::fail(ContactField::Subject, "Selecciona un asunto.");
    }
    FieldCheck::ok(ContactField::Subject)
}

fn check_message(message: &str) -> FieldCheck {
    let message = message.trim();
    if message.is_empty() {
        return FieldCheck::fail(ContactField::Message, "El mensaje es obligatorio.");
    }
    if message.chars().count() < MIN_MESSAGE_LEN {
        return FieldCheck::fail(
            ContactField::Message,
            format!("El mensaje debe tener al menos {} caracteres.", MIN_MESSAGE_LEN),
        );
    }
    FieldCheck::ok(ContactField::Message)
}
