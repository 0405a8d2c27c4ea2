//! Contact form validation.

use anyhow::{bail, Result};
use hbspa_commerce::contact::ContactForm;
use hbspa_storefront::ContactPage;

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        subject: args.subject,
        message: args.message,
    };
    let validation = ContactPage.submit(&form);

    if ctx.output.is_json() {
        ctx.output.json(&validation);
    }
    if validation.is_valid() {
        ctx.output.success("Formulario válido.");
        return Ok(());
    }

    for check in validation.failures() {
        ctx.output.warn(&format!(
            "{}: {}",
            check.field.as_str(),
            check.feedback.as_deref().unwrap_or_default()
        ));
    }
    bail!("El formulario tiene errores.")
}
