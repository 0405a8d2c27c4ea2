//! Spa services and reservations.

use anyhow::{bail, Result};
use hbspa_commerce::booking::BookingForm;
use hbspa_commerce::ServiceId;

use super::catalog::ready_or_bail;
use super::BookArgs;
use crate::context::Context;

/// Run the services command.
pub async fn run_services(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let spinner = ctx.output.spinner("Cargando servicios...");
    let services = ready_or_bail(shop.booking().load_services().await)?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&services);
        return Ok(());
    }

    ctx.output.header("Servicios");
    for service in &services {
        ctx.output
            .list_item(&format!("[{}] {}", service.id, service.display_label()));
    }
    Ok(())
}

/// Run the book command.
pub async fn run(args: BookArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let form = BookingForm {
        service_id: args.service.map(ServiceId::new),
        email: args.email,
        date: args.date,
        time: args.time,
        phone: args.phone,
        note: args.note,
    };
    let today = chrono::Local::now().date_naive();

    let spinner = ctx.output.spinner("⏳ Procesando reserva...");
    let outcome = shop.booking().submit(&form, today).await;
    spinner.finish_and_clear();

    let message = outcome.message();
    if message.is_error() {
        bail!(message.text.clone());
    }
    if ctx.output.is_json() {
        ctx.output.json(message);
    } else {
        ctx.output.success(&message.text);
    }
    Ok(())
}
