//! Login, logout and the shopper profile.

use anyhow::{bail, Result};
use hbspa_auth::TokenKind;
use hbspa_storefront::Region;

use super::{LoginArgs, LogoutArgs};
use crate::context::Context;
use crate::output::status_badge;

/// Run the login command.
pub async fn run_login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let credentials = shop.credentials();

    if args.admin {
        credentials.set(TokenKind::Admin, &args.token)?;
        if let Err(e) = shop.admin().guard() {
            bail!(e.user_message());
        }
        ctx.output.success("Sesión de administrador iniciada.");
        return Ok(());
    }

    match credentials.login_shopper(&args.token)? {
        Some(claims) => {
            let who = claims.sub.unwrap_or_else(|| "Usuario".to_string());
            ctx.output.success(&format!("Sesión iniciada como {}.", who));
        }
        None => ctx.output.success("Sesión iniciada."),
    }
    Ok(())
}

/// Run the logout command.
pub async fn run_logout(args: LogoutArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    if args.admin {
        shop.admin().logout()?;
    } else {
        shop.profile().logout()?;
    }
    ctx.output.success("Sesión cerrada.");
    Ok(())
}

/// Run the profile command.
pub async fn run_profile(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let spinner = ctx.output.spinner("Cargando perfil...");
    let loaded = shop.profile().load().await;
    spinner.finish_and_clear();
    let view = match loaded {
        Ok(view) => view,
        Err(e) => bail!(e.user_message()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header("Mi perfil");
    match &view.user {
        Region::Ready(user) => {
            ctx.output.kv("nombre", user.display_name());
            ctx.output.kv("correo", user.email.as_deref().unwrap_or(""));
        }
        Region::Failed(message) => ctx.output.warn(message),
    }

    ctx.output.header("Mis reservas");
    match &view.reservations {
        Region::Ready(list) if list.is_empty() => ctx.output.info("No tienes reservas aún."),
        Region::Ready(list) => {
            for reservation in list {
                let status = reservation
                    .estado
                    .as_ref()
                    .map(status_badge)
                    .unwrap_or_default();
                ctx.output.list_item(&format!(
                    "{}  {}  {}",
                    reservation.service_name(),
                    reservation.when(),
                    status
                ));
            }
        }
        Region::Failed(message) => ctx.output.warn(message),
    }

    ctx.output.header("Mis compras");
    match &view.orders {
        Region::Ready(list) if list.is_empty() => {
            ctx.output.info("Aún no has realizado compras.")
        }
        Region::Ready(list) => {
            for order in list {
                ctx.output.list_item(&format!(
                    "{}  {}  {}",
                    order.title(),
                    order.total_label(),
                    order.status_label()
                ));
            }
        }
        Region::Failed(message) => ctx.output.warn(message),
    }
    Ok(())
}
