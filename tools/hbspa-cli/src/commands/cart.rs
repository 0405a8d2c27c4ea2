//! Local cart commands.

use anyhow::Result;
use dialoguer::Confirm;
use hbspa_commerce::cart::{Cart, CartSummary};
use hbspa_commerce::ProductId;
use hbspa_storefront::{Storefront, SyncStatus};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let store = shop.cart_store();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { id } => add(&shop, &ProductId::new(id), ctx).await,
        CartCommand::Inc { id, qty } => {
            store.increment(&ProductId::new(id), qty);
        }
        CartCommand::Dec { id } => {
            store.decrement(&ProductId::new(id));
        }
        CartCommand::Remove { id } => {
            store.remove(&ProductId::new(id));
        }
        CartCommand::Clear { yes } => {
            let confirmed = yes
                || ctx.output.is_json()
                || Confirm::new()
                    .with_prompt("¿Vaciar el carrito?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                ctx.output.info("Cancelado.");
                return Ok(());
            }
            store.clear();
        }
    }

    show(&shop, &store.read(), ctx);
    Ok(())
}

async fn add(shop: &Storefront, id: &ProductId, ctx: &Context) {
    let spinner = ctx.output.spinner("Agregando al carrito...");
    let outcome = shop.cart().add_to_cart(id).await;
    spinner.finish_and_clear();

    ctx.output.success(outcome.message);
    if let SyncStatus::LocalOnly { reason } = &outcome.sync {
        ctx.output
            .warn(&format!("Guardado solo en este equipo: {}", reason));
    }
}

fn show(shop: &Storefront, cart: &Cart, ctx: &Context) {
    let preview = &ctx.config.preview;
    let summary = CartSummary::build(cart, &shop.catalog_cache().read(), preview.currency);

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return;
    }

    ctx.output.header("Tu carrito");
    if summary.is_empty() {
        ctx.output.info("Tu carrito está vacío.");
        return;
    }

    let formatter = preview.formatter();
    for line in &summary.lines {
        let price = line
            .unit_price
            .map(|p| formatter.format_or_fallback(&p))
            .unwrap_or_else(|| "—".to_string());
        let quantity = format!("x{}", line.quantity);
        let line_total = formatter.format_or_fallback(&line.line_total);
        ctx.output.table_row(
            &[line.product_id.as_str(), &line.name, &price, &quantity, &line_total],
            &[6, 28, 12, 6, 12],
        );
    }
    ctx.output
        .kv("artículos", &summary.item_count.to_string());
    ctx.output
        .kv("total", &formatter.format_or_fallback(&summary.total));
}
