//! Render the cart preview widget.

use anyhow::Result;
use hbspa_preview::{Activation, PreviewInput, PreviewVariant, PreviewWidget, ScrollLock};

use super::PreviewArgs;
use crate::context::Context;

/// Run the preview command.
pub async fn run(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;

    let mut config = ctx.config.preview.clone();
    if let Some(variant) = &args.variant {
        config.variant = variant.parse::<PreviewVariant>()?;
    }

    let widget = PreviewWidget::mount(
        shop.cart_store().clone(),
        shop.catalog_cache().clone(),
        config,
        ScrollLock::new(),
    );
    if args.open {
        widget.dispatch(PreviewInput::Activate(Activation::Pointer));
    }

    if args.html {
        ctx.output.raw(&widget.html());
        return Ok(());
    }

    let view = widget.view();
    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    ctx.output.header("Tu carrito");
    ctx.output.kv("estado", view.state.as_str());
    ctx.output.kv("artículos", &view.items_label);
    ctx.output.kv("total", &view.total_label);
    if !args.open {
        return Ok(());
    }

    if view.is_empty() {
        ctx.output.info("Tu carrito está vacío.");
    }
    for line in &view.lines {
        ctx.output.list_item(&format!(
            "{} x{}  {}",
            line.name, line.quantity, line.price_label
        ));
    }
    if view.hidden_lines > 0 {
        ctx.output.list_item(&format!("+{} más…", view.hidden_lines));
    }
    ctx.output.kv("ver carrito", view.cta_url);
    Ok(())
}
