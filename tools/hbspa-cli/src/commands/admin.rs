//! Admin product panel.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use hbspa_commerce::catalog::{CategoryRef, NewProduct};
use hbspa_commerce::{CategoryId, ProductId};
use hbspa_storefront::{FormMessage, StorefrontError};

use super::catalog::{print_products, ready_or_bail};
use super::{AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let admin = shop.admin();

    match args.command {
        AdminCommand::List => {
            let products = ready_or_bail(admin.list_products().await.map_err(denied)?)?;
            let categories = admin.list_categories().await.map_err(denied)?;

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "products": products,
                    "categories": categories,
                }));
                return Ok(());
            }

            ctx.output.header("Productos");
            print_products(ctx, &products);
            ctx.output.header("Categorías");
            match categories.ready() {
                Some(list) => {
                    for c in list {
                        ctx.output.list_item(&format!("{}  {}", c.id, c.name));
                    }
                }
                None => ctx
                    .output
                    .warn(categories.failure().unwrap_or_default()),
            }
            Ok(())
        }
        AdminCommand::Add {
            name,
            price,
            stock,
            description,
            contenido,
            image_url,
            category,
        } => {
            let product = NewProduct {
                name,
                price,
                stock,
                description,
                contenido,
                image_url,
                category: CategoryRef {
                    id: CategoryId::new(category),
                    name: None,
                },
            };
            let message = admin.create_product(&product).await.map_err(denied)?;
            report(ctx, &message)
        }
        AdminCommand::Delete { id, yes } => {
            admin.guard().map_err(denied)?;
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("¿Eliminar el producto {}?", id))
                    .default(false)
                    .interact()?;
            if !confirmed {
                ctx.output.info("Cancelado.");
                return Ok(());
            }
            let message = admin
                .delete_product(&ProductId::new(id))
                .await
                .map_err(denied)?;
            report(ctx, &message)
        }
    }
}

fn denied(e: StorefrontError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}

fn report(ctx: &Context, message: &FormMessage) -> Result<()> {
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
