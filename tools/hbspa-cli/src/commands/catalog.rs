//! Product and category listings.

use anyhow::{bail, Result};
use hbspa_commerce::catalog::Product;
use hbspa_commerce::CategoryId;
use hbspa_storefront::Region;

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let page = shop.catalog();

    let spinner = ctx.output.spinner("Cargando productos...");
    let region = match &args.category {
        Some(id) => page.load_category(&CategoryId::new(id.as_str())).await,
        None => page.load_products().await,
    };
    spinner.finish_and_clear();

    let products = ready_or_bail(region)?;
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Productos");
    if products.is_empty() {
        ctx.output.info("No hay productos disponibles.");
        return Ok(());
    }
    print_products(ctx, &products);
    if args.category.is_none() {
        ctx.output
            .debug(&format!("catalog snapshot holds {} products", products.len()));
    }
    Ok(())
}

/// Run the categories command.
pub async fn run_categories(ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let categories = ready_or_bail(shop.catalog().load_categories().await)?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categorías");
    for category in &categories {
        ctx.output
            .list_item(&format!("{}  {}", category.id, category.name));
    }
    Ok(())
}

pub(crate) fn print_products(ctx: &Context, products: &[Product]) {
    let formatter = ctx.config.preview.formatter();
    ctx.output
        .table_row(&["ID", "NOMBRE", "PRECIO", "STOCK"], &[6, 32, 12, 6]);
    for product in products {
        let price = formatter.format_amount(product.price);
        let stock = product.stock.to_string();
        ctx.output.table_row(
            &[product.id.as_str(), &product.name, &price, &stock],
            &[6, 32, 12, 6],
        );
    }
}

/// A failed region has already been logged; surface its placeholder.
pub(crate) fn ready_or_bail<T>(region: Region<T>) -> Result<T> {
    match region {
        Region::Ready(value) => Ok(value),
        Region::Failed(message) => bail!(message),
    }
}
