//! View model for the preview widget.

use crate::config::{PreviewConfig, PreviewVariant};
use crate::state::PreviewState;
use hbspa_commerce::cart::{Cart, CartSummary};
use hbspa_commerce::catalog::CatalogMap;
use hbspa_commerce::ProductId;
use serde::Serialize;

/// One line of the open popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: String,
    /// Formatted unit price; empty when unknown.
    pub price_label: String,
    pub quantity: u32,
}

/// Everything needed to draw the widget, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewView {
    pub state: PreviewState,
    pub variant: PreviewVariant,
    /// Sum of quantities.
    pub count: u64,
    /// `3 artículos`.
    pub items_label: String,
    pub total_label: String,
    pub cta_url: &'static str,
    /// The CTA is always enabled; this only reports an empty cart.
    pub cta_aria_disabled: bool,
    /// At most `item_limit` lines.
    pub lines: Vec<PreviewLine>,
    /// Lines left out beyond the limit.
    pub hidden_lines: usize,
}

impl PreviewView {
    /// Build the view. Same inputs, same view.
    pub fn build(
        state: PreviewState,
        cart: &Cart,
        catalog: &CatalogMap,
        config: &PreviewConfig,
    ) -> Self {
        let formatter = config.formatter();
        let summary = CartSummary::build(cart, catalog, config.currency);

        let lines: Vec<PreviewLine> = summary
            .lines
            .iter()
            .take(config.item_limit)
            .map(|line| PreviewLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                image_url: line.image_url.clone(),
                price_label: line
                    .unit_price
                    .map(|p| formatter.format_or_fallback(&p))
                    .unwrap_or_default(),
                quantity: line.quantity,
            })
            .collect();

        Self {
            state,
            variant: config.variant,
            count: summary.item_count,
            items_label: items_label(summary.item_count),
            total_label: formatter.format_or_fallback(&summary.total),
            cta_url: config.cart_url(),
            cta_aria_disabled: summary.item_count == 0,
            hidden_lines: summary.lines.len().saturating_sub(lines.len()),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn items_label(count: u64) -> String {
    if count == 1 {
        "1 artículo".to_string()
    } else {
        format!("{count} artículos")
    }
}
