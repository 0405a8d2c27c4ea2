//! Widget configuration.

use hbspa_commerce::{Currency, MoneyFormatter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default number of lines in the open preview.
pub const DEFAULT_ITEM_LIMIT: usize = 6;

/// Errors parsing widget settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("unknown preview variant '{0}' (expected bubble, bar or badge)")]
    UnknownVariant(String),
}

/// How the closed widget presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewVariant {
    /// Floating round button with a count badge.
    #[default]
    Bubble,
    /// "N productos en el carrito" strip.
    Bar,
    /// Header icon with a count.
    Badge,
}

impl PreviewVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewVariant::Bubble => "bubble",
            PreviewVariant::Bar => "bar",
            PreviewVariant::Badge => "badge",
        }
    }
}

impl FromStr for PreviewVariant {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" => Ok(PreviewVariant::Bubble),
            "bar" => Ok(PreviewVariant::Bar),
            "badge" => Ok(PreviewVariant::Badge),
            other => Err(PreviewError::UnknownVariant(other.to_string())),
        }
    }
}

/// Settings for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub variant: PreviewVariant,
    /// Lines shown before the "+N más…" line.
    pub item_limit: usize,
    /// BCP 47 tag for money formatting.
    pub locale: String,
    pub currency: Currency,
    /// Path of the page hosting the widget, used to resolve the cart link.
    pub page_path: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            variant: PreviewVariant::default(),
            item_limit: DEFAULT_ITEM_LIMIT,
            locale: "es-MX".to_string(),
            currency: Currency::MXN,
            page_path: "/".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn formatter(&self) -> MoneyFormatter {
        MoneyFormatter::new(self.locale.clone(), self.currency)
    }

    /// Link to the cart page, relative to the hosting page.
    pub fn cart_url(&self) -> &'static str {
        resolve_cart_url(&self.page_path)
    }
}

/// `ShoppingCart.html` when already inside `/pages/`, `pages/ShoppingCart.html`
/// anywhere else.
pub fn resolve_cart_url(page_path: &str) -> &'static str {
    if page_path.contains("/pages/") {
        "ShoppingCart.html"
    } else {
        "pages/ShoppingCart.html"
    }
}
