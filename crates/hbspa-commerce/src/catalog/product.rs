//! Product records as exchanged with the backend.

use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Longest product name the backend accepts.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Reference to a category embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRef {
    pub id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price as a decimal amount.
    pub price: f64,
    /// Listing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Package contents (e.g. "250 ml").
    #[serde(default)]
    pub contenido: Option<String>,
    /// Hosted image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Owning category.
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

impl Product {
    /// Unit price in `currency`, `None` if the backend sent a non-finite value.
    pub fn price_in(&self, currency: Currency) -> Option<Money> {
        Money::from_decimal(self.price, currency)
    }

    /// Description for listings, with the storefront's placeholder.
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("Sin descripción disponible.")
    }
}

/// Payload for creating a product from the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub description: String,
    pub contenido: String,
    pub image_url: String,
    pub category: CategoryRef,
}

impl NewProduct {
    /// Check the fields the backend rejects.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CommerceError::Validation(
                "El nombre del producto es obligatorio.".to_string(),
            ));
        }
        if name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(CommerceError::Validation(format!(
                "El nombre no puede exceder {} caracteres.",
                MAX_PRODUCT_NAME_LEN
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::Validation(
                "El precio debe ser un número positivo.".to_string(),
            ));
        }
        if self.stock < 0 {
            return Err(CommerceError::InvalidQuantity(self.stock));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Crema hidratante".to_string(),
            price: 250.0,
            stock: 10,
            description: "Piel suave".to_string(),
            contenido: "250 ml".to_string(),
            image_url: "https://img.example/crema.jpg".to_string(),
            category: CategoryRef {
                id: CategoryId::new("2"),
                name: None,
            },
        }
    }

    #[test]
    fn test_product_from_backend_json() {
        let p: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Facial", "price": 50, "stock": 3,
                "imageUrl": "https://img.example/7.jpg", "category": {"id": 1, "name": "Spa"}}"#,
        )
        .unwrap();

        assert_eq!(p.id, ProductId::new("7"));
        assert_eq!(p.price_in(Currency::MXN).unwrap().amount_cents, 5000);
        assert_eq!(p.image_url.as_deref(), Some("https://img.example/7.jpg"));
        assert_eq!(p.description_or_default(), "Sin descripción disponible.");
    }

    #[test]
    fn test_new_product_wire_shape() {
        let value = serde_json::to_value(new_product()).unwrap();
        assert_eq!(value["imageUrl"], "https://img.example/crema.jpg");
        assert_eq!(value["category"], serde_json::json!({"id": 2}));
    }

    #[test]
    fn test_new_product_validation() {
        assert!(new_product().validate().is_ok());

        let mut blank = new_product();
        blank.name = "  ".to_string();
        assert!(blank.validate().is_err());

        let mut negative = new_product();
        negative.price = -1.0;
        assert!(negative.validate().is_err());

        let mut stock = new_product();
        stock.stock = -2;
        assert!(matches!(stock.validate(), Err(CommerceError::InvalidQuantity(-2))));
    }
}
