//! Signed-in shopper records.

use crate::ids::{OrderId, UserId};
use serde::{Deserialize, Serialize};

/// The current user as returned by `GET /usuarios/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Usuario")
    }
}

/// A past purchase as listed by `GET /orders/mine`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(default)]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl OrderSummary {
    /// Total as `$12.50`; a missing total shows as `$0.00`.
    pub fn total_label(&self) -> String {
        format!("${:.2}", self.total.filter(|t| t.is_finite()).unwrap_or(0.0))
    }

    /// `Orden #12 – 2025-03-01`.
    pub fn title(&self) -> String {
        match self.fecha_creacion.as_deref().filter(|f| !f.is_empty()) {
            Some(fecha) => format!("Orden #{} – {}", self.id, fecha),
            None => format!("Orden #{}", self.id),
        }
    }

    pub fn status_label(&self) -> &str {
        self.estado.as_deref().unwrap_or("—")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_labels() {
        let order: OrderSummary =
            serde_json::from_value(json!({"id": 12, "fechaCreacion": "2025-03-01", "total": 99.5}))
                .unwrap();
        assert_eq!(order.title(), "Orden #12 – 2025-03-01");
        assert_eq!(order.total_label(), "$99.50");
        assert_eq!(order.status_label(), "—");

        let bare: OrderSummary = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(bare.total_label(), "$0.00");
        assert_eq!(bare.title(), "Orden #3");
    }

    #[test]
    fn test_profile_defaults() {
        let user: UserProfile = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(user.display_name(), "Usuario");
    }
}
