//! Spa services and reservations.

use crate::error::CommerceError;
use crate::ids::{ReservationId, ServiceId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Duration label used when a service does not state one.
pub const DEFAULT_SERVICE_DURATION: &str = "60 min";

/// A bookable spa service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpaService {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SpaService {
    /// Duration label, defaulting to one hour.
    pub fn duration_label(&self) -> &str {
        self.duration
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(DEFAULT_SERVICE_DURATION)
    }

    /// Option label: `Facial - $50.00 (60 min)`.
    pub fn display_label(&self) -> String {
        format!("{} - ${:.2} ({})", self.name, self.price, self.duration_label())
    }
}

/// Reservation lifecycle status as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Pendiente,
    Confirmada,
    /// Any status this client does not know about.
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pendiente => "PENDIENTE",
            ReservationStatus::Confirmada => "CONFIRMADA",
            ReservationStatus::Other(s) => s,
        }
    }

    /// Badge classes for the profile list.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmada => "bg-success",
            ReservationStatus::Pendiente => "bg-warning text-dark",
            ReservationStatus::Other(_) => "bg-secondary",
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDIENTE" => ReservationStatus::Pendiente,
            "CONFIRMADA" => ReservationStatus::Confirmada,
            _ => ReservationStatus::Other(s),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service reference embedded in reservations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRef {
    pub id: ServiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Customer reference in a reservation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRef {
    pub correo: String,
}

/// Body of `POST /reservas`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub usuario: CustomerRef,
    pub spa_service: ServiceRef,
    pub fecha_reserva: String,
    pub hora_reserva: String,
    pub telefono: String,
    pub nota: Option<String>,
    pub estado: ReservationStatus,
}

/// A reservation as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: Option<ReservationId>,
    #[serde(default)]
    pub spa_service: Option<ServiceRef>,
    #[serde(default)]
    pub fecha_reserva: Option<String>,
    #[serde(default)]
    pub hora_reserva: Option<String>,
    #[serde(default)]
    pub estado: Option<ReservationStatus>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub nota: Option<String>,
}

impl Reservation {
    /// Service name, or a generic label.
    pub fn service_name(&self) -> &str {
        self.spa_service
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Servicio")
    }

    /// `2025-03-01, 10:30`, or just the date when no time is set.
    pub fn when(&self) -> String {
        let date = self.fecha_reserva.as_deref().unwrap_or("");
        match self.hora_reserva.as_deref().filter(|h| !h.is_empty()) {
            Some(hora) => format!("{date}, {hora}"),
            None => date.to_string(),
        }
    }
}

/// Booking form as filled in by the shopper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub service_id: Option<ServiceId>,
    pub email: String,
    pub date: String,
    pub time: String,
    pub phone: String,
    pub note: String,
}

impl BookingForm {
    /// Check the form and build the request body.
    ///
    /// The date may not be before `today`. Blank notes are sent as null.
    pub fn validate(&self, today: NaiveDate) -> Result<ReservationRequest, CommerceError> {
        let service_id = self
            .service_id
            .clone()
            .ok_or_else(|| invalid("Por favor selecciona un servicio"))?;

        let email = self.email.trim();
        if email.is_empty() {
            return Err(invalid("El correo electrónico es obligatorio."));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| invalid("Selecciona una fecha válida."))?;
        if date < today {
            return Err(invalid("La fecha no puede ser anterior a hoy."));
        }

        let time = self.time.trim();
        if NaiveTime::parse_from_str(time, "%H:%M").is_err()
            && NaiveTime::parse_from_str(time, "%H:%M:%S").is_err()
        {
            return Err(invalid("Selecciona una hora válida."));
        }

        let note = self.note.trim();
        Ok(ReservationRequest {
            usuario: CustomerRef {
                correo: email.to_string(),
            },
            spa_service: ServiceRef {
                id: service_id,
                name: None,
            },
            fecha_reserva: date.format("%Y-%m-%d").to_string(),
            hora_reserva: time.to_string(),
            telefono: self.phone.trim().to_string(),
            nota: (!note.is_empty()).then(|| note.to_string()),
            estado: ReservationStatus::Pendiente,
        })
    }
}

fn invalid(message: &str) -> CommerceError {
    CommerceError::Validation(message.to_string())
}
