//! Spa service booking.

use crate::api::StorefrontApi;
use crate::region::{FormMessage, Region};
use chrono::NaiveDate;
use hbspa_commerce::booking::{BookingForm, Reservation, SpaService};
use hbspa_data::FetchError;

pub const SERVICES_UNAVAILABLE: &str = "⚠️ No se pudo conectar con el servidor";

/// Result of submitting the booking form.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed {
        reservation: Box<Reservation>,
        message: FormMessage,
    },
    /// Rejected locally or by the backend. Nothing was stored.
    Rejected { message: FormMessage },
}

impl BookingOutcome {
    pub fn message(&self) -> &FormMessage {
        match self {
            BookingOutcome::Confirmed { message, .. } | BookingOutcome::Rejected { message } => {
                message
            }
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, BookingOutcome::Confirmed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BookingPage {
    api: StorefrontApi,
}

impl BookingPage {
    pub fn new(api: StorefrontApi) -> Self {
        Self { api }
    }

    pub async fn load_services(&self) -> Region<Vec<SpaService>> {
        Region::load(
            "spa-services",
            self.api.spa_services().await,
            SERVICES_UNAVAILABLE,
        )
    }

    /// Validate the form against `today` and post the reservation.
    pub async fn submit(&self, form: &BookingForm, today: NaiveDate) -> BookingOutcome {
        let request = match form.validate(today) {
            Ok(request) => request,
            Err(e) => {
                return BookingOutcome::Rejected {
                    message: FormMessage::error(format!("❌ {}", e)),
                }
            }
        };

        match self.api.create_reservation(&request).await {
            Ok(reservation) => {
                let message = FormMessage::success(format!(
                    "✅ ¡Reserva confirmada! Tu cita para {} el {} a las {} ha sido registrada.",
                    reservation.service_name(),
                    request.fecha_reserva,
                    request.hora_reserva
                ));
                BookingOutcome::Confirmed {
                    reservation: Box::new(reservation),
                    message,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "reservation failed");
                BookingOutcome::Rejected {
                    message: FormMessage::error(format!(
                        "❌ Error al crear la reserva: {}",
                        failure_reason(&e)
                    )),
                }
            }
        }
    }
}

fn failure_reason(error: &FetchError) -> String {
    match error {
        FetchError::HttpError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
