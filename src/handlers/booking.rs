use axum::{extract::State, Json};
use chrono::{Local, Timelike, Utc};
use uuid::Uuid;

use crate::availability::is_eligible;
use crate::entities::booking::{BookingConfirmation, BookingRequest};
use crate::error::{AppError, AppResult, FieldErrors};
use crate::estimation::TripQuery;
use crate::utils::validate::validate_booking;
use crate::AppState;

/// Validate a booking, price it and return the confirmation summary
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingRequest>,
) -> AppResult<Json<BookingConfirmation>> {
    let now = Local::now().naive_local();
    let booking = validate_booking(&payload, &state.roster, now).map_err(AppError::Validation)?;

    let credential = if payload.use_remote {
        state.tokens.get().await
    } else {
        None
    };
    let query = TripQuery {
        pickup: payload.pickup.trim().to_string(),
        destination: payload.destination.trim().to_string(),
        departure: Some(booking.departure),
        use_remote: payload.use_remote,
        credential,
    };
    let estimate = state.estimator.estimate(&query).await;

    if !is_eligible(booking.driver, &estimate, booking.departure.hour()) {
        let mut errors = FieldErrors::new();
        errors.insert(
            "driver",
            format!("{} is not available for this trip", booking.driver.name),
        );
        return Err(AppError::Validation(errors));
    }

    let confirmation = BookingConfirmation {
        id: Uuid::new_v4(),
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        email: payload.email.trim().to_string(),
        pickup: query.pickup,
        destination: query.destination,
        date: payload.date,
        driver: booking.driver.clone(),
        estimate,
        created_at: Utc::now(),
    };

    tracing::info!(
        booking_id = %confirmation.id,
        driver_id = %confirmation.driver.id,
        kms = confirmation.estimate.kms,
        price = confirmation.estimate.price,
        "Booking confirmed"
    );

    Ok(Json(confirmation))
}
