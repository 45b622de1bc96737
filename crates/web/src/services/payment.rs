//! Simulated payment gateway.
//!
//! No money moves anywhere. The gateway validates the payment details,
//! sleeps for a short randomised interval to mimic processor latency,
//! then settles the charge by a fixed rule so checkout flows can be
//! exercised end to end:
//!
//! - card numbers ending in `0000` are declined
//! - any other card or UPI charge succeeds
//! - cash on delivery is recorded as pending until handover

use std::time::Duration;

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use craftloom_core::{PaymentMethod, PaymentStatus};

/// Card suffix that always triggers a decline.
const DECLINE_SUFFIX: &str = "0000";

/// Accepted card number lengths, digits only.
const CARD_DIGITS_MIN: usize = 12;
const CARD_DIGITS_MAX: usize = 19;

/// Simulated processor latency bounds, in milliseconds.
const LATENCY_MIN_MS: u64 = 80;
const LATENCY_MAX_MS: u64 = 350;

/// Errors for malformed payment details. Declines are not errors; they
/// settle as [`PaymentStatus::Failed`].
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Card number missing, non-numeric, or the wrong length.
    #[error("invalid card number")]
    InvalidCardNumber,

    /// UPI id missing or not of the `name@bank` shape.
    #[error("invalid UPI id")]
    InvalidUpiId,
}

/// The payment details submitted at checkout.
#[derive(Debug, Clone, Copy)]
pub enum PaymentDetails<'a> {
    Card { number: &'a str },
    Upi { upi_id: &'a str },
    Cod,
}

impl PaymentDetails<'_> {
    /// The method these details pay with.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Card { .. } => PaymentMethod::Card,
            Self::Upi { .. } => PaymentMethod::Upi,
            Self::Cod => PaymentMethod::Cod,
        }
    }
}

/// The settled result of a charge.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    /// Locally generated reference, unique per attempt.
    pub transaction_ref: String,
    pub status: PaymentStatus,
}

impl PaymentOutcome {
    /// Whether the order can proceed (the charge didn't decline).
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !matches!(self.status, PaymentStatus::Failed)
    }
}

/// Simulated payment gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentGateway;

impl PaymentGateway {
    /// Create a new gateway.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Charge an amount with the given details.
    ///
    /// Card numbers and UPI ids are validated but never stored.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the details are malformed. A declined
    /// charge is not an error; check [`PaymentOutcome::is_accepted`].
    pub async fn charge(
        self,
        details: PaymentDetails<'_>,
        amount: Decimal,
    ) -> Result<PaymentOutcome, PaymentError> {
        let status = settle(details)?;

        let latency = rand::rng().random_range(LATENCY_MIN_MS..=LATENCY_MAX_MS);
        tokio::time::sleep(Duration::from_millis(latency)).await;

        let transaction_ref = format!("txn_{}", Uuid::new_v4().simple());

        tracing::info!(
            method = ?details.method(),
            %amount,
            status = ?status,
            transaction_ref,
            "payment settled"
        );

        Ok(PaymentOutcome {
            transaction_ref,
            status,
        })
    }
}

/// Validate the details and decide the outcome, without any latency.
fn settle(details: PaymentDetails<'_>) -> Result<PaymentStatus, PaymentError> {
    match details {
        PaymentDetails::Card { number } => {
            let digits: String = number.chars().filter(char::is_ascii_digit).collect();
            if !(CARD_DIGITS_MIN..=CARD_DIGITS_MAX).contains(&digits.len()) {
                return Err(PaymentError::InvalidCardNumber);
            }
            if digits.ends_with(DECLINE_SUFFIX) {
                Ok(PaymentStatus::Failed)
            } else {
                Ok(PaymentStatus::Succeeded)
            }
        }
        PaymentDetails::Upi { upi_id } => {
            let trimmed = upi_id.trim();
            if trimmed.len() < 3 || !trimmed.contains('@') {
                return Err(PaymentError::InvalidUpiId);
            }
            Ok(PaymentStatus::Succeeded)
        }
        PaymentDetails::Cod => Ok(PaymentStatus::Pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_ending_0000_declines() {
        let status = settle(PaymentDetails::Card {
            number: "4111 1111 1111 0000",
        })
        .unwrap();
        assert_eq!(status, PaymentStatus::Failed);
    }

    #[test]
    fn test_ordinary_card_succeeds() {
        let status = settle(PaymentDetails::Card {
            number: "4111 1111 1111 1111",
        })
        .unwrap();
        assert_eq!(status, PaymentStatus::Succeeded);
    }

    #[test]
    fn test_short_card_number_rejected() {
        assert!(matches!(
            settle(PaymentDetails::Card { number: "4111" }),
            Err(PaymentError::InvalidCardNumber)
        ));
    }

    #[test]
    fn test_upi_requires_at_sign() {
        assert!(matches!(
            settle(PaymentDetails::Upi { upi_id: "no-bank" }),
            Err(PaymentError::InvalidUpiId)
        ));
        assert_eq!(
            settle(PaymentDetails::Upi {
                upi_id: "weaver@upi"
            })
            .unwrap(),
            PaymentStatus::Succeeded
        );
    }

    #[test]
    fn test_cod_is_pending() {
        assert_eq!(settle(PaymentDetails::Cod).unwrap(), PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_charge_generates_unique_refs() {
        let gateway = PaymentGateway::new();
        let a = gateway
            .charge(
                PaymentDetails::Upi {
                    upi_id: "weaver@upi",
                },
                Decimal::new(100, 0),
            )
            .await
            .unwrap();
        let b = gateway
            .charge(
                PaymentDetails::Upi {
                    upi_id: "weaver@upi",
                },
                Decimal::new(100, 0),
            )
            .await
            .unwrap();
        assert_ne!(a.transaction_ref, b.transaction_ref);
        assert!(a.transaction_ref.starts_with("txn_"));
        assert!(a.is_accepted());
    }
}
