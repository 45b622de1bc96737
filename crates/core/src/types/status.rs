//! Status enums for marketplace entities.
//!
//! All statuses are stored as lowercase TEXT columns. The sqlx `Type`
//! implementations are gated behind the `postgres` feature so the core
//! crate stays database-free by default.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an artwork listing.
///
/// Artworks are soft-deleted: deleting sets the status to `Deleted` and
/// listings filter it out, preserving the row for order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Sold,
    Deleted,
}

impl ListingStatus {
    /// Lowercase string form, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Deleted => "deleted",
        }
    }
}

/// Status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Placed,
    Paid,
    Failed,
}

impl OrderStatus {
    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }
}

/// Outcome of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Payment captured by the (simulated) gateway.
    Succeeded,
    /// Gateway declined the payment.
    Failed,
    /// Cash on delivery: nothing captured yet.
    Pending,
}

/// How the buyer chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    Cod,
}

impl PaymentMethod {
    /// Parse from a form value, defaulting to `Card` for unknown input.
    #[must_use]
    pub fn from_form_value(s: &str) -> Self {
        match s {
            "upi" => Self::Upi,
            "cod" => Self::Cod,
            _ => Self::Card,
        }
    }
}

/// What kind of catalog item a cart or order line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Artwork,
    Material,
}

impl ItemKind {
    /// Lowercase string form, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Artwork => "artwork",
            Self::Material => "material",
        }
    }
}

/// Difficulty rating of a tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Parse from a form value, defaulting to `Beginner` for unknown input.
    #[must_use]
    pub fn from_form_value(s: &str) -> Self {
        match s {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_from_form_value() {
        assert_eq!(PaymentMethod::from_form_value("upi"), PaymentMethod::Upi);
        assert_eq!(PaymentMethod::from_form_value("cod"), PaymentMethod::Cod);
        assert_eq!(PaymentMethod::from_form_value("card"), PaymentMethod::Card);
    }

    #[test]
    fn test_payment_method_defaults_to_card_for_unknown_input() {
        assert_eq!(
            PaymentMethod::from_form_value("wire-transfer"),
            PaymentMethod::Card
        );
        assert_eq!(PaymentMethod::from_form_value(""), PaymentMethod::Card);
    }
}
