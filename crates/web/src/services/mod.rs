//! Business logic services.

pub mod auth;
pub mod payment;
pub mod uploads;
