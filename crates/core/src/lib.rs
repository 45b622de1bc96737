//! Craftloom Core - Shared types library.
//!
//! This crate provides common types used across all Craftloom components:
//! - `web` - Server-rendered marketplace site
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`checkout`] - Checkout step state machine and cart total arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod types;

pub use checkout::{CartLine, CartTotals, CheckoutStep, PricingPolicy};
pub use types::*;
