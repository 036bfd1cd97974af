//! Quantity Discount Engine
//!
//! This module handles quantity-tier discount calculation for carts.
//! Tiers are configured server-side and evaluated on the backend; clients
//! only ever display the result.

mod money;
mod tiers;

pub use money::*;
pub use tiers::*;
