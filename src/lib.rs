//! Wine Cellar - personal wine inventory
//!
//! Multi-tenant cellar tracking with reviews and tasting notes, a free tier
//! capped at a handful of wines, and a Stripe-billed Pro tier.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
