//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, auth identity)
//! - `account` - Users, credentials and preferences
//! - `subscription` - Tiers, limits and billing status
//! - `cellar` - Wines, reviews, tasting notes and list queries

pub mod account;
pub mod cellar;
pub mod foundation;
pub mod subscription;
