//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped
//! by feature.

pub mod account;
pub mod cellar;
pub mod subscription;

#[cfg(test)]
pub(crate) mod test_support;
