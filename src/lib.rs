//! # FuelCheck Client Library
//!
//! Asynchronous client for the NSW FuelCheck API: fetches and caches an
//! OAuth2 client-credentials token, issues authenticated requests
//! against the fixed price endpoints, and decodes responses into typed
//! records.
//!
//! Modules:
//! - `client` — request pipeline and typed operations
//! - `token` — bearer token value and lazy-refresh token manager
//! - `dto` — typed records and response containers
//! - `error` — the four error kinds surfaced to consumers

pub mod client;
pub mod dto;
pub mod error;
pub mod helpers;
pub mod token;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::client::{FuelCheckClient, NearbySearch};
pub use crate::dto::{
    AveragePrice, Coordinates, FuelPricesResponse, FuelType, Period, Price, PriceTrends,
    ReferenceDataResponse, SortField, Station, StationPrice, TrendPeriod, Variance,
};
pub use crate::error::{Error, Result};
pub use crate::token::{Credentials, Token, TokenManager};
