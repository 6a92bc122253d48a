//! Shared constants and invariants

/// Production API origin. Tests point the client at a mock server instead.
pub const BASE_URL: &str = "https://api.onegov.nsw.gov.au";

pub const AUTH_ENDPOINT: &str = "/oauth/client_credential/accesstoken";
pub const REFERENCE_ENDPOINT: &str = "/FuelCheckRefData/v2/fuel/lovs";
pub const PRICES_ENDPOINT: &str = "/FuelPriceCheck/v2/fuel/prices";
pub const NEW_PRICES_ENDPOINT: &str = "/FuelPriceCheck/v2/fuel/prices/new";
pub const NEARBY_ENDPOINT: &str = "/FuelPriceCheck/v2/fuel/prices/nearby";
pub const TRENDS_ENDPOINT: &str = "/FuelPriceCheck/v2/fuel/prices/trends";

/// Station price lookup; the station code is appended as a path segment.
pub const STATION_PRICE_ENDPOINT: &str = "/FuelPriceCheck/v2/fuel/prices/station";

/// A cached token is treated as stale this many seconds before its
/// actual expiry, so an in-flight request never rides a dying token.
pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 60;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
