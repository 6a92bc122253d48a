//! FuelCheck API client: authenticated request pipeline and the typed
//! operations built on top of it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::dto::{
    FuelPricesResponse, Price, PriceTrends, ReferenceDataResponse, StationPrice,
    StationPricesResponse,
};
use crate::error::{Error, Result};
use crate::helpers::time::{format_if_modified_since, now_rfc3339};
use crate::token::{Credentials, TokenManager};
use crate::utils::constants::{
    AUTH_ENDPOINT, BASE_URL, DEFAULT_HTTP_TIMEOUT_MS, NEARBY_ENDPOINT, NEW_PRICES_ENDPOINT,
    PRICES_ENDPOINT, REFERENCE_ENDPOINT, STATION_PRICE_ENDPOINT, TRENDS_ENDPOINT,
};

/// Async client for the NSW FuelCheck API.
///
/// Cheap to clone; clones share the HTTP pool and the cached token.
#[derive(Debug, Clone)]
pub struct FuelCheckClient {
    http: Client,
    base_url: String,
    api_key: String,
    tokens: TokenManager,
}

impl FuelCheckClient {
    /// Client against the production API.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_base_url(BASE_URL, client_id, client_secret)
    }

    /// Client against an alternative origin (mock servers in tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let credentials = Credentials::new(client_id, client_secret);
        let api_key = credentials.client_id.clone();

        let http = Client::builder()
            .timeout(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS))
            .build()
            .expect("Failed to build HTTP client");

        let auth_url = format!("{base_url}{AUTH_ENDPOINT}");
        let tokens = TokenManager::new(http.clone(), credentials, auth_url);

        Self { http, base_url, api_key, tokens }
    }

    /// Token manager handle. After an [`Error::Auth`] on a data call,
    /// a consumer can `invalidate()` here and retry once itself; the
    /// pipeline never retries on its own.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Current prices for every station in the scheme.
    pub async fn get_fuel_prices(&self) -> Result<FuelPricesResponse> {
        let body = self.get_json(PRICES_ENDPOINT, &[], &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Prices updated since the previous check window.
    pub async fn get_new_fuel_prices(&self) -> Result<FuelPricesResponse> {
        let body = self.get_json(NEW_PRICES_ENDPOINT, &[], &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// All current prices at a single station.
    pub async fn get_fuel_prices_for_station(&self, station_code: u32) -> Result<Vec<Price>> {
        let path = format!("{STATION_PRICE_ENDPOINT}/{station_code}");
        let body = self.get_json(&path, &[], &[]).await?;
        let response: StationPricesResponse = serde_json::from_value(body)?;
        Ok(response.prices)
    }

    /// Prices around a point, joined with their stations.
    pub async fn get_fuel_prices_within_radius(
        &self,
        search: &NearbySearch,
    ) -> Result<Vec<StationPrice>> {
        let body = self.post_json(NEARBY_ENDPOINT, &search.to_payload()).await?;
        let response: FuelPricesResponse = serde_json::from_value(body)?;
        Ok(StationPrice::join(response.stations, response.prices))
    }

    /// Price variances and period averages for a location.
    pub async fn get_fuel_price_trends(
        &self,
        latitude: f64,
        longitude: f64,
        fuel_types: &[&str],
    ) -> Result<PriceTrends> {
        let payload = TrendsPayload {
            location: TrendsLocation { latitude, longitude },
            fueltypes: fuel_types.iter().map(|code| CodeRef { code }).collect(),
        };
        let body = self.post_json(TRENDS_ENDPOINT, &payload).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Stations / brands / fuel types / trend periods / sort fields
    /// lookup tables. `modified_since` turns the call incremental.
    pub async fn get_reference_data(
        &self,
        modified_since: Option<DateTime<Utc>>,
        states: Option<&[&str]>,
    ) -> Result<ReferenceDataResponse> {
        let mut query = Vec::new();
        if let Some(states) = states {
            query.push(("states", states.join(",")));
        }
        let mut headers = Vec::new();
        if let Some(dt) = modified_since {
            headers.push(("if-modified-since", format_if_modified_since(dt)));
        }

        let body = self.get_json(REFERENCE_ENDPOINT, &query, &headers).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        extra_headers: &[(&str, String)],
    ) -> Result<Value> {
        let mut request = self.http.get(self.url(path)).query(query);
        for (name, value) in extra_headers {
            request = request.header(*name, value.as_str());
        }
        self.dispatch(request, path).await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.dispatch(request, path).await
    }

    /// The pipeline shared by every operation: attach a valid token and
    /// the mandated headers, send, classify the outcome.
    async fn dispatch(&self, request: RequestBuilder, path: &str) -> Result<Value> {
        let token = self.tokens.get_valid_token().await?;
        let transaction_id = Uuid::new_v4().to_string();

        debug!(path, %transaction_id, bearer = %redact(&token.value), "requesting FuelCheck endpoint");

        let response = request
            .header("Authorization", format!("Bearer {}", token.value))
            .header("Content-Type", "application/json")
            .header("apikey", self.api_key.as_str())
            .header("TransactionID", transaction_id)
            .header("RequestTimestamp", now_rfc3339())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Reference data runs to megabytes; log its status only.
        if path == REFERENCE_ENDPOINT {
            debug!(%status, "API response");
        } else {
            debug!(%status, body = %body, "API response");
        }

        classify(status, &body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map an HTTP outcome onto the error taxonomy; 2xx bodies decode to JSON.
fn classify(status: StatusCode, body: &str) -> Result<Value> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::auth(format!("API rejected the bearer token ({status})")));
    }

    if !status.is_success() {
        let (code, message) = match serde_json::from_str::<ApiErrorDetail>(body) {
            Ok(detail) => (detail.error_code, detail.message),
            Err(_) => (
                status.as_str().to_string(),
                status.canonical_reason().unwrap_or("unknown error").to_string(),
            ),
        };
        return Err(Error::Api { status, code, message });
    }

    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "errorCode")]
    error_code: String,
    message: String,
}

/// Parameters for the radius search.
///
/// The upstream wants every number and boolean in this POST body as a
/// string; [`NearbySearch::to_payload`] owns that formatting.
#[derive(Debug, Clone)]
pub struct NearbySearch {
    pub fuel_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: u32,
    pub brands: Vec<String>,
    pub named_location: Option<String>,
    pub sort_by: String,
    pub sort_ascending: bool,
}

impl NearbySearch {
    pub fn new(fuel_type: impl Into<String>, latitude: f64, longitude: f64, radius_km: u32) -> Self {
        Self {
            fuel_type: fuel_type.into(),
            latitude,
            longitude,
            radius_km,
            brands: Vec::new(),
            named_location: None,
            sort_by: "price".to_string(),
            sort_ascending: true,
        }
    }

    pub fn brands(mut self, brands: Vec<String>) -> Self {
        self.brands = brands;
        self
    }

    pub fn named_location(mut self, location: impl Into<String>) -> Self {
        self.named_location = Some(location.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.sort_by = field.into();
        self.sort_ascending = ascending;
        self
    }

    fn to_payload(&self) -> NearbyPayload {
        NearbyPayload {
            fueltype: self.fuel_type.clone(),
            brand: self.brands.clone(),
            namedlocation: self.named_location.clone().unwrap_or_default(),
            latitude: self.latitude.to_string(),
            longitude: self.longitude.to_string(),
            radius: self.radius_km.to_string(),
            sortby: self.sort_by.clone(),
            sortascending: self.sort_ascending.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NearbyPayload {
    fueltype: String,
    brand: Vec<String>,
    namedlocation: String,
    latitude: String,
    longitude: String,
    radius: String,
    sortby: String,
    sortascending: String,
}

#[derive(Debug, Serialize)]
struct TrendsPayload<'a> {
    location: TrendsLocation,
    fueltypes: Vec<CodeRef<'a>>,
}

#[derive(Debug, Serialize)]
struct TrendsLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct CodeRef<'a> {
    code: &'a str,
}

/// Shorten a secret for log output.
fn redact(value: &str) -> String {
    if !value.is_ascii() || value.len() <= 10 {
        return "***".to_string();
    }
    format!("{}...{}", &value[..6], &value[value.len() - 4..])
}
