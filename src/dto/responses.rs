use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::records::{AveragePrice, FuelType, Price, SortField, Station, TrendPeriod, Variance};

/// Body of the all-prices and new-prices endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPricesResponse {
    pub stations: Vec<Station>,
    pub prices: Vec<Price>,
}

/// Body of the per-station price endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPricesResponse {
    pub prices: Vec<Price>,
}

/// A price joined with the station it belongs to; radius search result.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPrice {
    pub price: Price,
    pub station: Station,
}

impl StationPrice {
    /// Join prices to their stations by station code. Prices whose code
    /// has no matching station entry are dropped.
    pub fn join(stations: Vec<Station>, prices: Vec<Price>) -> Vec<StationPrice> {
        let by_code: HashMap<u32, Station> =
            stations.into_iter().map(|station| (station.code, station)).collect();

        prices
            .into_iter()
            .filter_map(|price| {
                let station = price.station_code.and_then(|code| by_code.get(&code).cloned())?;
                Some(StationPrice { price, station })
            })
            .collect()
    }
}

/// `{items: [...]}` wrapper the reference endpoint puts around every list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

/// Lookup tables from the reference-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataResponse {
    pub stations: Items<Station>,
    pub brands: Items<Brand>,
    #[serde(rename = "fueltypes")]
    pub fuel_types: Items<FuelType>,
    #[serde(rename = "trendperiods")]
    pub trend_periods: Items<TrendPeriod>,
    #[serde(rename = "sortfields")]
    pub sort_fields: Items<SortField>,
}

impl ReferenceDataResponse {
    pub fn brand_names(&self) -> impl Iterator<Item = &str> {
        self.brands.items.iter().map(|brand| brand.name.as_str())
    }
}

/// Body of the price-trends endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrends {
    #[serde(rename = "Variances")]
    pub variances: Vec<Variance>,
    #[serde(rename = "AveragePrices")]
    pub average_prices: Vec<AveragePrice>,
}
