use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{de_last_updated, de_opt_station_code, de_station_code, ser_last_updated};

/// Fuel price by fuel type, by station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(rename = "fueltype")]
    pub fuel_type: String,
    pub price: f64,
    /// Present on the wire but in one of two layouts; an unknown layout
    /// decodes as `None` rather than failing the record.
    #[serde(
        rename = "lastupdated",
        deserialize_with = "de_last_updated",
        serialize_with = "ser_last_updated"
    )]
    pub last_updated: Option<NaiveDateTime>,
    #[serde(rename = "priceunit", default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    #[serde(
        rename = "stationcode",
        default,
        deserialize_with = "de_opt_station_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub station_code: Option<u32>,
}

/// Fuel station attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "stationid", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub brand: String,
    #[serde(deserialize_with = "de_station_code")]
    pub code: u32,
    pub name: String,
    pub address: String,
    pub location: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelType {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPeriod {
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub code: String,
    pub name: String,
}

/// Aggregation window for trend figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// Price movement for one fuel type over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variance {
    #[serde(rename = "Code")]
    pub fuel_type: String,
    #[serde(rename = "Period")]
    pub period: Period,
    #[serde(rename = "Price")]
    pub price: f64,
}

/// Average price for one fuel type over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePrice {
    #[serde(rename = "Code")]
    pub fuel_type: String,
    #[serde(rename = "Period")]
    pub period: Period,
    #[serde(rename = "Price")]
    pub price: f64,
    /// Raw capture label; layout depends on the period (`2018-06-02`
    /// for Day/Week/Month, `June 2018` for Year).
    #[serde(rename = "Captured")]
    pub captured: String,
}

impl AveragePrice {
    /// Parse `captured` according to the record's period. Yearly labels
    /// carry no day, so the first of the month stands in.
    pub fn captured_date(&self) -> Option<NaiveDate> {
        match self.period {
            Period::Day | Period::Week | Period::Month => {
                NaiveDate::parse_from_str(&self.captured, "%Y-%m-%d").ok()
            }
            Period::Year => {
                NaiveDate::parse_from_str(&format!("1 {}", self.captured), "%d %B %Y").ok()
            }
        }
    }
}
