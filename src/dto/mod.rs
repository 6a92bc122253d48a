//! Typed records for FuelCheck API responses.
//!
//! Decoding is schema-driven: required fields are plain serde fields
//! (a missing key fails the whole record), optional ones are `Option`.
//! The helpers below absorb the API's wire quirks — station codes that
//! arrive as numbers or numeric strings, and the two `lastupdated`
//! timestamp layouts.

pub mod records;
pub mod responses;

pub use records::{
    AveragePrice, Coordinates, FuelType, Period, Price, SortField, Station, TrendPeriod, Variance,
};
pub use responses::{
    Brand, FuelPricesResponse, Items, PriceTrends, ReferenceDataResponse, StationPrice,
    StationPricesResponse,
};

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::helpers::time::parse_last_updated;

const LASTUPDATED_OUT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub(crate) fn de_last_updated<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    // Unrecognized layouts degrade to None; the key itself is required.
    let raw = String::deserialize(deserializer)?;
    Ok(parse_last_updated(&raw))
}

pub(crate) fn ser_last_updated<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(LASTUPDATED_OUT_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}

pub(crate) fn de_station_code<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    code_from_value(serde_json::Value::deserialize(deserializer)?)
        .map_err(|unexpected| D::Error::custom(format!("invalid station code: {unexpected}")))
}

pub(crate) fn de_opt_station_code<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => code_from_value(value)
            .map(Some)
            .map_err(|unexpected| D::Error::custom(format!("invalid station code: {unexpected}"))),
    }
}

fn code_from_value(value: serde_json::Value) -> Result<u32, serde_json::Value> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| serde_json::Value::Number(n)),
        serde_json::Value::String(s) => match s.trim().parse() {
            Ok(code) => Ok(code),
            Err(_) => Err(serde_json::Value::String(s)),
        },
        other => Err(other),
    }
}
