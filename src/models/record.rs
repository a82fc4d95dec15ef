use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::deserialize_reading;

/// Timestamp layouts seen in the `publishtime` column.
const PUBLISH_TIME_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// One monitoring site's reading from the AQI feed.
///
/// Readings are kept as the strings the feed delivers; the typed accessors
/// return `None` for blanks and placeholders such as `"-"` or `"ND"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    #[serde(rename = "siteid", default, deserialize_with = "deserialize_reading")]
    pub site_id: String,
    #[serde(rename = "sitename", default, deserialize_with = "deserialize_reading")]
    pub site_name: String,
    #[serde(default, deserialize_with = "deserialize_reading")]
    pub county: String,
    #[serde(default, deserialize_with = "deserialize_reading")]
    pub aqi: String,
    /// Dominant pollutant, empty when the AQI is in the good band
    #[serde(default, deserialize_with = "deserialize_reading")]
    pub pollutant: String,
    /// Health status label, e.g. "良好" or "普通"
    #[serde(default, deserialize_with = "deserialize_reading")]
    pub status: String,
    #[serde(rename = "pm2.5", default, deserialize_with = "deserialize_reading")]
    pub pm25: String,
    #[serde(default, deserialize_with = "deserialize_reading")]
    pub pm10: String,
    #[serde(rename = "publishtime", default, deserialize_with = "deserialize_reading")]
    pub publish_time: String,
}

impl Record {
    /// PM2.5 concentration in μg/m³.
    pub fn pm25(&self) -> Option<f64> {
        parse_reading(&self.pm25)
    }

    /// PM10 concentration in μg/m³.
    pub fn pm10(&self) -> Option<f64> {
        parse_reading(&self.pm10)
    }

    pub fn aqi_value(&self) -> Option<u32> {
        let value = parse_reading(&self.aqi)?;
        if value < 0.0 {
            return None;
        }
        Some(value.round() as u32)
    }

    /// Parsed publish time (site local time, the feed carries no offset).
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let raw = self.publish_time.trim();
        PUBLISH_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    /// "county site" label used for display and search.
    pub fn label(&self) -> String {
        match (self.county.is_empty(), self.site_name.is_empty()) {
            (true, _) => self.site_name.clone(),
            (false, true) => self.county.clone(),
            (false, false) => format!("{} {}", self.county, self.site_name),
        }
    }
}

/// Parse a numeric reading, rejecting placeholders and non-finite values.
pub fn parse_reading(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nd") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
