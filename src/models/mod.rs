mod record;

pub use record::*;

use serde::{Deserialize, Deserializer};

/// Helper to deserialize a reading given as a string, a number or null.
///
/// The AQI feed mixes `"12"`, `12` and `null` for the same column depending on
/// the endpoint version; everything is normalised to a string and missing
/// values to an empty one.
pub(crate) fn deserialize_reading<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ReadingVisitor;

    impl<'de> Visitor<'de> for ReadingVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(ReadingVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_reading")]
        value: String,
    }

    #[test]
    fn test_reading_from_string() {
        let p: Probe = serde_json::from_str(r#"{"value":"17"}"#).unwrap();
        assert_eq!(p.value, "17");
    }

    #[test]
    fn test_reading_from_numbers() {
        let p: Probe = serde_json::from_str(r#"{"value":17}"#).unwrap();
        assert_eq!(p.value, "17");
        let p: Probe = serde_json::from_str(r#"{"value":-3}"#).unwrap();
        assert_eq!(p.value, "-3");
        let p: Probe = serde_json::from_str(r#"{"value":0.5}"#).unwrap();
        assert_eq!(p.value, "0.5");
    }

    #[test]
    fn test_reading_null_and_missing() {
        let p: Probe = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(p.value, "");
        let p: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.value, "");
    }
}
