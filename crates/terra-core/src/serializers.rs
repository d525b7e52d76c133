//! Serde helpers for values the LCD transmits as strings.

/// (De)serialize a `FromStr + Display` value through its string form.
///
/// Integers such as block heights and window lengths arrive as JSON strings.
/// Plain JSON numbers are accepted on input as well.
pub mod from_str {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        };
        raw.parse().map_err(serde::de::Error::custom)
    }
}
