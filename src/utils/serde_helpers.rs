use serde::{Deserialize, Deserializer};

/// Accepts a job number the backend may emit either as a string or a number.
pub fn deserialize_string_flexible<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Int(i) => Ok(i.to_string()),
        StringOrNumber::Float(f) if f.fract() == 0.0 => Ok(format!("{}", f as i64)),
        StringOrNumber::Float(f) => Ok(f.to_string()),
    }
}
