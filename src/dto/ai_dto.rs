//! Image-recognition AI DTOs
//!
//! Everything the model returns is an untrusted suggestion: fields are
//! kept as optional strings for the admin form to review, never written
//! to the database directly. The model is asked for strings but often
//! answers with bare numbers, so scalar fields deserialize leniently.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiScanRequest {
    /// Image payload as a `data:image/...;base64,` URL
    pub image: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AiCarDetails {
    #[serde(deserialize_with = "string_or_number")]
    pub make: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub model: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub color: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub mileage: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub body_type: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub fuel_type: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub transmission: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub seats: Option<String>,
    #[serde(deserialize_with = "number_or_string")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiScanResponse {
    pub data: AiCarDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_scalar_parsing() {
        let details: AiCarDetails = serde_json::from_str(
            r#"{"make":"Honda","model":"Civic","year":2022,"price":"20500","confidence":"0.9"}"#,
        )
        .unwrap();
        assert_eq!(details.make.as_deref(), Some("Honda"));
        assert_eq!(details.year.as_deref(), Some("2022"));
        assert_eq!(details.price.as_deref(), Some("20500"));
        assert_eq!(details.confidence, Some(0.9));
        // absent fields default rather than failing
        assert_eq!(details.color, None);
    }
}
