//! Image-recognition AI client
//!
//! Sends a car photo to the Gemini REST API and parses the structured
//! guess it returns. The model frequently wraps its JSON in markdown
//! fences and mixes strings with numbers, so parsing is deliberately
//! lenient; missing identity fields still fail the call because the
//! admin form has nothing to prefill without them.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;

use crate::dto::ai_dto::AiCarDetails;
use crate::utils::errors::AppError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash";

const EXTRACTION_PROMPT: &str = r#"
Analyze this car image and extract the following information:
1. Make (manufacturer)
2. Model
3. Year
4. Color
5. Body Type (e.g., SUV, sedan, hatchback, convertible, coupe, wagon, pickup)
6. Mileage (your best guess)
7. Fuel Type (options are petrol, diesel, electric, hybrid, plug-in hybrid)
8. Transmission type (your best guess)
9. Price (your best guess, just a number without any sign, as a string)
10. A short description suitable for a car listing
11. Number of seats

Format your response as a clean JSON object with these fields:
{
  "make": "",
  "model": "",
  "year": "0000",
  "color": "",
  "price": "",
  "mileage": "",
  "bodyType": "",
  "fuelType": "",
  "transmission": "",
  "description": "",
  "seats": "",
  "confidence": 0.0
}

For confidence, provide a value between 0 and 1 representing how confident
you are in your overall identification.
Only respond with the JSON object, nothing else.
"#;

lazy_static! {
    static ref FENCE_RE: Regex = Regex::new(r"```(?:json)?\n?").unwrap();
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Submit an image and get the model's best-effort attribute guess.
    pub async fn extract_car_details(
        &self,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<AiCarDetails, AppError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, MODEL, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [
                    { "inline_data": { "mime_type": mime_type, "data": image_base64 } },
                    { "text": EXTRACTION_PROMPT },
                ]
            }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("AI request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "AI service returned status {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("AI response was not JSON: {}", e)))?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                AppError::ExternalService("AI response contained no text part".to_string())
            })?;

        parse_ai_response(text)
    }
}

/// Strip markdown fences and parse the model's JSON answer.
pub fn parse_ai_response(text: &str) -> Result<AiCarDetails, AppError> {
    let cleaned = FENCE_RE.replace_all(text, "");
    let cleaned = cleaned.trim();

    let details: AiCarDetails = serde_json::from_str(cleaned)
        .map_err(|e| AppError::ExternalService(format!("Failed to parse AI response: {}", e)))?;

    let has = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has(&details.make) || !has(&details.model) {
        return Err(AppError::ExternalService(
            "AI response is missing required fields: make, model".to_string(),
        ));
    }

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let details = parse_ai_response(
            r#"{"make":"Toyota","model":"Corolla","year":"2020","confidence":0.85}"#,
        )
        .unwrap();
        assert_eq!(details.make.as_deref(), Some("Toyota"));
        assert_eq!(details.confidence, Some(0.85));
    }

    #[test]
    fn test_parse_strips_markdown_fences() {
        let fenced = "```json\n{\"make\":\"Ford\",\"model\":\"F-150\",\"bodyType\":\"pickup\"}\n```";
        let details = parse_ai_response(fenced).unwrap();
        assert_eq!(details.make.as_deref(), Some("Ford"));
        assert_eq!(details.body_type.as_deref(), Some("pickup"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_ai_response("the car appears to be a sedan").unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
    }

    #[test]
    fn test_parse_rejects_missing_identity_fields() {
        let err = parse_ai_response(r#"{"color":"red","confidence":0.4}"#).unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
    }
}
