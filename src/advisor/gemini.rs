//! Google Gemini implementation of [`NutritionAdvisor`].
//!
//! Uses `generateContent` with a JSON response MIME type and a fixed
//! response schema, so the reply text is the JSON document itself. Anything
//! that does not deserialize into the typed response is a hard failure.

use chrono::Utc;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use super::prompts::{macro_prompt, macro_response_schema, week_plan_prompt, week_plan_schema};
use super::{MacroAdvice, NutritionAdvisor};
use crate::config::AppConfig;
use crate::error::{NutriError, Result};
use crate::models::{UserProfile, WeekPlan};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// Gemini-backed nutrition advisor.
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiAdvisor {
    /// Build a client from configuration.
    ///
    /// Fails with [`NutriError::MissingApiKey`] when no key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(NutriError::MissingApiKey)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Send one schema-constrained prompt and decode the reply.
    fn generate<T: DeserializeOwned>(&self, prompt: &str, schema: Value) -> Result<T> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(map_api_error(status.as_u16(), &body));
        }

        let text = extract_text(&body)?;
        decode_payload(&text)
    }
}

impl NutritionAdvisor for GeminiAdvisor {
    #[instrument(skip_all, fields(model = %self.model))]
    fn calculate_macros(&self, profile: &UserProfile) -> Result<MacroAdvice> {
        let advice: MacroAdvice = self
            .generate(&macro_prompt(profile), macro_response_schema())
            .inspect_err(|e| error!(error = %e, "Error calculating macros"))?;

        if !advice.macros.is_valid() {
            return Err(NutriError::InvalidInput(
                "Advisor returned negative or non-finite macros".to_string(),
            ));
        }

        info!(calories = advice.macros.calories, "Calculated macros");
        Ok(advice)
    }

    #[instrument(skip_all, fields(model = %self.model))]
    fn generate_week_plan(&self, profile: &UserProfile) -> Result<WeekPlan> {
        let mut plan: WeekPlan = self
            .generate(&week_plan_prompt(profile), week_plan_schema())
            .inspect_err(|e| error!(error = %e, "Error generating meal plan"))?;

        plan.id = Utc::now().timestamp_millis().to_string();

        if plan.days.len() != WeekPlan::EXPECTED_DAYS {
            warn!(days = plan.days.len(), "Generated plan does not cover a full week");
        }
        info!(plan_id = %plan.id, days = plan.days.len(), meals = plan.meal_count(), "Generated week plan");

        Ok(plan)
    }
}

/// Turn a non-success response into an API error, preferring the message
/// from Gemini's error envelope.
fn map_api_error(status: u16, body: &str) -> NutriError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    NutriError::Api { status, message }
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(NutriError::Api {
            status: 200,
            message: error.message,
        });
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(NutriError::EmptyResponse)?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        debug!(finish_reason = reason, "Gemini candidate finished");
    }

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(NutriError::EmptyResponse);
    }
    Ok(text)
}

fn decode_payload<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| {
        error!(error = %e, "Advisor response does not match the expected schema");
        NutriError::Json(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn wrap(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = AppConfig::default();
        assert!(matches!(
            GeminiAdvisor::from_config(&config),
            Err(NutriError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let config = AppConfig {
            api_key: Some("k".to_string()),
            api_base: "http://localhost:9000".to_string(),
            ..AppConfig::default()
        };
        let advisor = GeminiAdvisor::from_config(&config).unwrap();
        assert_eq!(advisor.model(), "gemini-2.5-flash");
        assert_eq!(
            advisor.endpoint(),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_and_decode_macros() {
        let body = wrap(r#"{"macros":{"protein":150,"carbs":180,"fats":60,"calories":1900},"advice":"Beba água."}"#);
        let text = extract_text(&body).unwrap();
        let advice: MacroAdvice = decode_payload(&text).unwrap();
        assert_eq!(advice.macros.protein, 150.0);
        assert_eq!(advice.advice, "Beba água.");
    }

    #[test]
    fn test_decode_week_plan() {
        let payload = r#"{
            "title": "Semana Fit",
            "days": [{
                "day": "Segunda-feira",
                "totalMacros": {"protein": 120, "carbs": 150, "fats": 50, "calories": 1600},
                "meals": [{
                    "name": "Omelete", "type": "Café da Manhã", "calories": 300,
                    "macros": {"protein": 20, "carbs": 5, "fats": 18, "calories": 300},
                    "ingredients": [{"item": "Ovo", "amount": "2 un", "category": "Dairy"}],
                    "instructions": ["Bata os ovos"], "prepTime": "10 min"
                }]
            }]
        }"#;
        let plan: WeekPlan = decode_payload(&extract_text(&wrap(payload)).unwrap()).unwrap();
        assert_eq!(plan.days[0].meals[0].meal_type, MealType::Breakfast);
        assert!(plan.id.is_empty());
    }

    #[test]
    fn test_schema_violation_is_hard_failure() {
        let payload = r#"{"title": "Semana", "days": [{"day": "Segunda", "meals": []}]}"#;
        let result: Result<WeekPlan> = decode_payload(&extract_text(&wrap(payload)).unwrap());
        assert!(matches!(result, Err(NutriError::Json(_))));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(NutriError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(&wrap("   ")),
            Err(NutriError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_api_error_reads_envelope() {
        let err = map_api_error(403, r#"{"error": {"code": 403, "message": "API key not valid"}}"#);
        match err {
            NutriError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = map_api_error(502, "Bad Gateway\n");
        assert!(matches!(err, NutriError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}
