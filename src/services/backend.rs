//! Prediction backend client
//!
//! This service talks to the remote prediction / question-answering backend:
//! patient lookup, free-text questions and combined daily-data parsing.
//! Transport problems (timeouts, refused connections, non-2xx statuses,
//! undecodable bodies) surface as [`BackendError`]; an endpoint that answers
//! `success: false` is returned as a normal response.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::BackendConfig;
use crate::utils::errors::{BackendError, BackendResult, DoseBuddyError, Result};

/// Outcome of looking a patient up by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientLookup {
    pub found: bool,
    pub age: Option<u32>,
}

impl PatientLookup {
    pub fn unknown() -> Self {
        Self { found: false, age: None }
    }

    pub fn known(age: u32) -> Self {
        Self { found: true, age: Some(age) }
    }
}

/// Body shared by `/ask` and `/parse-combined`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub description: String,
    pub patient_name: String,
    pub patient_age: Option<u32>,
}

/// `GET /patients/{name}` response
#[derive(Debug, Clone, Deserialize)]
pub struct PatientResponse {
    pub success: bool,
    pub patient: Option<PatientRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    pub age: Option<u32>,
}

/// `POST /ask` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionAnswer {
    pub success: bool,
    pub answer: Option<String>,
    pub question_type: Option<String>,
    pub confidence: Option<f64>,
    pub message: Option<String>,
}

/// `POST /parse-combined` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CombinedParse {
    pub success: bool,
    #[serde(default)]
    pub interpretations: Vec<String>,
    pub predicted_dose: Option<f64>,
    pub range: Option<String>,
    pub analysis: Option<String>,
    pub medical_context: Option<String>,
    pub message: Option<String>,
}

/// `GET /health` response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_trained: Option<bool>,
}

/// The three calls the dialogue drives
#[async_trait]
pub trait PatientBackend: Send + Sync {
    async fn lookup_patient(&self, name: &str) -> BackendResult<PatientLookup>;

    async fn ask_question(&self, request: &TurnRequest) -> BackendResult<QuestionAnswer>;

    async fn parse_combined(&self, request: &TurnRequest) -> BackendResult<CombinedParse>;
}

/// HTTP implementation of [`PatientBackend`]
#[derive(Clone, Debug)]
pub struct BackendService {
    client: Client,
    base_url: String,
}

impl BackendService {
    /// Create a new BackendService instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(DoseBuddyError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend whether it is up and has a trained model
    pub async fn health_check(&self) -> BackendResult<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        self.send_json("health", self.client.get(&url)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, endpoint: &str, request: RequestBuilder) -> BackendResult<T> {
        debug!(endpoint = endpoint, "Making backend request");

        let response = request.send().await.map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PatientBackend for BackendService {
    async fn lookup_patient(&self, name: &str) -> BackendResult<PatientLookup> {
        let url = format!("{}/patients/{}", self.base_url, urlencoding::encode(name));
        let response: PatientResponse = self.send_json("patients", self.client.get(&url)).await?;

        let lookup = match (response.success, response.patient) {
            (true, Some(patient)) => PatientLookup { found: true, age: patient.age },
            _ => PatientLookup::unknown(),
        };
        debug!(found = lookup.found, has_age = lookup.age.is_some(), "Patient lookup finished");

        Ok(lookup)
    }

    async fn ask_question(&self, request: &TurnRequest) -> BackendResult<QuestionAnswer> {
        let url = format!("{}/ask", self.base_url);
        self.send_json("ask", self.client.post(&url).json(request)).await
    }

    async fn parse_combined(&self, request: &TurnRequest) -> BackendResult<CombinedParse> {
        let url = format!("{}/parse-combined", self.base_url);
        self.send_json("parse-combined", self.client.post(&url).json(request)).await
    }
}

fn map_transport_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else if e.is_connect() {
        BackendError::ServiceUnavailable
    } else if e.is_decode() {
        BackendError::InvalidResponse(e.to_string())
    } else {
        BackendError::RequestFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combined_deserialization() {
        let json = r#"{
            "success": true,
            "parsed_data": {"glucose": 95.0},
            "interpretations": ["Ejercicio: 20 minutos", "Glucosa: 95 mg/dl"],
            "predicted_dose": 6.5,
            "range": "5.5 - 7.5",
            "analysis": "Poco ejercicio: 20 min\nGlucosa en rango: 95 mg/dl",
            "medical_context": "",
            "message": "[OK] Procesado correctamente"
        }"#;
        let response: CombinedParse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.interpretations.len(), 2);
        assert_eq!(response.predicted_dose, Some(6.5));
        assert_eq!(response.medical_context.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_combined_failure_body() {
        let json = r#"{"success": false, "error": "boom", "message": "Error al procesar información"}"#;
        let response: CombinedParse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.interpretations.is_empty());
        assert!(response.predicted_dose.is_none());
        assert_eq!(response.message.as_deref(), Some("Error al procesar información"));
    }

    #[test]
    fn test_question_answer_deserialization() {
        let json = r#"{"success": true, "question": "q", "question_type": "alimentación", "answer": "Verduras", "confidence": 0.82, "source": "kb"}"#;
        let response: QuestionAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(response.answer.as_deref(), Some("Verduras"));
        assert_eq!(response.question_type.as_deref(), Some("alimentación"));
        assert_eq!(response.confidence, Some(0.82));
    }

    #[test]
    fn test_patient_response_without_patient() {
        let json = r#"{"success": false, "message": "Paciente 'Maria' no encontrado"}"#;
        let response: PatientResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.patient.is_none());
    }

    #[test]
    fn test_turn_request_serialization() {
        let request = TurnRequest {
            description: "mi glucosa es 95".to_string(),
            patient_name: "Maria".to_string(),
            patient_age: Some(34),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["description"], "mi glucosa es 95");
        assert_eq!(value["patient_name"], "Maria");
        assert_eq!(value["patient_age"], 34);
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = BackendConfig {
            base_url: "localhost without scheme".to_string(),
            timeout_seconds: 5,
            user_agent: "test".to_string(),
        };
        assert!(BackendService::new(&config).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = BackendConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_seconds: 5,
            user_agent: "test".to_string(),
        };
        let service = BackendService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:5000");
    }
}
