//! Mock prediction backend for testing
//!
//! A wiremock server that answers the endpoints the dialogue calls, plus a
//! helper to point a [`BackendService`] at it.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use DoseBuddy::config::BackendConfig;
use DoseBuddy::services::BackendService;

/// Mock prediction backend
pub struct BackendMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub expected_calls: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            expected_calls: None,
        }
    }
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A gateway client for this server
    pub fn service(&self) -> BackendService {
        self.service_with_timeout(5)
    }

    pub fn service_with_timeout(&self, timeout_seconds: u64) -> BackendService {
        BackendService::new(&BackendConfig {
            base_url: self.uri(),
            timeout_seconds,
            user_agent: "DoseBuddy-tests".to_string(),
        })
        .expect("mock backend url is valid")
    }

    /// `GET /patients/{encoded_name}` returning a stored patient
    pub async fn mock_patient_found(&self, encoded_name: &str, age: u32) {
        let body = json!({
            "success": true,
            "patient": {"name": encoded_name, "age": age}
        });
        self.mount_get(&format!("/patients/{}", encoded_name), body, MockResponseConfig::default())
            .await;
    }

    /// `GET /patients/{encoded_name}` for an unknown patient
    pub async fn mock_patient_missing(&self, encoded_name: &str) {
        let body = json!({
            "success": false,
            "message": format!("Paciente '{}' no encontrado", encoded_name)
        });
        self.mount_get(&format!("/patients/{}", encoded_name), body, MockResponseConfig::default())
            .await;
    }

    pub async fn mock_health(&self, status: &str, model_trained: bool) {
        let body = json!({"status": status, "model_trained": model_trained});
        self.mount_get("/health", body, MockResponseConfig::default()).await;
    }

    /// `POST /ask` matching a partial request body
    pub async fn mock_ask(&self, request: Value, body: Value, config: MockResponseConfig) {
        self.mount_post("/ask", request, body, config).await;
    }

    /// `POST /parse-combined` matching a partial request body
    pub async fn mock_parse(&self, request: Value, body: Value, config: MockResponseConfig) {
        self.mount_post("/parse-combined", request, body, config).await;
    }

    async fn mount_get(&self, route: &str, body: Value, config: MockResponseConfig) {
        let mut mock = Mock::given(method("GET"))
            .and(path(route))
            .respond_with(Self::template(body, &config));
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    async fn mount_post(&self, route: &str, request: Value, body: Value, config: MockResponseConfig) {
        let mut mock = Mock::given(method("POST"))
            .and(path(route))
            .and(body_partial_json(request))
            .respond_with(Self::template(body, &config));
        if let Some(calls) = config.expected_calls {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    fn template(body: Value, config: &MockResponseConfig) -> ResponseTemplate {
        let mut template = ResponseTemplate::new(config.status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            template = template.set_delay(Duration::from_millis(delay));
        }
        template
    }
}

/// A successful `/parse-combined` body
pub fn dose_body(dose: f64) -> Value {
    json!({
        "success": true,
        "parsed_data": {"exercise_minutes": 20, "glucose": 95.0},
        "interpretations": ["Ejercicio: 20 minutos", "Carbohidratos: pan", "Glucosa: 95 mg/dl"],
        "predicted_dose": dose,
        "range": "5.5 - 7.5",
        "analysis": "Poco ejercicio: 20 min\nGlucosa en rango: 95 mg/dl",
        "medical_context": "",
        "message": "[OK] Procesado correctamente"
    })
}

/// A successful `/ask` body
pub fn answer_body(answer: &str) -> Value {
    json!({
        "success": true,
        "question": "¿Qué alimentos puedo comer?",
        "question_type": "alimentación",
        "answer": answer,
        "confidence": 0.82,
        "source": "knowledge_base"
    })
}
